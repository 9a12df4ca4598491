// Copyright (c) 2016-2021 Fabian Schuiki

//! Package declarations and package bodies. Which of the two is being parsed
//! is only known once the word after `package` has been seen.

use super::end::EndSpec;
use super::error::BlockParserError;
use super::region::{self, region_trivia, RegionSpec};
use super::state::{kw, ParserState};
use super::BlockKind;
use crate::lexer::Kw;

static PACKAGE_END: EndSpec = EndSpec {
    kind: BlockKind::PackageEnd,
    keyword: Kw::Package,
    second: None,
    keyword_required: false,
};

static PACKAGE_REGION: RegionSpec = RegionSpec {
    items: &[
        Kw::Generic,
        Kw::Constant,
        Kw::Signal,
        Kw::Shared,
        Kw::Use,
        Kw::Procedure,
        Kw::Function,
        Kw::Pure,
        Kw::Impure,
    ],
    begin: None,
    statements: None,
    end: &PACKAGE_END,
};

static BODY_END: EndSpec = EndSpec {
    kind: BlockKind::PackageBodyEnd,
    keyword: Kw::Package,
    second: Some(Kw::Body),
    keyword_required: false,
};

static BODY_REGION: RegionSpec = RegionSpec {
    items: &[
        Kw::Constant,
        Kw::Shared,
        Kw::Use,
        Kw::Procedure,
        Kw::Function,
        Kw::Pure,
        Kw::Impure,
    ],
    begin: None,
    statements: None,
    end: &BODY_END,
};

pub(super) fn enter(state: &mut ParserState) {
    let resume = state.running;
    state.push(resume, state!(start));
    state.reissue = true;
}

fn start(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_keyword(Kw::Package) {
        return Err(state.expected(&[kw(Kw::Package)]));
    }
    state.classify_word();
    state.next_state = state!(after_keyword);
    Ok(())
}

fn after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if state.is_keyword(Kw::Body) {
        state.classify_word();
        state.next_state = state!(body_after_keyword);
        return Ok(());
    }
    if !state.is_name() {
        return Err(state.expected(&[kw(Kw::Body), "a package name".to_string()]));
    }
    let name = state.identifier();
    state.declare(Kw::Package, Some(name));
    state.next_state = state!(after_name);
    Ok(())
}

fn after_name(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_keyword(Kw::Is) {
        return Err(state.expected(&[kw(Kw::Is)]));
    }
    state.classify_word();
    state.emit(BlockKind::PackageName);
    state.context.region = Some(&PACKAGE_REGION);
    state.context.end = Some(&PACKAGE_END);
    state.next_state = state!(after_is);
    Ok(())
}

/// Distinguishes a package declaration from a package instantiation, which
/// continues with `new`.
fn after_is(state: &mut ParserState) -> Result<(), BlockParserError> {
    if region_trivia(state) {
        return Ok(());
    }
    if state.is_keyword(Kw::New) {
        return Err(state.not_implemented("package instantiation"));
    }
    state.next_state = state!(region::declarative);
    state.reissue = true;
    Ok(())
}

fn body_after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_name() {
        return Err(state.expected(&["a package name"]));
    }
    let name = state.identifier();
    state.declare(Kw::Package, Some(name));
    state.next_state = state!(body_after_name);
    Ok(())
}

fn body_after_name(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_keyword(Kw::Is) {
        return Err(state.expected(&[kw(Kw::Is)]));
    }
    state.classify_word();
    state.emit(BlockKind::PackageBodyName);
    state.context.region = Some(&BODY_REGION);
    state.context.end = Some(&BODY_END);
    state.next_state = state!(region::declarative);
    Ok(())
}
