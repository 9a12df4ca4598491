// Copyright (c) 2016-2021 Fabian Schuiki

//! Architecture bodies.

use super::end::EndSpec;
use super::error::BlockParserError;
use super::region::{self, RegionSpec};
use super::state::{kw, ParserState};
use super::{concurrent, BlockKind};
use crate::lexer::Kw;

static END: EndSpec = EndSpec {
    kind: BlockKind::ArchitectureEnd,
    keyword: Kw::Architecture,
    second: None,
    keyword_required: false,
};

static REGION: RegionSpec = RegionSpec {
    items: &[
        Kw::Constant,
        Kw::Signal,
        Kw::Shared,
        Kw::Use,
        Kw::Procedure,
        Kw::Function,
        Kw::Pure,
        Kw::Impure,
    ],
    begin: Some(BlockKind::ArchitectureBegin),
    statements: Some(state!(concurrent::region)),
    end: &END,
};

pub(super) fn enter(state: &mut ParserState) {
    let resume = state.running;
    state.push(resume, state!(start));
    state.reissue = true;
}

fn start(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_keyword(Kw::Architecture) {
        return Err(state.expected(&[kw(Kw::Architecture)]));
    }
    state.classify_word();
    state.next_state = state!(after_keyword);
    Ok(())
}

fn after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_name() {
        return Err(state.expected(&["an architecture name"]));
    }
    let name = state.identifier();
    state.declare(Kw::Architecture, Some(name));
    state.next_state = state!(after_name);
    Ok(())
}

fn after_name(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_keyword(Kw::Of) {
        return Err(state.expected(&[kw(Kw::Of)]));
    }
    state.classify_word();
    state.next_state = state!(after_of);
    Ok(())
}

fn after_of(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_name() {
        return Err(state.expected(&["an entity name"]));
    }
    state.identifier();
    state.next_state = state!(after_entity);
    Ok(())
}

fn after_entity(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_keyword(Kw::Is) {
        return Err(state.expected(&[kw(Kw::Is)]));
    }
    state.classify_word();
    state.emit(BlockKind::ArchitectureName);
    state.context.region = Some(&REGION);
    state.context.end = Some(&END);
    state.next_state = state!(region::declarative);
    Ok(())
}
