// Copyright (c) 2016-2021 Fabian Schuiki

//! Library clauses, use clauses, and context references.

use super::error::BlockParserError;
use super::state::{kw, ParserState};
use super::BlockKind;
use crate::lexer::{Kw, TokenKind};

/// The blocks of one kind of reference clause.
pub(crate) struct ReferenceSpec {
    pub keyword: Kw,
    pub start: BlockKind,
    pub name: BlockKind,
    pub delimiter: BlockKind,
    pub end: BlockKind,
    /// Whether names may be selected names such as `ieee.numeric_std.all`.
    pub selected: bool,
}

pub(crate) static LIBRARY: ReferenceSpec = ReferenceSpec {
    keyword: Kw::Library,
    start: BlockKind::LibraryStart,
    name: BlockKind::LibraryReferenceName,
    delimiter: BlockKind::LibraryDelimiter,
    end: BlockKind::LibraryEnd,
    selected: false,
};

pub(crate) static USE: ReferenceSpec = ReferenceSpec {
    keyword: Kw::Use,
    start: BlockKind::UseStart,
    name: BlockKind::UseReferenceName,
    delimiter: BlockKind::UseDelimiter,
    end: BlockKind::UseEnd,
    selected: true,
};

pub(crate) static CONTEXT: ReferenceSpec = ReferenceSpec {
    keyword: Kw::Context,
    start: BlockKind::ContextStart,
    name: BlockKind::ContextReferenceName,
    delimiter: BlockKind::ContextDelimiter,
    end: BlockKind::ContextEnd,
    selected: true,
};

// The counter tracks the position within a name: 0 before a name segment, 1
// after one.

pub(super) fn enter(state: &mut ParserState, spec: &'static ReferenceSpec) {
    let resume = state.running;
    state.push(resume, state!(start));
    state.context.reference = Some(spec);
    state.reissue = true;
}

fn start(state: &mut ParserState) -> Result<(), BlockParserError> {
    let spec = state.require(state.context.reference, "reference")?;
    if !state.is_keyword(spec.keyword) {
        return Err(state.expected(&[kw(spec.keyword)]));
    }
    state.classify_word();
    state.next_state = state!(after_keyword);
    Ok(())
}

fn after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    let spec = state.require(state.context.reference, "reference")?;
    if !state.is_name() {
        return Err(state.expected(&[format!("a name after {}", kw(spec.keyword))]));
    }
    state.emit_before(spec.start);
    name_segment(state);
    state.next_state = state!(name);
    Ok(())
}

fn name_segment(state: &mut ParserState) {
    if state.kind() == TokenKind::Word {
        state.classify_word();
    }
    state.counter = 1;
}

fn name(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    let spec = state.require(state.context.reference, "reference")?;
    if state.counter == 0 {
        if state.is_name() || (spec.selected && state.is_keyword(Kw::All)) {
            name_segment(state);
            return Ok(());
        }
        return Err(state.expected(&["a name"]));
    }
    if spec.selected && state.is_char('.') {
        state.counter = 0;
        return Ok(());
    }
    if state.is_char(',') {
        state.emit_before(spec.name);
        state.emit(spec.delimiter);
        state.next_state = state!(after_delimiter);
        return Ok(());
    }
    if state.is_char(';') {
        state.emit_before(spec.name);
        state.emit(spec.end);
        return state.pop(1);
    }
    if spec.selected {
        Err(state.expected(&["`.`", "`,`", "`;`"]))
    } else {
        Err(state.expected(&["`,`", "`;`"]))
    }
}

fn after_delimiter(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_name() {
        return Err(state.expected(&["a name"]));
    }
    name_segment(state);
    state.next_state = state!(name);
    Ok(())
}
