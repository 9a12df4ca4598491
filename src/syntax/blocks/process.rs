// Copyright (c) 2016-2021 Fabian Schuiki

//! Process statements.

use super::end::EndSpec;
use super::error::BlockParserError;
use super::region::{self, RegionSpec};
use super::state::{kw, ParserState};
use super::{sequential, BlockKind};
use crate::lexer::{Kw, TokenKind};

static END: EndSpec = EndSpec {
    kind: BlockKind::ProcessEnd,
    keyword: Kw::Process,
    second: None,
    keyword_required: true,
};

static REGION: RegionSpec = RegionSpec {
    items: &[
        Kw::Constant,
        Kw::Variable,
        Kw::Shared,
        Kw::Use,
        Kw::Procedure,
        Kw::Function,
        Kw::Pure,
        Kw::Impure,
    ],
    begin: Some(BlockKind::ProcessBegin),
    statements: Some(state!(sequential::region)),
    end: &END,
};

/// Parse a process starting at the current `process` keyword. A label, if
/// any, is still pending and becomes part of the name block.
pub(super) fn enter(state: &mut ParserState, label: Option<String>) {
    let resume = state.running;
    state.push(resume, state!(start));
    state.declare(Kw::Process, label);
    state.reissue = true;
}

fn start(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_keyword(Kw::Process) {
        return Err(state.expected(&[kw(Kw::Process)]));
    }
    state.classify_word();
    state.next_state = state!(after_keyword);
    Ok(())
}

fn after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if state.is_char('(') {
        state.counter = 1;
        state.next_state = state!(sensitivity);
        return Ok(());
    }
    after_sensitivity(state)
}

/// The sensitivity list. The counter holds the parenthesis depth.
fn sensitivity(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    match state.kind() {
        TokenKind::Character('(') => state.counter += 1,
        TokenKind::Character(')') => {
            state.counter -= 1;
            if state.counter == 0 {
                state.next_state = state!(after_sensitivity);
            }
        }
        TokenKind::Character(';') | TokenKind::EndOfDocument => {
            return Err(state.expected(&["`)`"]))
        }
        TokenKind::Word => state.classify_word(),
        _ => (),
    }
    Ok(())
}

fn after_sensitivity(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if state.is_keyword(Kw::Is) {
        state.classify_word();
        state.emit(BlockKind::ProcessName);
    } else {
        state.emit_before(BlockKind::ProcessName);
        state.reissue = true;
    }
    state.context.region = Some(&REGION);
    state.context.end = Some(&END);
    state.next_state = state!(region::declarative);
    Ok(())
}
