// Copyright (c) 2016-2021 Fabian Schuiki

//! If statements and loops. The statements of a branch or loop body are
//! parsed by the sequential region running in the frame of the if statement
//! or loop, so that the `end` of the body also ends the statement.

use super::end::EndSpec;
use super::error::BlockParserError;
use super::expression;
use super::state::{kw, Body, ParserState};
use super::{sequential, BlockKind};
use crate::lexer::Kw;

static IF_END: EndSpec = EndSpec {
    kind: BlockKind::IfEnd,
    keyword: Kw::If,
    second: None,
    keyword_required: true,
};

static LOOP_END: EndSpec = EndSpec {
    kind: BlockKind::LoopEnd,
    keyword: Kw::Loop,
    second: None,
    keyword_required: true,
};

/// Parse an if statement starting at the current `if` keyword.
pub(super) fn enter_if(state: &mut ParserState, label: Option<String>) {
    let resume = state.running;
    state.push(resume, state!(if_start));
    state.declare(Kw::If, label);
    state.reissue = true;
}

fn if_start(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_keyword(Kw::If) {
        return Err(state.expected(&[kw(Kw::If)]));
    }
    state.classify_word();
    state.next_state = state!(if_after_keyword);
    Ok(())
}

fn if_after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    state.emit_before(BlockKind::IfStart);
    state.push_expression(state!(if_then), &expression::IF_CONDITION);
    Ok(())
}

fn if_then(state: &mut ParserState) -> Result<(), BlockParserError> {
    branch(state, BlockKind::IfThen)
}

/// Continue an if statement at the current `elsif` keyword.
pub(super) fn elsif(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_keyword(Kw::Elsif) {
        return Err(state.expected(&[kw(Kw::Elsif)]));
    }
    state.classify_word();
    state.next_state = state!(elsif_after_keyword);
    Ok(())
}

fn elsif_after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    state.emit_before(BlockKind::ElsIfStart);
    state.push_expression(state!(elsif_then), &expression::ELSIF_CONDITION);
    Ok(())
}

fn elsif_then(state: &mut ParserState) -> Result<(), BlockParserError> {
    branch(state, BlockKind::ElsIfThen)
}

fn branch(state: &mut ParserState, kind: BlockKind) -> Result<(), BlockParserError> {
    if !state.is_keyword(Kw::Then) {
        return Err(state.expected(&[kw(Kw::Then)]));
    }
    state.classify_word();
    state.emit(kind);
    state.context.end = Some(&IF_END);
    state.context.body = Body::IfBranch;
    state.next_state = state!(sequential::region);
    Ok(())
}

/// Continue an if statement at the current `else` keyword.
pub(super) fn else_branch(state: &mut ParserState) {
    state.classify_word();
    state.emit(BlockKind::Else);
    state.context.body = Body::ElseBranch;
}

/// Parse a loop starting at the current `for`, `while`, or `loop` keyword.
pub(super) fn enter_loop(state: &mut ParserState, label: Option<String>) {
    let resume = state.running;
    state.push(resume, state!(loop_start));
    state.declare(Kw::Loop, label);
    state.reissue = true;
}

fn loop_start(state: &mut ParserState) -> Result<(), BlockParserError> {
    match state.keyword() {
        Some(Kw::For) => {
            state.classify_word();
            state.next_state = state!(for_parameter);
            Ok(())
        }
        Some(Kw::While) => {
            state.classify_word();
            state.next_state = state!(while_after_keyword);
            Ok(())
        }
        Some(Kw::Loop) => loop_body(state),
        _ => Err(state.expected(&[kw(Kw::For), kw(Kw::While), kw(Kw::Loop)])),
    }
}

fn for_parameter(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_name() {
        return Err(state.expected(&["a loop parameter"]));
    }
    state.identifier();
    state.next_state = state!(for_in);
    Ok(())
}

fn for_in(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_keyword(Kw::In) {
        return Err(state.expected(&[kw(Kw::In)]));
    }
    state.classify_word();
    state.next_state = state!(for_after_in);
    Ok(())
}

fn for_after_in(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    state.emit_before(BlockKind::ForStart);
    state.push_expression(state!(for_after_range), &expression::FOR_RANGE);
    Ok(())
}

fn for_after_range(state: &mut ParserState) -> Result<(), BlockParserError> {
    match state.keyword() {
        Some(Kw::To) | Some(Kw::Downto) => {
            state.classify_word();
            state.emit(BlockKind::LoopDirection);
            state.next_state = state!(bound);
            Ok(())
        }
        _ => loop_body(state),
    }
}

fn bound(state: &mut ParserState) -> Result<(), BlockParserError> {
    state.push_expression(state!(loop_body), &expression::LOOP_BOUND);
    Ok(())
}

fn while_after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    state.emit_before(BlockKind::WhileStart);
    state.push_expression(state!(loop_body), &expression::WHILE_CONDITION);
    Ok(())
}

fn loop_body(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_keyword(Kw::Loop) {
        return Err(state.expected(&[kw(Kw::Loop)]));
    }
    state.classify_word();
    state.emit(BlockKind::LoopBegin);
    state.context.end = Some(&LOOP_END);
    state.context.body = Body::Plain;
    state.next_state = state!(sequential::region);
    Ok(())
}
