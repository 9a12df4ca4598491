// Copyright (c) 2016-2021 Fabian Schuiki

//! Assertions and report statements.

use super::error::BlockParserError;
use super::expression;
use super::state::{kw, ParserState};
use super::BlockKind;
use crate::lexer::Kw;

/// Parse `assert COND [report MSG] [severity LEVEL];` starting at the
/// current token.
pub(super) fn enter_assert(state: &mut ParserState) {
    let resume = state.running;
    state.push(resume, state!(assert_start));
    state.reissue = true;
}

fn assert_start(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_keyword(Kw::Assert) {
        return Err(state.expected(&[kw(Kw::Assert)]));
    }
    state.classify_word();
    state.next_state = state!(assert_after_keyword);
    Ok(())
}

fn assert_after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    state.emit_before(BlockKind::AssertStart);
    state.push_expression(state!(assert_after_condition), &expression::ASSERT_CONDITION);
    Ok(())
}

fn assert_after_condition(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.is_keyword(Kw::Report) {
        state.classify_word();
        state.emit(BlockKind::AssertReport);
        state.next_state = state!(assert_message);
        return Ok(());
    }
    assert_after_message(state)
}

fn assert_message(state: &mut ParserState) -> Result<(), BlockParserError> {
    state.push_expression(state!(assert_after_message), &expression::ASSERT_MESSAGE);
    Ok(())
}

fn assert_after_message(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.is_keyword(Kw::Severity) {
        state.classify_word();
        state.emit(BlockKind::AssertSeverity);
        state.next_state = state!(assert_level);
        return Ok(());
    }
    assert_end(state)
}

fn assert_level(state: &mut ParserState) -> Result<(), BlockParserError> {
    state.push_expression(state!(assert_end), &expression::ASSERT_SEVERITY);
    Ok(())
}

fn assert_end(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_char(';') {
        return Err(state.expected(&["`;`"]));
    }
    state.emit(BlockKind::AssertEnd);
    state.pop(1)
}

/// Parse `report MSG [severity LEVEL];` starting at the current token.
pub(super) fn enter_report(state: &mut ParserState) {
    let resume = state.running;
    state.push(resume, state!(report_start));
    state.reissue = true;
}

fn report_start(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_keyword(Kw::Report) {
        return Err(state.expected(&[kw(Kw::Report)]));
    }
    state.classify_word();
    state.next_state = state!(report_after_keyword);
    Ok(())
}

fn report_after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    state.emit_before(BlockKind::ReportStart);
    state.push_expression(state!(report_after_message), &expression::REPORT_MESSAGE);
    Ok(())
}

fn report_after_message(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.is_keyword(Kw::Severity) {
        state.classify_word();
        state.emit(BlockKind::ReportSeverity);
        state.next_state = state!(report_level);
        return Ok(());
    }
    report_end(state)
}

fn report_level(state: &mut ParserState) -> Result<(), BlockParserError> {
    state.push_expression(state!(report_end), &expression::REPORT_SEVERITY);
    Ok(())
}

fn report_end(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_char(';') {
        return Err(state.expected(&["`;`"]));
    }
    state.emit(BlockKind::ReportEnd);
    state.pop(1)
}
