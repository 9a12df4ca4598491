// Copyright (c) 2016-2021 Fabian Schuiki

//! Procedure and function declarations and bodies.
//!
//! Whether a subprogram is a declaration or a body is decided by the `;` or
//! `is` after its specification. The name is declared as soon as it is seen
//! and forgotten again for declarations.

use super::end::EndSpec;
use super::error::BlockParserError;
use super::list;
use super::object::subtype_indication;
use super::region::{self, RegionSpec};
use super::state::{kw, ParserState};
use super::{sequential, BlockKind};
use crate::lexer::{Kw, TokenKind};

static PROCEDURE_END: EndSpec = EndSpec {
    kind: BlockKind::ProcedureEnd,
    keyword: Kw::Procedure,
    second: None,
    keyword_required: false,
};

static PROCEDURE_REGION: RegionSpec = RegionSpec {
    items: &[
        Kw::Constant,
        Kw::Variable,
        Kw::Use,
        Kw::Procedure,
        Kw::Function,
        Kw::Pure,
        Kw::Impure,
    ],
    begin: Some(BlockKind::ProcedureBegin),
    statements: Some(state!(sequential::region)),
    end: &PROCEDURE_END,
};

static FUNCTION_END: EndSpec = EndSpec {
    kind: BlockKind::FunctionEnd,
    keyword: Kw::Function,
    second: None,
    keyword_required: false,
};

static FUNCTION_REGION: RegionSpec = RegionSpec {
    items: &[
        Kw::Constant,
        Kw::Variable,
        Kw::Use,
        Kw::Procedure,
        Kw::Function,
        Kw::Pure,
        Kw::Impure,
    ],
    begin: Some(BlockKind::FunctionBegin),
    statements: Some(state!(sequential::region)),
    end: &FUNCTION_END,
};

pub(super) fn enter_procedure(state: &mut ParserState) {
    let resume = state.running;
    state.push(resume, state!(procedure_start));
    state.reissue = true;
}

fn procedure_start(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_keyword(Kw::Procedure) {
        return Err(state.expected(&[kw(Kw::Procedure)]));
    }
    state.classify_word();
    state.next_state = state!(procedure_name);
    Ok(())
}

fn procedure_name(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_name() {
        return Err(state.expected(&["a procedure name"]));
    }
    let name = state.identifier();
    state.declare(Kw::Procedure, Some(name));
    state.next_state = state!(procedure_after_name);
    Ok(())
}

fn procedure_after_name(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if state.is_char('(') {
        state.emit_before(BlockKind::ProcedureName);
        list::enter_then(state, &list::PARAMETER_LIST, state!(procedure_after_parameters));
        return Ok(());
    }
    if state.is_keyword(Kw::Is) {
        state.classify_word();
        state.emit(BlockKind::ProcedureName);
        return procedure_body(state);
    }
    if state.is_char(';') {
        state.emit_before(BlockKind::ProcedureName);
        return declaration_end(state, BlockKind::ProcedureDeclarationEnd);
    }
    Err(state.expected(&["`(`".to_string(), kw(Kw::Is), "`;`".to_string()]))
}

fn procedure_after_parameters(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if state.is_keyword(Kw::Is) {
        state.classify_word();
        state.emit(BlockKind::ProcedureIs);
        return procedure_body(state);
    }
    if state.is_char(';') {
        return declaration_end(state, BlockKind::ProcedureDeclarationEnd);
    }
    Err(state.expected(&[kw(Kw::Is), "`;`".to_string()]))
}

fn procedure_body(state: &mut ParserState) -> Result<(), BlockParserError> {
    state.context.region = Some(&PROCEDURE_REGION);
    state.context.end = Some(&PROCEDURE_END);
    state.next_state = state!(region::declarative);
    Ok(())
}

pub(super) fn enter_function(state: &mut ParserState) {
    let resume = state.running;
    state.push(resume, state!(function_start));
    state.reissue = true;
}

fn function_start(state: &mut ParserState) -> Result<(), BlockParserError> {
    match state.keyword() {
        Some(Kw::Pure) | Some(Kw::Impure) => {
            state.classify_word();
            state.next_state = state!(function_keyword);
            Ok(())
        }
        Some(Kw::Function) => function_keyword(state),
        _ => Err(state.expected(&[kw(Kw::Function), kw(Kw::Pure), kw(Kw::Impure)])),
    }
}

fn function_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_keyword(Kw::Function) {
        return Err(state.expected(&[kw(Kw::Function)]));
    }
    state.classify_word();
    state.next_state = state!(function_name);
    Ok(())
}

fn function_name(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_name() && state.kind() != TokenKind::StringLiteral {
        return Err(state.expected(&["a function name", "an operator symbol"]));
    }
    let name = state.identifier();
    state.declare(Kw::Function, Some(name));
    state.next_state = state!(function_after_name);
    Ok(())
}

fn function_after_name(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if state.is_char('(') {
        state.emit_before(BlockKind::FunctionName);
        list::enter_then(state, &list::PARAMETER_LIST, state!(function_after_parameters));
        return Ok(());
    }
    if state.is_keyword(Kw::Return) {
        state.emit_before(BlockKind::FunctionName);
        return function_after_parameters(state);
    }
    Err(state.expected(&["`(`".to_string(), kw(Kw::Return)]))
}

fn function_after_parameters(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_keyword(Kw::Return) {
        return Err(state.expected(&[kw(Kw::Return)]));
    }
    state.classify_word();
    state.counter = 0;
    state.content = false;
    state.next_state = state!(return_type);
    Ok(())
}

fn return_type(state: &mut ParserState) -> Result<(), BlockParserError> {
    if subtype_indication(state)? {
        return Ok(());
    }
    if !state.content {
        return Err(state.expected(&["a type mark"]));
    }
    if state.is_keyword(Kw::Is) {
        state.classify_word();
        state.emit(BlockKind::FunctionReturnType);
        state.context.region = Some(&FUNCTION_REGION);
        state.context.end = Some(&FUNCTION_END);
        state.next_state = state!(region::declarative);
        return Ok(());
    }
    if state.is_char(';') {
        state.emit_before(BlockKind::FunctionReturnType);
        return declaration_end(state, BlockKind::FunctionDeclarationEnd);
    }
    Err(state.expected(&[kw(Kw::Is), "`;`".to_string()]))
}

/// Finish a subprogram declaration at the current `;`.
fn declaration_end(state: &mut ParserState, kind: BlockKind) -> Result<(), BlockParserError> {
    state.emit(kind);
    state.names.pop();
    state.pop(1)
}
