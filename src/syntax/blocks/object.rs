// Copyright (c) 2016-2021 Fabian Schuiki

//! Constant, signal, variable, and shared variable declarations, as well as
//! the subtype indications they share with interface lists.

use super::error::BlockParserError;
use super::expression::{self, ExpressionSpec};
use super::state::{kw, ParserState};
use super::BlockKind;
use crate::lexer::{Fused, Kw, TokenKind};

/// The blocks of one class of object declaration.
pub(crate) struct ObjectSpec {
    pub keyword: Kw,
    pub declaration: BlockKind,
    pub expression: &'static ExpressionSpec,
    pub end: BlockKind,
}

pub(crate) static CONSTANT: ObjectSpec = ObjectSpec {
    keyword: Kw::Constant,
    declaration: BlockKind::ConstantDeclaration,
    expression: &expression::CONSTANT_DEFAULT,
    end: BlockKind::ConstantDeclarationEnd,
};

pub(crate) static SIGNAL: ObjectSpec = ObjectSpec {
    keyword: Kw::Signal,
    declaration: BlockKind::SignalDeclaration,
    expression: &expression::SIGNAL_DEFAULT,
    end: BlockKind::SignalDeclarationEnd,
};

pub(crate) static VARIABLE: ObjectSpec = ObjectSpec {
    keyword: Kw::Variable,
    declaration: BlockKind::VariableDeclaration,
    expression: &expression::VARIABLE_DEFAULT,
    end: BlockKind::VariableDeclarationEnd,
};

pub(crate) static SHARED_VARIABLE: ObjectSpec = ObjectSpec {
    keyword: Kw::Shared,
    declaration: BlockKind::SharedVariableDeclaration,
    expression: &expression::VARIABLE_DEFAULT,
    end: BlockKind::VariableDeclarationEnd,
};

pub(super) fn enter(state: &mut ParserState, spec: &'static ObjectSpec) {
    let resume = state.running;
    state.push(resume, state!(start));
    state.context.object = Some(spec);
    state.reissue = true;
}

fn start(state: &mut ParserState) -> Result<(), BlockParserError> {
    let spec = state.require(state.context.object, "object")?;
    if !state.is_keyword(spec.keyword) {
        return Err(state.expected(&[kw(spec.keyword)]));
    }
    state.classify_word();
    state.counter = 0;
    state.next_state = if spec.keyword == Kw::Shared {
        state!(after_shared)
    } else {
        state!(names)
    };
    Ok(())
}

fn after_shared(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_keyword(Kw::Variable) {
        return Err(state.expected(&[kw(Kw::Variable)]));
    }
    state.classify_word();
    state.next_state = state!(names);
    Ok(())
}

/// The identifier list. The counter is 1 directly after a name.
fn names(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if state.counter == 0 {
        if state.is_name() {
            state.identifier();
            state.counter = 1;
            return Ok(());
        }
        return Err(state.expected(&["an object name"]));
    }
    if state.is_char(',') {
        state.counter = 0;
        return Ok(());
    }
    if state.is_char(':') {
        state.counter = 0;
        state.content = false;
        state.next_state = state!(subtype);
        return Ok(());
    }
    Err(state.expected(&["`,`", "`:`"]))
}

fn subtype(state: &mut ParserState) -> Result<(), BlockParserError> {
    if subtype_indication(state)? {
        return Ok(());
    }
    let spec = state.require(state.context.object, "object")?;
    if !state.content {
        return Err(state.expected(&["a subtype indication"]));
    }
    if state.is_char(';') {
        state.emit_before(spec.declaration);
        state.emit(spec.end);
        state.pop(1)
    } else if state.is_fused(Fused::VarAssign) {
        state.emit(spec.declaration);
        state.next_state = state!(default);
        Ok(())
    } else {
        Err(state.expected(&["`;`", "`:=`"]))
    }
}

fn default(state: &mut ParserState) -> Result<(), BlockParserError> {
    let spec = state.require(state.context.object, "object")?;
    state.push_expression(state!(end), spec.expression);
    Ok(())
}

fn end(state: &mut ParserState) -> Result<(), BlockParserError> {
    let spec = state.require(state.context.object, "object")?;
    if !state.is_char(';') {
        return Err(state.expected(&["`;`"]));
    }
    state.emit(spec.end);
    state.pop(1)
}

/// Consume one token of a subtype indication, tracking parentheses in the
/// counter. Returns `false` without consuming for a token that ends the
/// indication at depth zero: `;`, `)`, `:=`, or `is`.
pub(super) fn subtype_indication(state: &mut ParserState) -> Result<bool, BlockParserError> {
    if state.absorb_trivia() {
        return Ok(true);
    }
    let depth = state.counter;
    match state.kind() {
        TokenKind::EndOfDocument => return Err(state.expected(&["`;`"])),
        TokenKind::Character('(') => state.counter += 1,
        TokenKind::Character(')') if depth > 0 => state.counter -= 1,
        TokenKind::Character(')') | TokenKind::Character(';') if depth == 0 => return Ok(false),
        TokenKind::Character(';') => {
            return Err(state.unexpected(format!(
                "Expected `)` before {}.",
                state.current()
            )))
        }
        TokenKind::FusedCharacter(Fused::VarAssign) if depth == 0 => return Ok(false),
        TokenKind::Word if depth == 0 && state.is_keyword(Kw::Is) => return Ok(false),
        TokenKind::Word => state.classify_word(),
        _ => (),
    }
    state.content = true;
    Ok(true)
}
