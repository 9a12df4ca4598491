// Copyright (c) 2016-2021 Fabian Schuiki

//! End blocks, in the forms `end;`, `end KEYWORD;`, `end NAME;` and
//! `end KEYWORD NAME;`.

use super::error::BlockParserError;
use super::state::{kw, ParserState};
use super::BlockKind;
use crate::lexer::{Kw, TokenKind};

/// How a construct ends.
pub(crate) struct EndSpec {
    pub kind: BlockKind,
    pub keyword: Kw,
    /// A keyword that must follow the first one, as in `end package body`.
    pub second: Option<Kw>,
    /// Whether the keyword must be given, as for `end if`.
    pub keyword_required: bool,
}

/// Parse an end block starting at the current `end` keyword, then return
/// from the construct.
pub(super) fn enter(state: &mut ParserState) {
    state.end_name = None;
    state.next_state = state!(start);
    state.reissue = true;
}

fn start(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_keyword(Kw::End) {
        return Err(state.expected(&[kw(Kw::End)]));
    }
    state.classify_word();
    state.next_state = state!(after_end);
    Ok(())
}

fn after_end(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    let spec = state.require(state.context.end, "end")?;
    if state.is_keyword(spec.keyword) {
        state.classify_word();
        state.next_state = match spec.second {
            Some(_) => state!(after_first_keyword),
            None => state!(after_keyword),
        };
        return Ok(());
    }
    if !spec.keyword_required {
        if state.is_char(';') {
            return finish(state);
        }
        if is_end_name(state) {
            return name(state);
        }
        return Err(state.expected(&[
            "`;`".to_string(),
            kw(spec.keyword),
            "a name".to_string(),
        ]));
    }
    Err(state.expected(&[kw(spec.keyword)]))
}

fn after_first_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    let spec = state.require(state.context.end, "end")?;
    match spec.second {
        Some(second) if state.is_keyword(second) => {
            state.classify_word();
            state.next_state = state!(after_keyword);
            Ok(())
        }
        Some(second) => Err(state.expected(&[kw(second)])),
        None => Err(state.bug("second end keyword without table entry")),
    }
}

fn after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if state.is_char(';') {
        return finish(state);
    }
    if is_end_name(state) {
        return name(state);
    }
    Err(state.expected(&["`;`", "a name"]))
}

/// Operator functions are named by a string literal.
fn is_end_name(state: &ParserState) -> bool {
    state.is_name() || state.kind() == TokenKind::StringLiteral
}

fn name(state: &mut ParserState) -> Result<(), BlockParserError> {
    state.end_name = Some(state.token);
    if state.kind() == TokenKind::Word {
        state.reclassify(TokenKind::Identifier);
    }
    state.next_state = state!(after_name);
    Ok(())
}

fn after_name(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if state.is_char(';') {
        return finish(state);
    }
    Err(state.expected(&["`;`"]))
}

fn finish(state: &mut ParserState) -> Result<(), BlockParserError> {
    let spec = state.require(state.context.end, "end")?;
    state.emit(spec.kind);
    state.close_name()?;
    state.pop(1)
}
