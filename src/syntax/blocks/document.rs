// Copyright (c) 2016-2021 Fabian Schuiki

//! The top level of a design file.

use super::error::BlockParserError;
use super::region::region_trivia;
use super::state::ParserState;
use super::{architecture, entity, package, reference, BlockKind};
use crate::lexer::{Kw, TokenKind};

/// The first state. Expects the start-of-document token.
pub(super) fn start(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.kind() != TokenKind::StartOfDocument {
        return Err(state.expected(&["start of document"]));
    }
    state.emit(BlockKind::StartOfDocument);
    state.next_state = state!(region);
    Ok(())
}

/// Between design units and context clauses.
pub(super) fn region(state: &mut ParserState) -> Result<(), BlockParserError> {
    if region_trivia(state) {
        return Ok(());
    }
    if state.kind() == TokenKind::EndOfDocument {
        if state.depth() != 0 {
            return Err(state.bug("end of document inside a construct"));
        }
        state.emit(BlockKind::EndOfDocument);
        state.done = true;
        debug!("reached end of document");
        return Ok(());
    }
    state.label = None;
    match state.keyword() {
        Some(Kw::Library) => reference::enter(state, &reference::LIBRARY),
        Some(Kw::Use) => reference::enter(state, &reference::USE),
        Some(Kw::Context) => reference::enter(state, &reference::CONTEXT),
        Some(Kw::Entity) => entity::enter(state),
        Some(Kw::Architecture) => architecture::enter(state),
        Some(Kw::Package) => package::enter(state),
        Some(Kw::Configuration) => return Err(state.not_implemented("configuration declaration")),
        _ => {
            return Err(state.expected(&[
                "LIBRARY",
                "USE",
                "CONTEXT",
                "ENTITY",
                "ARCHITECTURE",
                "PACKAGE",
                "end of document",
            ]))
        }
    }
    Ok(())
}
