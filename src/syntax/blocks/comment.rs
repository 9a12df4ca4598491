// Copyright (c) 2016-2021 Fabian Schuiki

//! Comments, line breaks, and indentation inside a construct.

use super::error::BlockParserError;
use super::state::ParserState;

/// Entered by `ParserState::interrupt`. Emits blocks for comments, line
/// breaks and whitespace, and returns to the interrupted state with the first
/// other token.
pub(super) fn aside(state: &mut ParserState) -> Result<(), BlockParserError> {
    match state.trivia_kind() {
        Some(kind) => {
            state.emit_aside(kind);
            Ok(())
        }
        None => {
            state.pop(1)?;
            state.reissue = true;
            Ok(())
        }
    }
}
