// Copyright (c) 2016-2021 Fabian Schuiki

//! A streaming VHDL front end that keeps every character of its input.
//!
//! The source text is tokenized, the tokens are reduced into blocks by a set
//! of state machines, and blocks that were split by comments or line breaks
//! are finally coalesced into groups. Each stage is available lazily as an
//! iterator, or in one go through `parse_document`.

#[macro_use]
extern crate log;

// Re-export everything from the subcrates.
pub use vhdl_blocks_common as common;
pub use vhdl_blocks_syntax as syntax;
pub use crate::syntax::*;

use crate::common::errors::DiagBuilder2;

/// An error of any stage of the front end.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Blocks(#[from] BlockParserError),
    #[error(transparent)]
    Groups(#[from] GroupError),
}

impl From<&Error> for DiagBuilder2 {
    fn from(err: &Error) -> DiagBuilder2 {
        match err {
            Error::Blocks(e) => e.into(),
            Error::Groups(e) => e.into(),
        }
    }
}

/// Tokenize, parse and group a source text.
pub fn parse_document(
    source: &str,
    options: ParserOptions,
) -> Result<(Document, GroupStream), Error> {
    let doc = parse_blocks(tokenize(source), options)?;
    let groups = doc.groups()?;
    debug!(
        "parsed {} tokens into {} blocks and {} groups",
        doc.tokens.len(),
        doc.blocks.len(),
        groups.len()
    );
    Ok((doc, groups))
}
