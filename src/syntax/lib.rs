// Copyright (c) 2016-2021 Fabian Schuiki

//! A streaming front end for VHDL source files as per IEEE 1076-2008.
//!
//! Source text is converted into a linked stream of tokens by the `lexer`,
//! which the `blocks` parser reduces into a linked stream of blocks. The
//! `groups` reducer finally coalesces blocks that were split by comments or
//! line breaks.

#[macro_use]
extern crate log;

pub mod blocks;
pub mod groups;
pub mod lexer;

pub use crate::blocks::{
    parse_blocks, parse_stream, Block, BlockId, BlockKind, BlockParser, BlockParserError,
    BlockStream, Document, NameMismatch, ParserOptions,
};
pub use crate::groups::{group_blocks, Group, GroupError, GroupId, GroupReducer, GroupStream};
pub use crate::lexer::{tokenize, Token, TokenId, TokenKind, TokenStream, TokenizerError};
