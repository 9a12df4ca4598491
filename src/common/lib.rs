// Copyright (c) 2016-2021 Fabian Schuiki

//! This crate contains the fundamental utilities used by the rest of the
//! vhdl-blocks parser.

pub mod errors;
pub mod lookahead;
pub mod source;
pub mod util;

pub use self::lookahead::Lookahead;
pub use self::source::SourcePosition;
