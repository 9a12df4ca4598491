// Copyright (c) 2016-2021 Fabian Schuiki

use crate::lexer::{Kw, Token, TokenId, TokenizerError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use vhdl_blocks_common::errors::DiagBuilder2;
use vhdl_blocks_common::source::SourcePosition;

/// An error that aborts block parsing.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum BlockParserError {
    #[error("{message}")]
    UnexpectedToken { token: Token, message: String },
    #[error("{what} is not implemented")]
    NotImplemented { token: Token, what: String },
    #[error("input ended before the end of the document in state {state}")]
    UnexpectedEnd { state: &'static str },
    #[error("{0}")]
    NameMismatch(NameMismatch),
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
    #[error("internal error in state {state}: {message}")]
    Bug {
        state: &'static str,
        message: String,
    },
}

impl BlockParserError {
    /// Check whether this error signals a recognized but unsupported
    /// construct, as opposed to malformed input.
    pub fn is_not_implemented(&self) -> bool {
        match self {
            BlockParserError::NotImplemented { .. } => true,
            _ => false,
        }
    }

    /// The offending token, if the error is attributed to one.
    pub fn token(&self) -> Option<&Token> {
        match self {
            BlockParserError::UnexpectedToken { token, .. }
            | BlockParserError::NotImplemented { token, .. } => Some(token),
            _ => None,
        }
    }

    /// The position of the offending input, if known.
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            BlockParserError::UnexpectedToken { token, .. }
            | BlockParserError::NotImplemented { token, .. } => Some(token.start),
            BlockParserError::NameMismatch(m) => Some(m.position),
            BlockParserError::Tokenizer(e) => Some(e.position()),
            _ => None,
        }
    }
}

impl From<&BlockParserError> for DiagBuilder2 {
    fn from(err: &BlockParserError) -> DiagBuilder2 {
        match err {
            BlockParserError::Tokenizer(e) => e.into(),
            BlockParserError::UnexpectedToken { token, .. } => {
                DiagBuilder2::error(format!("{}", err)).span(token.span())
            }
            BlockParserError::NotImplemented { token, .. } => {
                DiagBuilder2::error(format!("{}", err))
                    .span(token.span())
                    .add_note("This construct is recognized but not supported yet")
            }
            BlockParserError::NameMismatch(m) => m.into(),
            BlockParserError::UnexpectedEnd { .. } => DiagBuilder2::fatal(format!("{}", err)),
            BlockParserError::Bug { .. } => DiagBuilder2::bug(format!("{}", err)),
        }
    }
}

/// A trailing name in an end block that differs from the name of the
/// construct it closes.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct NameMismatch {
    /// The keyword of the construct, e.g. `entity`.
    pub keyword: Kw,
    /// The declared name, or `None` for an unlabeled statement.
    pub expected: Option<String>,
    pub found: String,
    pub token: TokenId,
    pub position: SourcePosition,
}

impl fmt::Display for NameMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.expected {
            Some(ref expected) => write!(
                f,
                "`{}` does not match the name `{}` of the {}",
                self.found, expected, self.keyword
            ),
            None => write!(f, "`{}` repeats a label the {} does not have", self.found, self.keyword),
        }
    }
}

impl From<&NameMismatch> for DiagBuilder2 {
    fn from(m: &NameMismatch) -> DiagBuilder2 {
        let diag = DiagBuilder2::warning(format!("{}", m)).span(m.position);
        match m.expected {
            Some(ref expected) => diag.add_note(format!("Use `{}` or omit the name", expected)),
            None => diag,
        }
    }
}
