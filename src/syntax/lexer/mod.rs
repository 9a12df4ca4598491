// Copyright (c) 2017 Fabian Schuiki

//! A VHDL lexer. This module implements lexical analysis of VHDL source files.
//! It converts a stream of input characters into a stream of tokens which,
//! unlike those of a conventional lexer, retain all whitespace, line breaks
//! and comments, such that the tokens cover the input exactly.

pub mod categorizer;
pub mod stream;
pub mod token;
pub mod tokenizer;

pub use self::stream::TokenStream;
pub use self::token::{Fused, Kw, Operator, Token, TokenId, TokenKind};
pub use self::tokenizer::{Tokenizer, TokenizerError};

use std::str::Chars;

/// A VHDL lexer over an in-memory source text.
pub struct Lexer<'a> {
    inner: Tokenizer<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            inner: Tokenizer::new(source.chars()),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, TokenizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Lazily tokenize a source text. Every call starts over from the beginning.
pub fn tokenize(source: &str) -> Lexer {
    Lexer::new(source)
}
