// Copyright (c) 2016-2020 Fabian Schuiki

//! An append-only arena of linked tokens.

use crate::lexer::token::{Token, TokenId, TokenKind};
use crate::lexer::tokenizer::{Tokenizer, TokenizerError};
use serde::Serialize;
use std::ops::Index;

/// A doubly-linked sequence of tokens, stored in allocation order.
///
/// Tokens are linked as they are pushed: the new token points back at its
/// predecessor, and the predecessor is updated to point forward at the new
/// token. Once a successor has been pushed, a token never changes again except
/// for reclassification of its kind.
#[derive(Clone, Default, Debug, Serialize)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> TokenStream {
        TokenStream { tokens: Vec::new() }
    }

    /// Tokenize an entire source text.
    pub fn from_source(source: &str) -> Result<TokenStream, TokenizerError> {
        let mut stream = TokenStream::new();
        for token in Tokenizer::new(source.chars()) {
            stream.push(token?);
        }
        Ok(stream)
    }

    /// Append a token and link it to its predecessor.
    pub fn push(&mut self, mut token: Token) -> TokenId {
        let id = TokenId(self.tokens.len() as u32);
        token.next = None;
        token.previous = match self.tokens.last_mut() {
            Some(last) => {
                last.next = Some(id);
                Some(id.prev())
            }
            None => None,
        };
        self.tokens.push(token);
        id
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The head of the stream, normally `StartOfDocument`.
    pub fn first(&self) -> Option<TokenId> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(TokenId(0))
        }
    }

    /// The tail of the stream, `EndOfDocument` once fully materialized.
    pub fn last(&self) -> Option<TokenId> {
        self.tokens.len().checked_sub(1).map(|i| TokenId(i as u32))
    }

    pub fn iter(&self) -> std::slice::Iter<Token> {
        self.tokens.iter()
    }

    /// The ids of all tokens, in stream order.
    pub fn ids(&self) -> impl Iterator<Item = TokenId> + DoubleEndedIterator {
        (0..self.tokens.len() as u32).map(TokenId)
    }

    /// The concatenated source text of the tokens `start..=end`.
    pub fn text(&self, start: TokenId, end: TokenId) -> String {
        if start > end {
            return String::new();
        }
        let end = std::cmp::min(end.index() + 1, self.tokens.len());
        self.tokens[start.index()..end]
            .iter()
            .map(|t| t.value.as_str())
            .collect()
    }

    /// The concatenated text of every token, which reproduces the input.
    pub fn source_text(&self) -> String {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }

    /// Change the kind of a token, keeping its text, position and links.
    pub(crate) fn reclassify(&mut self, id: TokenId, kind: TokenKind) {
        if let Some(token) = self.tokens.get_mut(id.index()) {
            token.kind = kind;
        }
    }

    /// Check the link invariants: a unique head without predecessor, a unique
    /// tail without successor, and mutual links between neighbours.
    pub fn verify_links(&self) -> bool {
        let n = self.tokens.len();
        self.tokens.iter().enumerate().all(|(i, token)| {
            let previous = if i == 0 {
                None
            } else {
                Some(TokenId(i as u32 - 1))
            };
            let next = if i + 1 == n {
                None
            } else {
                Some(TokenId(i as u32 + 1))
            };
            token.previous == previous && token.next == next
        })
    }
}

impl Index<TokenId> for TokenStream {
    type Output = Token;

    fn index(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
