// Copyright (c) 2017 Fabian Schuiki

use crate::lexer::categorizer::{Categorizer, Category, Char};
use crate::lexer::token::*;
use thiserror::Error;
use vhdl_blocks_common::errors::DiagBuilder2;
use vhdl_blocks_common::lookahead::Lookahead;
use vhdl_blocks_common::source::SourcePosition;

/// An error that aborts tokenization.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum TokenizerError {
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: SourcePosition },
    #[error("unterminated extended identifier starting at {position}")]
    UnterminatedExtendedIdentifier { position: SourcePosition },
    #[error("unterminated multi-line comment starting at {position}")]
    UnterminatedComment { position: SourcePosition },
    #[error("based literal starting at {position} lacks its closing `#`")]
    UnterminatedBasedLiteral { position: SourcePosition },
    #[error("`{text}` at {position} is not a valid operator")]
    InvalidOperator {
        text: String,
        position: SourcePosition,
    },
    #[error("character `{character}` at {position} is not allowed in VHDL source text")]
    IllegalCharacter {
        character: char,
        position: SourcePosition,
    },
}

impl TokenizerError {
    /// The position of the offending input.
    pub fn position(&self) -> SourcePosition {
        match *self {
            TokenizerError::UnterminatedString { position }
            | TokenizerError::UnterminatedExtendedIdentifier { position }
            | TokenizerError::UnterminatedComment { position }
            | TokenizerError::UnterminatedBasedLiteral { position }
            | TokenizerError::InvalidOperator { position, .. }
            | TokenizerError::IllegalCharacter { position, .. } => position,
        }
    }
}

impl From<&TokenizerError> for DiagBuilder2 {
    fn from(err: &TokenizerError) -> DiagBuilder2 {
        let diag = DiagBuilder2::error(format!("{}", err)).span(err.position());
        match *err {
            TokenizerError::UnterminatedString { .. } => diag.add_note(
                "Use string concatenation (e.g. \"abc\" & \"def\") to break strings across lines",
            ),
            TokenizerError::InvalidOperator { .. } => {
                diag.add_note("Valid matching operators are ?=, ?/=, ?<, ?<=, ?>, ?>=")
            }
            _ => diag,
        }
    }
}

/// An iterator that combines categorized characters into lexical tokens.
///
/// The first token is always `StartOfDocument`, the last one always
/// `EndOfDocument`. Every input character ends up in exactly one token. After
/// an error the iterator is exhausted.
pub struct Tokenizer<T: Iterator<Item = char>> {
    inner: Lookahead<Categorizer<T>>,
    started: bool,
    finished: bool,
    /// Kind of the last emitted token.
    last: TokenKind,
    /// Whether the last emitted token can be followed by an attribute tick.
    last_is_name: bool,
}

/// The text and extent of a token under construction.
struct Scan {
    value: String,
    start: SourcePosition,
    end: SourcePosition,
}

impl Scan {
    fn new(c: Char) -> Scan {
        let mut value = String::new();
        value.push(c.value);
        Scan {
            value,
            start: c.position,
            end: c.position,
        }
    }

    fn push(&mut self, c: Char) {
        self.value.push(c.value);
        self.end = c.position;
    }

    fn finish(self, kind: TokenKind) -> Token {
        Token::new(kind, self.value, self.start, self.end)
    }
}

impl<T> Tokenizer<T>
where
    T: Iterator<Item = char>,
{
    /// Create a new tokenizer.
    pub fn new(chars: T) -> Tokenizer<T> {
        Tokenizer {
            inner: Lookahead::new(Categorizer::new(chars)),
            started: false,
            finished: false,
            last: TokenKind::StartOfDocument,
            last_is_name: false,
        }
    }

    fn peek(&mut self, offset: usize) -> Option<char> {
        self.inner.lookahead(offset).map(|c| c.value)
    }

    fn peek_is(&mut self, offset: usize, category: Category) -> bool {
        self.inner.lookahead(offset).map(|c| c.category) == Some(category)
    }

    /// Consume the next character into the scan.
    fn bump(&mut self, scan: &mut Scan) {
        if let Some(c) = self.inner.next() {
            scan.push(c);
        }
    }

    /// Consume characters into the scan as long as they satisfy `f`.
    fn bump_while<F: Fn(&Char) -> bool>(&mut self, scan: &mut Scan, f: F) {
        while let Some(c) = self.inner.lookahead(0).copied() {
            if !f(&c) {
                break;
            }
            self.inner.next();
            scan.push(c);
        }
    }

    /// Scan the remainder of a string literal whose opening quote is already
    /// part of the scan. Doubled quotes stand for a single quote.
    fn scan_string_body(&mut self, scan: &mut Scan, start: SourcePosition) -> Result<(), TokenizerError> {
        loop {
            match self.inner.next() {
                None => return Err(TokenizerError::UnterminatedString { position: start }),
                Some(Char {
                    category: Category::Linebreak,
                    ..
                }) => return Err(TokenizerError::UnterminatedString { position: start }),
                Some(c) if c.value == '"' => {
                    scan.push(c);
                    if self.peek(0) == Some('"') {
                        self.bump(scan);
                    } else {
                        return Ok(());
                    }
                }
                Some(c) => scan.push(c),
            }
        }
    }

    /// Consume an exponent such as `E6`, `e-12`, or `E+3` if one follows.
    fn try_exponent(&mut self, scan: &mut Scan) {
        match self.peek(0) {
            Some('e') | Some('E') => (),
            _ => return,
        }
        let digits_at = match self.peek(1) {
            Some('+') | Some('-') => 2,
            _ => 1,
        };
        if !self.peek_is(digits_at, Category::Digit) {
            return;
        }
        for _ in 0..digits_at {
            self.bump(scan);
        }
        self.bump_while(scan, |c| c.category == Category::Digit || c.value == '_');
    }

    /// Check whether a bit string base of `len` letters starts at `offset` and
    /// is directly followed by a string.
    fn bit_string_base_at(&mut self, offset: usize, len: usize) -> bool {
        if self.peek(offset + len) != Some('"') {
            return false;
        }
        let mut base = String::new();
        for i in 0..len {
            match self.peek(offset + i) {
                Some(c) => base.push(c),
                None => return false,
            }
        }
        is_bit_string_base(&base)
    }

    /// Scan an abstract literal or a sized bit string literal.
    fn scan_number(&mut self, mut scan: Scan) -> Result<Token, TokenizerError> {
        self.bump_while(&mut scan, |c| {
            c.category == Category::Digit || c.value == '_'
        });

        // Based literals, e.g. `16#FF#` or `2#1.01#E3`.
        if self.peek(0) == Some('#') {
            let start = scan.start;
            self.bump(&mut scan);
            let based = |c: &Char| {
                c.category == Category::Digit || c.category == Category::Letter || c.value == '_'
            };
            self.bump_while(&mut scan, based);
            let mut real = false;
            if self.peek(0) == Some('.') {
                real = true;
                self.bump(&mut scan);
                self.bump_while(&mut scan, based);
            }
            if self.peek(0) != Some('#') {
                return Err(TokenizerError::UnterminatedBasedLiteral { position: start });
            }
            self.bump(&mut scan);
            self.try_exponent(&mut scan);
            return Ok(scan.finish(if real {
                TokenKind::RealLiteral
            } else {
                TokenKind::IntegerLiteral
            }));
        }

        // Real literals, e.g. `3.14`.
        if self.peek(0) == Some('.') && self.peek_is(1, Category::Digit) {
            self.bump(&mut scan);
            self.bump_while(&mut scan, |c| {
                c.category == Category::Digit || c.value == '_'
            });
            self.try_exponent(&mut scan);
            return Ok(scan.finish(TokenKind::RealLiteral));
        }

        // Sized bit string literals, e.g. `12UX"F-"`.
        for len in 1..=2 {
            if self.bit_string_base_at(0, len) {
                for _ in 0..len {
                    self.bump(&mut scan);
                }
                let start = scan.start;
                self.bump(&mut scan);
                self.scan_string_body(&mut scan, start)?;
                return Ok(scan.finish(TokenKind::BitStringLiteral));
            }
        }

        self.try_exponent(&mut scan);
        Ok(scan.finish(TokenKind::IntegerLiteral))
    }

    /// Scan a symbol. `c` is the first character, already part of `scan`.
    fn scan_symbol(&mut self, mut scan: Scan, c: Char) -> Result<Token, TokenizerError> {
        let c0 = c.value;

        // Try to parse a three-character symbol.
        if let (Some(c1), Some(c2)) = (self.peek(0), self.peek(1)) {
            if let Some(f) = find_fused3(c0, c1, c2) {
                self.bump(&mut scan);
                self.bump(&mut scan);
                return Ok(scan.finish(TokenKind::FusedCharacter(f)));
            }
        }

        // A `?/` that is not completed to `?/=` is malformed.
        if c0 == '?' && self.peek(0) == Some('/') {
            self.bump(&mut scan);
            return Err(TokenizerError::InvalidOperator {
                text: scan.value,
                position: scan.start,
            });
        }

        // Try to parse a two-character symbol.
        if let Some(c1) = self.peek(0) {
            if let Some(f) = find_fused2(c0, c1) {
                self.bump(&mut scan);
                return Ok(scan.finish(TokenKind::FusedCharacter(f)));
            }
        }

        // Try to parse a one-character symbol.
        if is_single_character(c0) {
            return Ok(scan.finish(TokenKind::Character(c0)));
        }

        // If we get here, we found something which is allowed in VHDL source
        // text, but is not a valid symbol on its own.
        Err(TokenizerError::IllegalCharacter {
            character: c0,
            position: c.position,
        })
    }

    /// Scan the token starting with character `c`.
    fn scan(&mut self, c: Char) -> Result<Token, TokenizerError> {
        let mut scan = Scan::new(c);
        match (c.value, c.category) {
            // Line breaks.
            ('\r', _) => {
                if self.peek(0) == Some('\n') {
                    self.bump(&mut scan);
                }
                Ok(scan.finish(TokenKind::Linebreak))
            }
            (_, Category::Linebreak) => Ok(scan.finish(TokenKind::Linebreak)),

            // Runs of spaces. Directly after a line break they indent the
            // following line.
            (_, Category::Space) => {
                self.bump_while(&mut scan, |c| c.category == Category::Space);
                Ok(scan.finish(match self.last {
                    TokenKind::Linebreak | TokenKind::SingleLineComment => TokenKind::Indentation,
                    _ => TokenKind::Space,
                }))
            }

            // Words, and bit string literals such as `X"FF"`.
            (_, Category::Letter) => {
                self.bump_while(&mut scan, |c| {
                    c.category == Category::Letter
                        || c.category == Category::Digit
                        || c.value == '_'
                });
                if self.peek(0) == Some('"') && is_bit_string_base(&scan.value) {
                    let start = scan.start;
                    self.bump(&mut scan);
                    self.scan_string_body(&mut scan, start)?;
                    return Ok(scan.finish(TokenKind::BitStringLiteral));
                }
                Ok(scan.finish(TokenKind::Word))
            }

            (_, Category::Digit) => self.scan_number(scan),

            // Real literals with an implicit leading zero, e.g. `.5`.
            ('.', _) if self.peek_is(0, Category::Digit) => {
                self.bump_while(&mut scan, |c| {
                    c.category == Category::Digit || c.value == '_'
                });
                self.try_exponent(&mut scan);
                Ok(scan.finish(TokenKind::RealLiteral))
            }

            // Single-line comments, including the line break that ends them.
            ('-', _) if self.peek(0) == Some('-') => {
                self.bump_while(&mut scan, |c| c.category != Category::Linebreak);
                match self.peek(0) {
                    Some('\r') => {
                        self.bump(&mut scan);
                        if self.peek(0) == Some('\n') {
                            self.bump(&mut scan);
                        }
                    }
                    Some('\n') => self.bump(&mut scan),
                    _ => (),
                }
                Ok(scan.finish(TokenKind::SingleLineComment))
            }

            // Multi-line comments. These do not nest.
            ('/', _) if self.peek(0) == Some('*') => {
                self.bump(&mut scan);
                loop {
                    match self.inner.next() {
                        None => {
                            return Err(TokenizerError::UnterminatedComment {
                                position: scan.start,
                            })
                        }
                        Some(d) => {
                            scan.push(d);
                            if d.value == '*' && self.peek(0) == Some('/') {
                                self.bump(&mut scan);
                                break;
                            }
                        }
                    }
                }
                Ok(scan.finish(TokenKind::MultiLineComment))
            }

            ('"', _) => {
                let start = scan.start;
                self.scan_string_body(&mut scan, start)?;
                Ok(scan.finish(TokenKind::StringLiteral))
            }

            // Character literals, unless the apostrophe follows a name, in
            // which case it introduces an attribute.
            ('\'', _) => {
                let is_literal = !self.last_is_name
                    && self.peek(1) == Some('\'')
                    && !self.peek_is(0, Category::Linebreak)
                    && self.peek(0).is_some();
                if is_literal {
                    self.bump(&mut scan);
                    self.bump(&mut scan);
                    Ok(scan.finish(TokenKind::CharacterLiteral))
                } else {
                    Ok(scan.finish(TokenKind::Character('\'')))
                }
            }

            // Extended identifiers. Doubled backslashes stand for a single
            // backslash.
            ('\\', _) => loop {
                match self.inner.next() {
                    None
                    | Some(Char {
                        category: Category::Linebreak,
                        ..
                    }) => {
                        return Err(TokenizerError::UnterminatedExtendedIdentifier {
                            position: scan.start,
                        })
                    }
                    Some(d) if d.value == '\\' => {
                        scan.push(d);
                        if self.peek(0) == Some('\\') {
                            self.bump(&mut scan);
                        } else {
                            return Ok(scan.finish(TokenKind::ExtendedIdentifier));
                        }
                    }
                    Some(d) => scan.push(d),
                }
            },

            (_, Category::Special) => self.scan_symbol(scan, c),

            // Throw errors for invalid characters.
            (_, Category::Other) => Err(TokenizerError::IllegalCharacter {
                character: c.value,
                position: c.position,
            }),
        }
    }
}

impl<T> Iterator for Tokenizer<T>
where
    T: Iterator<Item = char>,
{
    type Item = Result<Token, TokenizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(Ok(Token::new(
                TokenKind::StartOfDocument,
                "",
                SourcePosition::START,
                SourcePosition::START,
            )));
        }
        let c = match self.inner.next() {
            Some(c) => c,
            None => {
                self.finished = true;
                let end = self.inner.inner().end_position();
                return Some(Ok(Token::new(TokenKind::EndOfDocument, "", end, end)));
            }
        };
        let result = self.scan(c);
        match result {
            Ok(ref token) => {
                self.last = token.kind;
                self.last_is_name = match token.kind {
                    TokenKind::Word => find_keyword(&token.value).is_none(),
                    TokenKind::ExtendedIdentifier
                    | TokenKind::Character(')')
                    | TokenKind::Character(']') => true,
                    _ => false,
                };
            }
            Err(_) => self.finished = true,
        }
        Some(result)
    }
}

/// Check whether `s` is a valid bit string literal base.
fn is_bit_string_base(s: &str) -> bool {
    match s.to_uppercase().as_str() {
        "B" | "O" | "X" | "D" | "UB" | "UO" | "UX" | "SB" | "SO" | "SX" => true,
        _ => false,
    }
}
