// Copyright (c) 2016-2021 Fabian Schuiki

//! Source locations. Every token produced by the lexer is stamped with the
//! position of its first and last character, which keeps diagnostics lean and
//! allows them to be reported without access to the source text.

use serde::Serialize;
use std::fmt;

/// A position within a source text.
///
/// Lines and columns are 1-based, the offset is the 0-based byte offset into
/// the text. An offset of -1 marks a position that does not correspond to any
/// input character, e.g. for tokens synthesized from other tokens.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
    pub offset: i64,
}

impl SourcePosition {
    /// The position of the first character of a text.
    pub const START: SourcePosition = SourcePosition {
        line: 1,
        column: 1,
        offset: 0,
    };

    /// An unknown or synthetic position.
    pub const UNKNOWN: SourcePosition = SourcePosition {
        line: 0,
        column: 0,
        offset: -1,
    };

    pub fn new(line: u32, column: u32, offset: i64) -> SourcePosition {
        SourcePosition {
            line,
            column,
            offset,
        }
    }

    /// Check whether this position refers to an actual input character.
    pub fn is_known(self) -> bool {
        self.offset >= 0
    }

    /// Compute the position of the character following `c`, which is located
    /// at this position.
    pub fn advance(self, c: char) -> SourcePosition {
        let offset = self.offset + c.len_utf8() as i64;
        if c == '\n' {
            SourcePosition::new(self.line + 1, 1, offset)
        } else {
            SourcePosition::new(self.line, self.column + 1, offset)
        }
    }

    /// Compute the position following a lone carriage return, which the lexer
    /// treats as a line break of its own.
    pub fn advance_line(self) -> SourcePosition {
        SourcePosition::new(self.line + 1, 1, self.offset + 1)
    }
}

impl fmt::Debug for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}@{}", self.line, self.column, self.offset)
        } else {
            write!(f, "<unknown>")
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "<unknown>")
        }
    }
}

/// A range of source text, given by the positions of its first and last
/// character.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Span {
    pub begin: SourcePosition,
    pub end: SourcePosition,
}

impl Span {
    pub fn new(begin: SourcePosition, end: SourcePosition) -> Span {
        Span { begin, end }
    }

    /// Modify this span to also cover `other`.
    pub fn expand(&mut self, other: Span) -> &mut Self {
        if other.begin < self.begin {
            self.begin = other.begin;
        }
        if other.end > self.end {
            self.end = other.end;
        }
        self
    }
}

impl From<SourcePosition> for Span {
    fn from(pos: SourcePosition) -> Span {
        Span::new(pos, pos)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.begin == self.end {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}-{}", self.begin, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_lines_and_columns() {
        let p = SourcePosition::START.advance('a').advance('b');
        assert_eq!(p, SourcePosition::new(1, 3, 2));
        let p = p.advance('\n');
        assert_eq!(p, SourcePosition::new(2, 1, 3));
        let p = p.advance('ä');
        assert_eq!(p, SourcePosition::new(2, 2, 5));
    }

    #[test]
    fn unknown_positions() {
        assert!(!SourcePosition::UNKNOWN.is_known());
        assert_eq!(format!("{}", SourcePosition::UNKNOWN), "<unknown>");
        assert_eq!(format!("{}", SourcePosition::new(3, 7, 40)), "3:7");
    }

    #[test]
    fn span_expand() {
        let a = SourcePosition::new(1, 1, 0);
        let b = SourcePosition::new(1, 5, 4);
        let c = SourcePosition::new(2, 1, 9);
        let mut sp = Span::new(a, b);
        sp.expand(Span::from(c));
        assert_eq!(sp, Span::new(a, c));
        assert_eq!(format!("{}", sp), "1:1-2:1");
    }
}
