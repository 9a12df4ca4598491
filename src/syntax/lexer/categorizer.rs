// Copyright (c) 2017 Fabian Schuiki

use vhdl_blocks_common::source::SourcePosition;

/// An iterator that categorizes characters into different groups as per the
/// VHDL language standard, and stamps each with its source position.
pub struct Categorizer<T> {
    inner: T,
    position: SourcePosition,
    pending_cr: bool,
}

impl<T> Categorizer<T>
where
    T: Iterator<Item = char>,
{
    /// Create a new categorizer.
    pub fn new(inner: T) -> Categorizer<T> {
        Categorizer {
            inner: inner,
            position: SourcePosition::START,
            pending_cr: false,
        }
    }
}

impl<T> Iterator for Categorizer<T>
where
    T: Iterator<Item = char>,
{
    type Item = Char;

    fn next(&mut self) -> Option<Char> {
        let c = self.inner.next()?;

        // A carriage return ends the line unless it is directly followed by a
        // line feed, in which case the line feed ends it.
        if self.pending_cr {
            self.pending_cr = false;
            if c != '\n' {
                self.position = self.position.advance_line();
            } else {
                self.position = self.position.advance('\r');
            }
        }
        let position = self.position;
        if c == '\r' {
            self.pending_cr = true;
        } else {
            self.position = position.advance(c);
        }

        let category = match c {
            '"' | '#' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | '-' | '.' | '/' | ':' | ';'
            | '<' | '=' | '>' | '?' | '@' | '[' | ']' | '_' | '`' | '|' | '\\' => {
                Category::Special
            }
            '\n' | '\r' => Category::Linebreak,
            c if c.is_alphabetic() => Category::Letter,
            c if c.is_digit(10) => Category::Digit,
            c if c.is_whitespace() => Category::Space,
            _ => Category::Other,
        };
        Some(Char {
            value: c,
            category,
            position,
        })
    }
}

impl<T> Categorizer<T> {
    /// The position directly after the last character produced so far.
    pub fn end_position(&self) -> SourcePosition {
        if self.pending_cr {
            self.position.advance_line()
        } else {
            self.position
        }
    }
}

/// A categorized character.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Char {
    pub value: char,
    pub category: Category,
    pub position: SourcePosition,
}

/// A character category. Special means the special characters as defined by the
/// VHDL standard to be meaningful syntactically.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    Letter,
    Digit,
    Special,
    Space,
    Linebreak,
    Other,
}
