// Copyright (c) 2016-2018 Fabian Schuiki

//! Utilities to implement diagnostics and error reporting facilities.

use crate::source::Span;
use std::fmt;

/// A structured diagnostic message. The typed errors of the lexer and block
/// parser are converted into this form when they are reported to a human.
#[must_use]
#[derive(Clone, Debug)]
pub struct DiagBuilder2 {
    pub severity: Severity,
    pub message: String,
    pub segments: Vec<DiagSegment>,
}

#[derive(Clone, Debug)]
pub enum DiagSegment {
    Span(Span),
    Note(String),
}

impl DiagBuilder2 {
    pub fn new<S: Into<String>>(severity: Severity, message: S) -> DiagBuilder2 {
        DiagBuilder2 {
            severity: severity,
            message: message.into(),
            segments: Vec::new(),
        }
    }

    pub fn bug<S: Into<String>>(message: S) -> DiagBuilder2 {
        DiagBuilder2::new(Severity::Bug, message)
    }

    pub fn fatal<S: Into<String>>(message: S) -> DiagBuilder2 {
        DiagBuilder2::new(Severity::Fatal, message)
    }

    pub fn error<S: Into<String>>(message: S) -> DiagBuilder2 {
        DiagBuilder2::new(Severity::Error, message)
    }

    pub fn warning<S: Into<String>>(message: S) -> DiagBuilder2 {
        DiagBuilder2::new(Severity::Warning, message)
    }

    pub fn segment(self, segment: DiagSegment) -> DiagBuilder2 {
        let mut segments = self.segments;
        segments.push(segment);
        DiagBuilder2 {
            segments: segments,
            ..self
        }
    }

    pub fn span<S: Into<Span>>(self, span: S) -> DiagBuilder2 {
        self.segment(DiagSegment::Span(span.into()))
    }

    pub fn add_note<S: Into<String>>(self, message: S) -> DiagBuilder2 {
        self.segment(DiagSegment::Note(message.into()))
    }

    pub fn get_severity(&self) -> Severity {
        self.severity
    }

    pub fn get_message(&self) -> &String {
        &self.message
    }

    pub fn get_segments(&self) -> &[DiagSegment] {
        &self.segments
    }

    /// Render the diagnostic together with the offending lines of `content`,
    /// the text the diagnostic's spans refer to.
    pub fn render(&self, content: &str) -> String {
        let mut out = format!("{}", Header(self));
        let lines: Vec<&str> = content.lines().collect();
        for segment in &self.segments {
            match *segment {
                DiagSegment::Span(sp) => {
                    out.push_str(&format!("  --> {}\n", sp));
                    if !sp.begin.is_known() || sp.begin.line == 0 {
                        continue;
                    }
                    let text = match lines.get(sp.begin.line as usize - 1) {
                        Some(text) => text,
                        None => continue,
                    };
                    out.push_str("   | \n");
                    out.push_str(&format!("   | {}\n", text.replace('\t', "    ")));
                    let width = if sp.end.line == sp.begin.line && sp.end.column >= sp.begin.column
                    {
                        (sp.end.column - sp.begin.column + 1) as usize
                    } else {
                        1
                    };
                    let indent: usize = text
                        .chars()
                        .take(sp.begin.column as usize - 1)
                        .map(|c| if c == '\t' { 4 } else { 1 })
                        .sum();
                    out.push_str(&format!(
                        "   | {}{}\n",
                        " ".repeat(indent),
                        "^".repeat(width)
                    ));
                }
                DiagSegment::Note(ref message) => {
                    out.push_str(&format!("   = note: {}\n", message))
                }
            }
        }
        out
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
    Bug,
}

impl Severity {
    pub fn to_str(self) -> &'static str {
        match self {
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Bug => "parser bug",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

struct Header<'a>(&'a DiagBuilder2);

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}\n", self.0.get_severity(), self.0.get_message())
    }
}

impl fmt::Display for DiagBuilder2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", Header(self))?;
        for segment in &self.segments {
            match *segment {
                DiagSegment::Span(sp) => write!(f, "  --> {}\n", sp)?,
                DiagSegment::Note(ref message) => write!(f, "   = note: {}\n", message)?,
            }
        }

        if self.get_severity() == Severity::Bug {
            write!(f, "\nYou have encountered a parser bug. Sorry about that! We would appreciate if you open an issue [1] and describe how you triggered the bug, together with a minimal snippet of code to reproduce it. Thanks!\n")?;
            write!(f, "[1]: https://github.com/fabianschuiki/moore\n")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourcePosition;

    #[test]
    fn display_lists_segments() {
        let d = DiagBuilder2::error("Expected `;`")
            .span(SourcePosition::new(2, 5, 14))
            .add_note("the statement started here");
        assert_eq!(d.get_severity(), Severity::Error);
        assert_eq!(
            format!("{}", d),
            "error: Expected `;`\n  --> 2:5\n   = note: the statement started here\n"
        );
    }

    #[test]
    fn render_marks_the_span() {
        let d = DiagBuilder2::warning("Name mismatch").span(Span::new(
            SourcePosition::new(2, 12, 24),
            SourcePosition::new(2, 14, 26),
        ));
        let out = d.render("entity foo is\nend entity bar;\n");
        assert!(out.starts_with("warning: Name mismatch\n"));
        assert!(out.contains("   | end entity bar;\n"));
        assert!(out.contains("   |            ^^^\n"));
    }

    #[test]
    fn severities_are_ordered() {
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }
}
