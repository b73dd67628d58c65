//! Paragraph element definition

use chrono::NaiveDate;
use std::fmt;

use crate::dustpan::columns::ValueError;

/// One trimmed source line and the line number it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub line: usize,
}

impl TextLine {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for TextLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A blank-line-delimited run of lines inside a section.
///
/// The log fields (`time`, `suffix`) are only filled in by the log column
/// projection, which also rewrites the last line to drop its date.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub line: usize,
    pub lines: Vec<TextLine>,
    pub error: Option<ValueError>,
    pub time: Option<NaiveDate>,
    pub suffix: Option<String>,
}

impl Paragraph {
    /// Build a paragraph from its lines; its line number is that of the first line.
    pub fn new(lines: Vec<TextLine>) -> Self {
        let line = lines.first().map_or(0, |l| l.line);
        Self {
            line,
            lines,
            error: None,
            time: None,
            suffix: None,
        }
    }

    pub fn from_line(text: impl Into<String>, line: usize) -> Self {
        Self::new(vec![TextLine::new(text, line)])
    }

    pub fn first_line(&self) -> Option<&TextLine> {
        self.lines.first()
    }

    pub fn last_line(&self) -> Option<&TextLine> {
        self.lines.last()
    }

    /// Lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(TextLine::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Paragraph({} lines)", self.lines.len())
    }
}
