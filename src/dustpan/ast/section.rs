//! Section element definition

use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use std::fmt;

use super::paragraph::Paragraph;
use crate::dustpan::columns::ValueError;

/// A named field of a document: its paragraphs plus the typed values the
/// column projection derived from them.
///
/// `time`, `number` and `expired` stay unset unless the section's column
/// type asks for them.
#[derive(Debug, Clone)]
pub struct Section {
    /// Line number of the header line.
    pub line: usize,
    paragraphs: Vec<Paragraph>,
    peek: OnceCell<String>,
    pub error: Option<ValueError>,
    pub expired: bool,
    pub time: Option<NaiveDate>,
    pub number: Option<i64>,
}

impl Section {
    pub fn new(line: usize, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            line,
            paragraphs,
            peek: OnceCell::new(),
            error: None,
            expired: false,
            time: None,
            number: None,
        }
    }

    /// A section holding a single line that does not come from any source line.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(0, vec![Paragraph::from_line(text, 0)])
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Mutable access to the paragraphs; drops the cached peek value.
    pub fn paragraphs_mut(&mut self) -> &mut Vec<Paragraph> {
        self.peek.take();
        &mut self.paragraphs
    }

    /// First line of the first paragraph, or `""` for an empty section.
    ///
    /// Computed on first use and cached.
    pub fn peek_str(&self) -> &str {
        self.peek.get_or_init(|| {
            self.paragraphs
                .first()
                .and_then(Paragraph::first_line)
                .map(|line| line.text.clone())
                .unwrap_or_default()
        })
    }

    pub fn peek_bytes(&self) -> &[u8] {
        self.peek_str().as_bytes()
    }

    /// The whole body: lines joined by `\n`, paragraphs by a blank line.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

// The peek cache is derived state and takes no part in equality.
impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
            && self.paragraphs == other.paragraphs
            && self.error == other.error
            && self.expired == other.expired
            && self.time == other.time
            && self.number == other.number
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Section({:?}, {} paragraphs)", self.peek_str(), self.paragraphs.len())
    }
}
