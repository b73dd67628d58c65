//! Column and sort-key declarations

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a section's text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Raw text, compared by its first line.
    Text,
    /// A signed decimal integer.
    Number,
    /// A calendar date.
    Date,
    /// A date that is flagged as expired once it lies in the past.
    Deadline,
    /// Paragraphs each ending in a parenthesized date.
    Log,
    /// The document's file name without extension, when the section is absent.
    Filename,
}

impl ColumnType {
    pub const ALL: [ColumnType; 6] = [
        ColumnType::Text,
        ColumnType::Number,
        ColumnType::Date,
        ColumnType::Deadline,
        ColumnType::Log,
        ColumnType::Filename,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Deadline => "deadline",
            ColumnType::Log => "log",
            ColumnType::Filename => "filename",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column type '{0}'")]
pub struct UnknownColumnType(pub String);

impl FromStr for ColumnType {
    type Err = UnknownColumnType;

    /// Type names are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ColumnType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| UnknownColumnType(s.to_string()))
    }
}

/// A declared column: the section it reads and how to interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One level of the document ordering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SortKey {
    pub name: String,
    #[serde(default)]
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descending: false,
        }
    }

    pub fn descending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descending: true,
        }
    }
}
