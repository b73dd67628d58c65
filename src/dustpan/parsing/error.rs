use thiserror::Error;

use crate::dustpan::lexing::ScanError;

/// Structural problems that make a whole document unusable.
#[derive(Debug, Clone, Error)]
pub enum GrammarError {
    #[error("expected '@' before the section name")]
    NoSectionNamePrefix,
    #[error("expected ':' after the section name")]
    NoSectionNameSuffix,
    #[error("the section name is empty")]
    SectionNameIsEmpty,
    #[error("section '{0}' appears more than once")]
    DuplicateSectionName(String),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// A document-fatal error, located by file and line.
#[derive(Debug, Clone, Error)]
#[error("{filename}:{line}: {cause}")]
pub struct ParseError {
    pub filename: String,
    pub line: usize,
    #[source]
    pub cause: GrammarError,
}

impl ParseError {
    pub fn new(filename: impl Into<String>, line: usize, cause: impl Into<GrammarError>) -> Self {
        Self {
            filename: filename.into(),
            line,
            cause: cause.into(),
        }
    }
}
