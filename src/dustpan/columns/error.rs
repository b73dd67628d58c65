use std::num::ParseIntError;
use thiserror::Error;

use crate::dustpan::dates::DateError;

/// Why a typed column could not read its value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("more than one value")]
    MultipleValue,
    #[error("not an integer: {0}")]
    Number(#[from] ParseIntError),
    #[error(transparent)]
    Date(#[from] DateError),
}

/// A field-local error. It is attached to the section or paragraph it
/// concerns and never invalidates the rest of the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{filename}:{line}: {cause}")]
pub struct ValueError {
    pub filename: String,
    pub line: usize,
    #[source]
    pub cause: FieldError,
}

impl ValueError {
    pub fn new(filename: impl Into<String>, line: usize, cause: impl Into<FieldError>) -> Self {
        Self {
            filename: filename.into(),
            line,
            cause: cause.into(),
        }
    }
}
