//! Typed columns
//!
//! A column declaration names a section and says how to read it. The
//! projection turns section text into typed values, the ordering sorts
//! documents by those values.

pub mod error;
pub mod ordering;
pub mod projection;
pub mod spec;

pub use error::{FieldError, ValueError};
pub use ordering::{compare, sort_documents, SortOrder};
pub use projection::{project, project_all};
pub use spec::{ColumnSpec, ColumnType, SortKey, UnknownColumnType};
