//! In-memory model of a parsed note
//!
//! A [`Document`] owns named [`Section`]s, each holding the [`Paragraph`]s
//! of its body. The parser only fills in text and line numbers; the typed
//! fields (`time`, `number`, `expired`, per-paragraph log dates) are written
//! later by the column projection.

pub mod document;
pub mod paragraph;
pub mod section;
pub mod section_map;

pub use document::Document;
pub use paragraph::{Paragraph, TextLine};
pub use section::Section;
pub use section_map::{DuplicatePolicy, Insertion, SectionMap};
