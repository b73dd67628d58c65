//! Document grammar
//!
//! Turns a note file into a [`Document`](crate::dustpan::ast::Document):
//!
//! ```text
//! @title: Buy a new kettle
//! @description: The old one leaks,
//! and whistles off-key.
//!
//! Budget is flexible.
//! ```
//!
//! A line whose first non-blank character is `@` (or `＠`) opens a section;
//! the name runs up to the first `:` (or `：`), anything after it on the same
//! line is the first body line.

pub mod error;
pub mod parser;

pub use error::{GrammarError, ParseError};
pub use parser::{parse_document, parse_str, Parser};
