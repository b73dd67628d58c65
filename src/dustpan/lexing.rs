//! Character- and line-level building blocks shared by the date and document grammars.
//!
//! - `glyphs` - predicates for the structural characters (half- and full-width)
//! - `digits` - ASCII / full-width decimal digit decoding
//! - `scanner` - line cursor with a single line of pushback

pub mod digits;
pub mod glyphs;
pub mod scanner;

pub use digits::{decode_digit, decode_digit_run, DigitRun};
pub use glyphs::{
    is_close_group, is_field_terminator, is_marker, is_open_group, is_space, normalize_spaces,
};
pub use scanner::{LineScanner, ScanError};
