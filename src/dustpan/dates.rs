//! Calendar date grammar
//!
//! Accepts the half- and full-width spellings found in hand-written notes
//! (`2019/11/13`, `２０１９－１１－１３`, `2019年11月13日`, ...) and the
//! "log" form, where the date closes a line inside parentheses.

pub mod error;
pub mod grammar;
pub mod separators;

pub use error::DateError;
pub use grammar::{calendar_date, parse_date, parse_log_date, LogDate, ParsedDate};
pub use separators::SeparatorClass;
