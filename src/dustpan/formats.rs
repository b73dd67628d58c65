//! Report output formats
//!
//! - `csv`: one quoted record per document
//! - `json`: title, timestamp and typed sections per document
//! - `yaml`: the JSON model as YAML
//!
//! Formats are looked up by name through [`FormatRegistry`].

pub mod csv;
pub mod json;
pub mod output;
pub mod registry;
pub mod report;
pub mod yaml;

pub use self::csv::{to_csv_string, CsvFormatter};
pub use self::json::JsonFormatter;
pub use self::yaml::YamlFormatter;
pub use output::{write_atomic, write_report};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use report::{Report, ReportView, DEFAULT_TITLE};
