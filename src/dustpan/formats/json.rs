//! JSON output

use super::registry::{FormatError, Formatter};
use super::report::Report;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, report: &Report<'_>) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&report.view())
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Report document with typed sections"
    }
}
