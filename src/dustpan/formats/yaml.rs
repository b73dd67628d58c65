//! YAML output, the same view as the JSON report

use super::registry::{FormatError, Formatter};
use super::report::Report;

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, report: &Report<'_>) -> Result<String, FormatError> {
        serde_yaml::to_string(&report.view())
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "The JSON report as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dustpan::columns::{ColumnSpec, ColumnType};
    use crate::dustpan::parsing::parse_str;
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_matches_json_model() {
        let docs = vec![parse_str("a.txt", "@title: kettle\n").unwrap()];
        let columns = vec![ColumnSpec::new("title", ColumnType::Text)];
        let now = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let report = Report::new(&docs, &columns, now);

        let out = YamlFormatter.serialize(&report).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(value["title"].as_str(), Some("Dustpan HTML"));
        assert_eq!(
            value["documents"][0]["sections"]["title"].as_str(),
            Some("kettle")
        );
    }
}
