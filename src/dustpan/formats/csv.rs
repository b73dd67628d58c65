//! CSV output
//!
//! One record per document and one field per declared column, every field
//! quoted. A field holds the section's whole body: lines joined with `\n`,
//! paragraphs with a blank line. Missing sections are empty fields.

use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use super::registry::{FormatError, Formatter};
use super::report::Report;

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn name(&self) -> &str {
        "csv"
    }

    fn serialize(&self, report: &Report<'_>) -> Result<String, FormatError> {
        to_csv_string(report)
    }

    fn description(&self) -> &str {
        "One quoted record per document, one field per column"
    }
}

pub fn to_csv_string(report: &Report<'_>) -> Result<String, FormatError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if report.heading {
        writer
            .write_record(report.columns.iter().map(|c| c.name.as_str()))
            .map_err(serialization_error)?;
    }
    for doc in report.documents {
        let record = report.columns.iter().map(|column| {
            doc.section(&column.name)
                .map(|section| section.text())
                .unwrap_or_default()
        });
        writer.write_record(record).map_err(serialization_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormatError::SerializationError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FormatError::SerializationError(e.to_string()))
}

fn serialization_error(err: ::csv::Error) -> FormatError {
    FormatError::SerializationError(err.to_string())
}
