//! What gets rendered: the ordered documents plus presentation options
//!
//! The structured formats (`json`, `yaml`) share one serializable view:
//!
//! ```text
//! {"title": "...", "lastupdate": {"year", "month", "day", "hour", "min", "sec"},
//!  "documents": [{"filename": "...", "sections": {"<name>": <section>, ...}}]}
//! ```
//!
//! A section with exactly one line, no date and no error renders as a plain
//! string. Anything else is an object: dated sections carry `date`, the rest
//! carry `value` (a list of paragraphs), and errors add `error`.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::dustpan::ast::{Document, Paragraph, Section};
use crate::dustpan::columns::ColumnSpec;
use crate::dustpan::pipeline::Settings;

pub const DEFAULT_TITLE: &str = "Dustpan HTML";

/// Documents to render and how to present them.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub documents: &'a [Document],
    pub columns: &'a [ColumnSpec],
    pub title: String,
    /// Sections shown by the structured formats, in this order.
    pub display: Vec<String>,
    /// Whether tabular formats start with a row of column names.
    pub heading: bool,
    pub generated: NaiveDateTime,
}

impl<'a> Report<'a> {
    pub fn new(documents: &'a [Document], columns: &'a [ColumnSpec], generated: NaiveDateTime) -> Self {
        Self {
            documents,
            columns,
            title: DEFAULT_TITLE.to_string(),
            display: columns.iter().map(|c| c.name.clone()).collect(),
            heading: false,
            generated,
        }
    }

    pub fn from_settings(
        documents: &'a [Document],
        settings: &'a Settings,
        generated: NaiveDateTime,
    ) -> Self {
        Self::new(documents, &settings.columns, generated)
            .with_title(settings.config.json.title.clone())
            .with_display(settings.display_columns())
            .with_heading(settings.config.csv.heading)
    }

    /// An empty title keeps the default.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        if !title.is_empty() {
            self.title = title;
        }
        self
    }

    pub fn with_display(mut self, display: Vec<String>) -> Self {
        self.display = display;
        self
    }

    pub fn with_heading(mut self, heading: bool) -> Self {
        self.heading = heading;
        self
    }

    pub fn view(&self) -> ReportView<'_> {
        ReportView {
            title: &self.title,
            lastupdate: Timestamp::from(self.generated),
            documents: self
                .documents
                .iter()
                .map(|doc| DocumentView::new(doc, &self.display))
                .collect(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ReportView<'a> {
    title: &'a str,
    lastupdate: Timestamp,
    documents: Vec<DocumentView<'a>>,
}

#[derive(Debug, serde::Serialize)]
struct Timestamp {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
}

impl From<NaiveDateTime> for Timestamp {
    fn from(t: NaiveDateTime) -> Self {
        Self {
            year: t.year(),
            month: t.month(),
            day: t.day(),
            hour: t.hour(),
            min: t.minute(),
            sec: t.second(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct DocumentView<'a> {
    filename: &'a str,
    sections: SectionsView<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> DocumentView<'a> {
    fn new(doc: &'a Document, display: &'a [String]) -> Self {
        let sections = display
            .iter()
            .map(|name| (name.as_str(), SectionView::new(doc.section(name))))
            .collect();
        Self {
            filename: &doc.filename,
            sections: SectionsView(sections),
            error: doc.error.as_ref().map(|e| e.to_string()),
        }
    }
}

/// Sections in display order.
#[derive(Debug)]
struct SectionsView<'a>(Vec<(&'a str, SectionView<'a>)>);

impl Serialize for SectionsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, section) in &self.0 {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
enum SectionView<'a> {
    Plain(&'a str),
    Detailed(SectionDetail<'a>),
}

#[derive(Debug, Default, serde::Serialize)]
struct SectionDetail<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<DateView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Vec<ParagraphView<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> SectionView<'a> {
    fn new(section: Option<&'a Section>) -> Self {
        let Some(section) = section else {
            return SectionView::Detailed(SectionDetail::default());
        };
        if section.time.is_none() && section.error.is_none() {
            if let [para] = section.paragraphs() {
                if let [line] = para.lines.as_slice() {
                    return SectionView::Plain(&line.text);
                }
            }
        }
        let date = section.time.map(|t| DateView::new(t, section.expired, None));
        let value = date.is_none().then(|| {
            section
                .paragraphs()
                .iter()
                .map(ParagraphView::new)
                .collect()
        });
        SectionView::Detailed(SectionDetail {
            date,
            value,
            error: section.error.as_ref().map(|e| e.cause.to_string()),
        })
    }
}

#[derive(Debug, serde::Serialize)]
struct ParagraphView<'a> {
    value: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<DateView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> ParagraphView<'a> {
    fn new(para: &'a Paragraph) -> Self {
        Self {
            value: para.lines.iter().map(|l| l.text.as_str()).collect(),
            date: para
                .time
                .map(|t| DateView::new(t, false, para.suffix.as_deref())),
            error: para.error.as_ref().map(|e| e.cause.to_string()),
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct DateView<'a> {
    year: i32,
    month: u32,
    day: u32,
    #[serde(skip_serializing_if = "is_false")]
    expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    suffix: Option<&'a str>,
}

impl<'a> DateView<'a> {
    fn new(date: NaiveDate, expired: bool, suffix: Option<&'a str>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            expired,
            suffix,
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}
