//! Typed column projection
//!
//! Reads each declared column's section and fills in its typed fields in
//! place. Problems are recorded on the section (or, for logs, on the
//! paragraph) and never abort the document.
//!
//! | type       | cardinality          | fills                                  |
//! |------------|----------------------|----------------------------------------|
//! | `text`     | any                  | nothing                                |
//! | `filename` | any                  | synthesizes the section when absent    |
//! | `number`   | one paragraph, line  | `number`                               |
//! | `date`     | one paragraph, line  | `time`                                 |
//! | `deadline` | one paragraph, line  | `time`, `expired`                      |
//! | `log`      | any                  | per paragraph `time`, `suffix`         |

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use super::error::{FieldError, ValueError};
use super::spec::{ColumnSpec, ColumnType};
use crate::dustpan::ast::{Document, DuplicatePolicy, Section, TextLine};
use crate::dustpan::dates::{parse_date, parse_log_date};

/// Project every document against the same reference instant.
pub fn project_all(docs: &mut [Document], columns: &[ColumnSpec], now: NaiveDateTime) {
    for doc in docs.iter_mut() {
        project(doc, columns, now);
    }
}

/// Populate the typed fields of `doc` for every declared column.
///
/// `now` is the instant deadlines are compared against.
pub fn project(doc: &mut Document, columns: &[ColumnSpec], now: NaiveDateTime) {
    for column in columns {
        project_column(doc, column, now);
    }
}

fn project_column(doc: &mut Document, column: &ColumnSpec, now: NaiveDateTime) {
    if column.kind == ColumnType::Filename && !doc.sections.contains(&column.name) {
        let stem = doc.stem();
        doc.sections.insert(
            column.name.clone(),
            Section::from_text(stem),
            DuplicatePolicy::Overwrite,
        );
        return;
    }

    let Document {
        filename, sections, ..
    } = doc;
    let filename = filename.as_str();
    let Some(section) = sections.get_mut(&column.name) else {
        return;
    };

    match column.kind {
        ColumnType::Text | ColumnType::Filename => {}
        ColumnType::Number => project_number(section, filename),
        ColumnType::Date => project_date(section, filename, None),
        ColumnType::Deadline => project_date(section, filename, Some(now)),
        ColumnType::Log => project_log(section, filename),
    }

    if let Some(err) = &section.error {
        debug!(column = %column.name, kind = %column.kind, %err, "field error");
    }
}

/// The one line of a single-valued section, `None` for an empty section.
fn single_line<'s>(
    section: &'s Section,
    filename: &str,
) -> Result<Option<&'s TextLine>, ValueError> {
    match section.paragraphs() {
        [] => Ok(None),
        [para] if para.lines.len() == 1 => Ok(para.first_line()),
        [first, ..] => Err(ValueError::new(filename, first.line, FieldError::MultipleValue)),
    }
}

fn project_number(section: &mut Section, filename: &str) {
    let outcome = single_line(section, filename).and_then(|line| {
        line.map(|line| line.text.parse::<i64>())
            .transpose()
            .map_err(|e| ValueError::new(filename, section.line, e))
    });
    match outcome {
        Ok(number) => section.number = number,
        Err(err) => section.error = Some(err),
    }
}

fn project_date(section: &mut Section, filename: &str, now: Option<NaiveDateTime>) {
    match read_date(section, filename) {
        Ok(Some(date)) => {
            section.time = Some(date);
            if let Some(now) = now {
                section.expired = date.and_time(NaiveTime::MIN) < now;
            }
        }
        Ok(None) => {}
        Err(err) => section.error = Some(err),
    }
}

fn read_date(section: &Section, filename: &str) -> Result<Option<NaiveDate>, ValueError> {
    let Some(line) = single_line(section, filename)? else {
        return Ok(None);
    };
    let parsed =
        parse_date(&line.text).map_err(|e| ValueError::new(filename, section.line, e))?;
    if !parsed.trailing.is_empty() {
        return Err(ValueError::new(filename, line.line, FieldError::MultipleValue));
    }
    parsed
        .to_naive_date()
        .map(Some)
        .map_err(|e| ValueError::new(filename, section.line, e))
}

fn project_log(section: &mut Section, filename: &str) {
    for para in section.paragraphs_mut() {
        let Some(last) = para.lines.last_mut() else {
            continue;
        };
        let line = last.line;
        let outcome = parse_log_date(&last.text).and_then(|log| {
            let date = log.to_naive_date()?;
            Ok((date, log.pre.to_string(), log.post.to_string()))
        });
        match outcome {
            Ok((date, pre, post)) => {
                last.text = pre;
                para.time = Some(date);
                para.suffix = (!post.is_empty()).then_some(post);
            }
            Err(e) => {
                let err = ValueError::new(filename, line, e);
                debug!(%err, "log entry error");
                para.error = Some(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dustpan::dates::DateError;
    use crate::dustpan::parsing::parse_str;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn projected(source: &str, columns: &[ColumnSpec]) -> Document {
        let mut doc = parse_str("notes/item.txt", source).unwrap();
        project(&mut doc, columns, now());
        doc
    }

    #[test]
    fn test_number() {
        let doc = projected("@n: -42\n", &[ColumnSpec::new("n", ColumnType::Number)]);
        let section = doc.section("n").unwrap();
        assert_eq!(section.number, Some(-42));
        assert!(section.error.is_none());
        assert!(section.time.is_none());
    }

    #[test]
    fn test_number_parse_failure() {
        let doc = projected("@x: 1\n@n: twelve\n", &[ColumnSpec::new("n", ColumnType::Number)]);
        let err = doc.section("n").unwrap().error.clone().unwrap();
        assert_eq!(err.line, 2);
        assert!(matches!(err.cause, FieldError::Number(_)));
    }

    #[test]
    fn test_number_multiple_lines() {
        let doc = projected("@n: 1\n2\n", &[ColumnSpec::new("n", ColumnType::Number)]);
        let section = doc.section("n").unwrap();
        assert_eq!(section.error.as_ref().unwrap().cause, FieldError::MultipleValue);
        assert_eq!(section.number, None);
    }

    #[test]
    fn test_number_multiple_paragraphs() {
        let doc = projected("@n: 1\n\n2\n", &[ColumnSpec::new("n", ColumnType::Number)]);
        let cause = &doc.section("n").unwrap().error.as_ref().unwrap().cause;
        assert_eq!(*cause, FieldError::MultipleValue);
    }

    #[test]
    fn test_empty_section_is_not_an_error() {
        let doc = projected("@n:\n", &[ColumnSpec::new("n", ColumnType::Number)]);
        let section = doc.section("n").unwrap();
        assert!(section.error.is_none());
        assert_eq!(section.number, None);
    }

    #[test]
    fn test_date() {
        let doc = projected("@d: 2019年11月13日\n", &[ColumnSpec::new("d", ColumnType::Date)]);
        let section = doc.section("d").unwrap();
        assert_eq!(section.time, NaiveDate::from_ymd_opt(2019, 11, 13));
        assert!(!section.expired);
        assert_eq!(section.peek_str(), "2019年11月13日");
    }

    #[test]
    fn test_date_with_second_value() {
        let doc = projected("@d: 2019/1/2 2019/1/3\n", &[ColumnSpec::new("d", ColumnType::Date)]);
        let section = doc.section("d").unwrap();
        assert_eq!(section.error.as_ref().unwrap().cause, FieldError::MultipleValue);
        assert!(section.time.is_none());
    }

    #[test]
    fn test_date_not_in_calendar() {
        let doc = projected("@d: 2019/2/29\n", &[ColumnSpec::new("d", ColumnType::Date)]);
        let cause = &doc.section("d").unwrap().error.as_ref().unwrap().cause;
        assert_eq!(*cause, FieldError::Date(DateError::InvalidDate));
    }

    #[test]
    fn test_deadline_expiry() {
        let columns = [
            ColumnSpec::new("past", ColumnType::Deadline),
            ColumnSpec::new("today", ColumnType::Deadline),
            ColumnSpec::new("future", ColumnType::Deadline),
        ];
        let doc = projected("@past: 2020/6/14\n@today: 2020/6/15\n@future: 2020/6/16\n", &columns);
        assert!(doc.section("past").unwrap().expired);
        assert!(doc.section("today").unwrap().expired);
        assert!(!doc.section("future").unwrap().expired);
    }

    #[test]
    fn test_log_entries() {
        let source = "@log: ordered parts (2020/1/2)\n\n\
                      first call\nno answer (2020/1/5 bob)\n\n\
                      broken (2020/13/1)\n\n\
                      no date\n";
        let doc = projected(source, &[ColumnSpec::new("log", ColumnType::Log)]);
        let paras = doc.section("log").unwrap().paragraphs();
        assert_eq!(paras.len(), 4);

        assert_eq!(paras[0].lines[0].text, "ordered parts ");
        assert_eq!(paras[0].time, NaiveDate::from_ymd_opt(2020, 1, 2));
        assert_eq!(paras[0].suffix, None);

        assert_eq!(paras[1].lines[0].text, "first call");
        assert_eq!(paras[1].lines[1].text, "no answer ");
        assert_eq!(paras[1].suffix.as_deref(), Some("bob"));

        let err = paras[2].error.as_ref().unwrap();
        assert_eq!(err.cause, FieldError::Date(DateError::InvalidDate));
        assert_eq!(err.line, 6);
        assert_eq!(paras[2].lines[0].text, "broken (2020/13/1)");

        let err = paras[3].error.as_ref().unwrap();
        assert_eq!(err.cause, FieldError::Date(DateError::NoOpenParenthesis));
    }

    #[test]
    fn test_filename_synthesized_when_absent() {
        let doc = projected("@title: x\n", &[ColumnSpec::new("file", ColumnType::Filename)]);
        assert_eq!(doc.section("file").unwrap().peek_str(), "item");
    }

    #[test]
    fn test_filename_present_is_kept() {
        let doc = projected("@file: custom\n", &[ColumnSpec::new("file", ColumnType::Filename)]);
        assert_eq!(doc.section("file").unwrap().peek_str(), "custom");
    }

    #[test]
    fn test_absent_typed_columns_are_ignored() {
        let columns = [
            ColumnSpec::new("n", ColumnType::Number),
            ColumnSpec::new("d", ColumnType::Date),
            ColumnSpec::new("l", ColumnType::Log),
        ];
        let doc = projected("@title: x\n", &columns);
        assert_eq!(doc.sections.len(), 1);
    }
}
