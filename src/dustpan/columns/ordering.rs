//! Multi-key document ordering
//!
//! Keys are applied in order; the first one that tells two documents apart
//! decides. A missing section compares as its type's zero value: `""` for
//! text-like columns, `0` for numbers and 1970-01-01 for dates, so in
//! ascending order documents without a date come first.
//!
//! Sorting is stable: documents equal under every key keep their input order.

use chrono::NaiveDate;
use std::cmp::Ordering;

use super::spec::{ColumnSpec, ColumnType, SortKey};
use crate::dustpan::ast::{Document, Section};

/// Sort keys resolved against their column declarations.
#[derive(Debug, Clone)]
pub struct SortOrder {
    keys: Vec<ResolvedKey>,
}

#[derive(Debug, Clone)]
struct ResolvedKey {
    name: String,
    kind: ColumnType,
    descending: bool,
}

impl SortOrder {
    /// Keys naming an undeclared column are dropped.
    pub fn new(keys: &[SortKey], columns: &[ColumnSpec]) -> Self {
        let keys = keys
            .iter()
            .filter_map(|key| {
                let column = columns.iter().find(|c| c.name == key.name)?;
                Some(ResolvedKey {
                    name: key.name.clone(),
                    kind: column.kind,
                    descending: key.descending,
                })
            })
            .collect();
        Self { keys }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        for key in &self.keys {
            let ordering = compare_sections(key.kind, a.section(&key.name), b.section(&key.name));
            let ordering = if key.descending {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    pub fn sort(&self, docs: &mut [Document]) {
        if self.is_empty() {
            return;
        }
        docs.sort_by(|a, b| self.compare(a, b));
    }
}

/// Compare two documents under `keys`.
pub fn compare(a: &Document, b: &Document, keys: &[SortKey], columns: &[ColumnSpec]) -> Ordering {
    SortOrder::new(keys, columns).compare(a, b)
}

/// Stable multi-key sort.
pub fn sort_documents(docs: &mut [Document], keys: &[SortKey], columns: &[ColumnSpec]) {
    SortOrder::new(keys, columns).sort(docs);
}

fn compare_sections(kind: ColumnType, a: Option<&Section>, b: Option<&Section>) -> Ordering {
    match kind {
        ColumnType::Text | ColumnType::Log | ColumnType::Filename => peek(a).cmp(peek(b)),
        ColumnType::Number => number(a).cmp(&number(b)),
        ColumnType::Date | ColumnType::Deadline => time(a).cmp(&time(b)),
    }
}

fn peek(section: Option<&Section>) -> &str {
    section.map_or("", Section::peek_str)
}

fn number(section: Option<&Section>) -> i64 {
    section.and_then(|s| s.number).unwrap_or(0)
}

fn time(section: Option<&Section>) -> NaiveDate {
    section.and_then(|s| s.time).unwrap_or_else(epoch)
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dustpan::ast::{DuplicatePolicy, SectionMap};

    fn doc(name: &str, number: Option<i64>, date: Option<(i32, u32, u32)>) -> Document {
        let mut sections = SectionMap::new();
        let mut n = Section::from_text("");
        n.number = number;
        sections.insert("n".into(), n, DuplicatePolicy::Overwrite);
        if let Some((y, m, d)) = date {
            let mut t = Section::from_text("");
            t.time = NaiveDate::from_ymd_opt(y, m, d);
            sections.insert("t".into(), t, DuplicatePolicy::Overwrite);
        }
        Document::new(name, sections)
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("n", ColumnType::Number),
            ColumnSpec::new("t", ColumnType::Date),
        ]
    }

    #[test]
    fn test_missing_date_sorts_as_epoch() {
        let before_epoch = doc("a", None, Some((1960, 1, 1)));
        let missing = doc("b", None, None);
        let after_epoch = doc("c", None, Some((1980, 1, 1)));
        let keys = [SortKey::ascending("t")];
        assert_eq!(compare(&missing, &after_epoch, &keys, &columns()), Ordering::Less);
        assert_eq!(compare(&missing, &before_epoch, &keys, &columns()), Ordering::Greater);
    }

    #[test]
    fn test_missing_number_sorts_as_zero() {
        let negative = doc("a", Some(-1), None);
        let missing = doc("b", None, None);
        let keys = [SortKey::ascending("n")];
        assert_eq!(compare(&negative, &missing, &keys, &columns()), Ordering::Less);
        assert_eq!(
            compare(&missing, &doc("c", Some(0), None), &keys, &columns()),
            Ordering::Equal
        );
    }

    #[test]
    fn test_descending_flips() {
        let a = doc("a", Some(1), None);
        let b = doc("b", Some(2), None);
        let keys = [SortKey::descending("n")];
        assert_eq!(compare(&a, &b, &keys, &columns()), Ordering::Greater);
    }

    #[test]
    fn test_unknown_key_is_skipped() {
        let order = SortOrder::new(&[SortKey::ascending("nope")], &columns());
        assert!(order.is_empty());
    }

    #[test]
    fn test_sort_is_stable() {
        let mut docs = vec![
            doc("first", Some(1), None),
            doc("second", Some(0), None),
            doc("third", Some(1), None),
            doc("fourth", Some(0), None),
        ];
        sort_documents(&mut docs, &[SortKey::ascending("n")], &columns());
        let names: Vec<_> = docs.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, vec!["second", "fourth", "first", "third"]);
    }
}
