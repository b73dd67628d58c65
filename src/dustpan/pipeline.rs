//! End-to-end processing of a configured note collection
//!
//! - Configuration loading and validation (`config`)
//! - File discovery and parsing (`loader`)
//! - [`Pipeline`]: load, project every column, then sort

pub mod config;
pub mod loader;

pub use config::{ColumnConfig, ConfigError, CsvConfig, DustpanConfig, JsonConfig, Loader, Settings};
pub use loader::{load_all, load_file, DocumentLoader, LoadError};

use chrono::NaiveDateTime;
use tracing::info;

use crate::dustpan::ast::Document;
use crate::dustpan::columns::{project_all, SortOrder};
use crate::dustpan::parsing::Parser;

/// Runs one configured collection from files to ordered, typed documents.
#[derive(Debug, Clone)]
pub struct Pipeline {
    settings: Settings,
}

impl Pipeline {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn loader(&self) -> DocumentLoader {
        let parser = Parser::new().with_duplicate_policy(self.settings.config.duplicates);
        DocumentLoader::new(parser).keep_failed(self.settings.config.keep_failed)
    }

    /// Load, project and sort. `now` is the instant deadlines are measured against.
    pub fn run(&self, now: NaiveDateTime) -> Vec<Document> {
        let mut docs = self
            .loader()
            .load_all(&self.settings.base, self.settings.config.src.as_slice());
        self.process(&mut docs, now);
        info!(documents = docs.len(), "pipeline finished");
        docs
    }

    /// Project and sort documents that were loaded elsewhere.
    pub fn process(&self, docs: &mut [Document], now: NaiveDateTime) {
        let columns = &self.settings.columns;
        project_all(docs, columns, now);
        SortOrder::new(&self.settings.config.order, columns).sort(docs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    #[test]
    fn runs_a_configured_collection() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("notes/a.txt"), "@title: later\n@due: 2020/3/1\n").unwrap();
        fs::write(dir.path().join("notes/b.txt"), "@title: sooner\n@due: 2020/1/1\n").unwrap();
        let config = dir.path().join("dustpan.json");
        fs::write(
            &config,
            r#"{
                "src": ["notes/*.txt"],
                "columns": [{"name": "title", "type": "text"}, {"name": "due", "type": "deadline"}],
                "order": [{"name": "due"}]
            }"#,
        )
        .unwrap();

        let now = NaiveDate::from_ymd_opt(2020, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let pipeline = Pipeline::new(Settings::load(&config).unwrap());
        let docs = pipeline.run(now);

        let titles: Vec<_> = docs
            .iter()
            .map(|d| d.section("title").unwrap().peek_str())
            .collect();
        assert_eq!(titles, vec!["sooner", "later"]);
        assert!(docs[0].section("due").unwrap().expired);
        assert!(!docs[1].section("due").unwrap().expired);
    }
}
