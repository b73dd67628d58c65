//! File discovery and loading
//!
//! Source patterns are resolved against a base directory and expanded with
//! `glob`. A file that cannot be read or parsed is logged and skipped; one
//! bad note never stops the rest from loading.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use super::config::resolve;
use crate::dustpan::ast::Document;
use crate::dustpan::parsing::{ParseError, Parser};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Reads note files with a fixed set of parser options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentLoader {
    parser: Parser,
    keep_failed: bool,
}

impl DocumentLoader {
    pub fn new(parser: Parser) -> Self {
        Self {
            parser,
            keep_failed: false,
        }
    }

    /// Keep files that fail to parse as placeholder documents.
    pub fn keep_failed(mut self, keep: bool) -> Self {
        self.keep_failed = keep;
        self
    }

    /// Read and parse one file. The document's filename is `path` as given.
    pub fn load_file(&self, path: &Path) -> Result<Document, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = self.parser.parse(&path.to_string_lossy(), file)?;
        Ok(doc)
    }

    /// Load every file matched by `patterns`, in pattern order and, within a
    /// pattern, in the order `glob` yields them.
    pub fn load_all<S: AsRef<str>>(&self, base: &Path, patterns: &[S]) -> Vec<Document> {
        let mut docs = Vec::new();
        for pattern in patterns {
            let pattern = resolve(base, Path::new(pattern.as_ref()));
            let pattern = pattern.to_string_lossy();
            let paths = match glob::glob(&pattern) {
                Ok(paths) => paths,
                Err(err) => {
                    warn!(%pattern, %err, "invalid source pattern");
                    continue;
                }
            };
            for entry in paths {
                match entry {
                    Ok(path) => self.load_into(&path, &mut docs),
                    Err(err) => warn!(%err, "unreadable source path"),
                }
            }
        }
        debug!(count = docs.len(), "documents loaded");
        docs
    }

    fn load_into(&self, path: &Path, docs: &mut Vec<Document>) {
        match self.load_file(path) {
            Ok(doc) => docs.push(doc),
            Err(LoadError::Parse(err)) if self.keep_failed => {
                warn!(%err, "document kept with parse error");
                docs.push(Document::failed(err));
            }
            Err(err) => warn!(%err, "document skipped"),
        }
    }
}

/// Load one file with `parser`.
pub fn load_file(path: &Path, parser: &Parser) -> Result<Document, LoadError> {
    DocumentLoader::new(*parser).load_file(path)
}

/// Load every file matched by `patterns` relative to `base`, skipping failures.
pub fn load_all<S: AsRef<str>>(base: &Path, patterns: &[S], parser: &Parser) -> Vec<Document> {
    DocumentLoader::new(*parser).load_all(base, patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn skips_unparsable_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "@title: first\n").unwrap();
        fs::write(dir.path().join("b.txt"), "no header here\n").unwrap();
        fs::write(dir.path().join("c.txt"), "\u{feff}@title: third\n").unwrap();

        let docs = load_all(dir.path(), &["*.txt"], &Parser::new());
        let titles: Vec<_> = docs
            .iter()
            .map(|d| d.section("title").unwrap().peek_str().to_string())
            .collect();
        assert_eq!(titles, vec!["first", "third"]);
    }

    #[test]
    fn keeps_failed_documents_on_request() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.txt"), "\n@title x\n").unwrap();

        let docs = DocumentLoader::new(Parser::new())
            .keep_failed(true)
            .load_all(dir.path(), &["*.txt"]);
        assert_eq!(docs.len(), 1);
        let err = docs[0].error.as_ref().unwrap();
        assert_eq!(err.line, 2);
        assert!(docs[0].filename.ends_with("bad.txt"));
        assert!(docs[0].sections.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/nonexistent/dustpan.txt"), &Parser::new()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn absolute_patterns_ignore_the_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("n.txt"), "@n: 1\n").unwrap();
        let pattern = dir.path().join("*.txt").to_string_lossy().into_owned();

        let docs = load_all(Path::new("/elsewhere"), &[pattern], &Parser::new());
        assert_eq!(docs.len(), 1);
    }
}
