//! Document element definition

use std::fmt;
use std::path::Path;

use super::section::Section;
use super::section_map::SectionMap;
use crate::dustpan::parsing::ParseError;

/// One parsed note file.
///
/// `filename` is the identity the caller passed in; it is never re-derived.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub sections: SectionMap,
    /// Set only for placeholder documents standing in for a file that failed to parse.
    pub error: Option<ParseError>,
}

impl Document {
    pub fn new(filename: impl Into<String>, sections: SectionMap) -> Self {
        Self {
            filename: filename.into(),
            sections,
            error: None,
        }
    }

    /// An empty document recording why its source could not be parsed.
    pub fn failed(error: ParseError) -> Self {
        Self {
            filename: error.filename.clone(),
            sections: SectionMap::new(),
            error: Some(error),
        }
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// File name without directories or its last extension: `notes/todo.txt` -> `todo`.
    ///
    /// Everything from the last dot is the extension, so a dotfile such as
    /// `.plan` has an empty stem.
    pub fn stem(&self) -> String {
        let base = Path::new(&self.filename)
            .file_name()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        match base.rfind('.') {
            Some(dot) => base[..dot].to_string(),
            None => base.into_owned(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename)?;
        for (name, section) in self.sections.iter() {
            write!(f, ",{:?}:{:?}", name, section.text())?;
        }
        Ok(())
    }
}
