//! Ordered section storage
//!
//! Sections keep the order in which their headers appeared. What happens
//! when a name shows up twice is decided by a [`DuplicatePolicy`] at
//! insertion time.

use serde::Deserialize;
use std::fmt;

use super::section::Section;

/// What to do with a section whose name is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The later section replaces the earlier one, in the earlier one's slot.
    #[default]
    Overwrite,
    /// The later section is dropped.
    KeepFirst,
    /// The document is rejected.
    Reject,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DuplicatePolicy::Overwrite => "overwrite",
            DuplicatePolicy::KeepFirst => "keep-first",
            DuplicatePolicy::Reject => "reject",
        };
        f.write_str(name)
    }
}

/// Outcome of [`SectionMap::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    New,
    /// An earlier section of the same name was replaced.
    Replaced,
    /// The new section was dropped in favour of the earlier one.
    Ignored,
    /// The name was already taken and the policy is [`DuplicatePolicy::Reject`].
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    entries: Vec<(String, Section)>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.position(name).map(move |i| &mut self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn insert(&mut self, name: String, section: Section, policy: DuplicatePolicy) -> Insertion {
        match (self.position(&name), policy) {
            (None, _) => {
                self.entries.push((name, section));
                Insertion::New
            }
            (Some(i), DuplicatePolicy::Overwrite) => {
                self.entries[i].1 = section;
                Insertion::Replaced
            }
            (Some(_), DuplicatePolicy::KeepFirst) => Insertion::Ignored,
            (Some(_), DuplicatePolicy::Reject) => Insertion::Rejected,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
