//! Run configuration
//!
//! A run is described by one JSON file:
//!
//! ```text
//! {
//!   "src": ["notes/*.txt"],
//!   "columns": [{"name": "title", "type": "text"}, {"name": "due", "type": "deadline"}],
//!   "order": [{"name": "due", "descending": false}],
//!   "csv": {"dst": "out.csv", "heading": true},
//!   "json": {"dst": "out.json", "title": "Chores", "display": ["title", "due"]}
//! }
//! ```
//!
//! `defaults/dustpan.default.json` is embedded and layered first, then the
//! user's file, then `DUSTPAN_*` environment variables (`__` separates nested
//! keys, as in `DUSTPAN_CSV__HEADING=true`). Relative paths in the file
//! resolve against the file's own directory.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dustpan::ast::DuplicatePolicy;
use crate::dustpan::columns::{ColumnSpec, ColumnType, SortKey, UnknownColumnType};

const DEFAULT_JSON: &str = include_str!("../../../defaults/dustpan.default.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("columns: a column has no name")]
    NoColumnName,
    #[error("columns: column '{0}' has no type")]
    NoColumnType(String),
    #[error("columns: column '{name}': {source}")]
    UnknownColumnType {
        name: String,
        #[source]
        source: UnknownColumnType,
    },
    #[error("columns: column '{0}' is declared more than once")]
    DuplicateColumn(String),
    #[error("order: a sort key has no column name")]
    NoSortKeyName,
    #[error("order: column '{0}' is not declared")]
    UndefinedColumn(String),
    #[error("json.display: column '{0}' is not declared")]
    UndefinedDisplayColumn(String),
}

/// The configuration file as written, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DustpanConfig {
    /// Glob patterns of the note files to load.
    pub src: Vec<String>,
    pub columns: Vec<ColumnConfig>,
    pub order: Vec<SortKey>,
    pub csv: CsvConfig,
    #[serde(alias = "html")]
    pub json: JsonConfig,
    pub duplicates: DuplicatePolicy,
    /// Keep files that failed to parse as empty documents carrying the error.
    pub keep_failed: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    pub dst: Option<PathBuf>,
    pub heading: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub dst: Option<PathBuf>,
    pub title: String,
    /// Columns shown in the report, in this order. Empty means every column.
    pub display: Vec<String>,
}

impl DustpanConfig {
    /// Check the declarations and return the typed column list.
    pub fn validate(&self) -> Result<Vec<ColumnSpec>, ConfigError> {
        let mut columns = Vec::with_capacity(self.columns.len());
        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(ConfigError::NoColumnName);
            }
            if column.kind.trim().is_empty() {
                return Err(ConfigError::NoColumnType(column.name.clone()));
            }
            let kind = column
                .kind
                .parse::<ColumnType>()
                .map_err(|source| ConfigError::UnknownColumnType {
                    name: column.name.clone(),
                    source,
                })?;
            if !seen.insert(column.name.as_str()) {
                return Err(ConfigError::DuplicateColumn(column.name.clone()));
            }
            columns.push(ColumnSpec::new(column.name.clone(), kind));
        }

        for key in &self.order {
            if key.name.is_empty() {
                return Err(ConfigError::NoSortKeyName);
            }
            if !seen.contains(key.name.as_str()) {
                return Err(ConfigError::UndefinedColumn(key.name.clone()));
            }
        }

        if let Some(name) = self.json.display.iter().find(|n| !seen.contains(n.as_str())) {
            return Err(ConfigError::UndefinedDisplayColumn(name.clone()));
        }

        Ok(columns)
    }
}

/// A validated configuration together with the directory its paths are relative to.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base: PathBuf,
    pub config: DustpanConfig,
    pub columns: Vec<ColumnSpec>,
}

impl Settings {
    pub fn new(base: impl Into<PathBuf>, config: DustpanConfig) -> Result<Self, ConfigError> {
        let columns = config.validate()?;
        Ok(Self {
            base: base.into(),
            config,
            columns,
        })
    }

    /// Load, layer and validate the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Loader::new().with_file(path)?.with_env().build()
    }

    /// Resolve a configured path against the configuration directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        resolve(&self.base, path.as_ref())
    }

    /// Display columns, falling back to every declared column.
    pub fn display_columns(&self) -> Vec<String> {
        if self.config.json.display.is_empty() {
            self.columns.iter().map(|c| c.name.clone()).collect()
        } else {
            self.config.json.display.clone()
        }
    }
}

pub(crate) fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Older configurations name the `json` table `html`. The defaults always
/// carry `json`, so the key is renamed before layering. Text that is not a
/// JSON object is passed through for the `config` crate to report.
fn rename_html_table(text: &str) -> Cow<'_, str> {
    let Ok(Value::Object(mut map)) = serde_json::from_str::<Value>(text) else {
        return Cow::Borrowed(text);
    };
    if map.contains_key("json") {
        return Cow::Borrowed(text);
    }
    match map.remove("html") {
        Some(html) => {
            map.insert("json".to_string(), html);
            Cow::Owned(Value::Object(map).to_string())
        }
        None => Cow::Borrowed(text),
    }
}

/// Layers configuration sources over the embedded defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
    base: PathBuf,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_JSON, FileFormat::Json));
        Self {
            builder,
            base: PathBuf::from("."),
        }
    }

    /// Layer a JSON configuration file; its directory becomes the base for relative paths.
    ///
    /// A leading byte order mark is ignored.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        let text = rename_html_table(text);
        self.builder = self
            .builder
            .add_source(File::from_str(&text, FileFormat::Json));
        self.base = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(self)
    }

    /// Layer `DUSTPAN_*` environment variables.
    pub fn with_env(mut self) -> Self {
        let env = Environment::with_prefix("DUSTPAN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        self.builder = self.builder.add_source(env);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Deserialize and validate the layered configuration.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let config: DustpanConfig = self.builder.build()?.try_deserialize()?;
        Settings::new(self.base, config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
