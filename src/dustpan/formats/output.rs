//! Writing rendered reports to disk
//!
//! Output goes to a temporary file in the destination directory that is
//! renamed over the destination once complete, so readers never see a
//! partial report.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use super::registry::{FormatError, FormatRegistry};
use super::report::Report;

/// Replace `path` with `contents` in one step.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), FormatError> {
    let to_error = |source: std::io::Error| FormatError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".dustpan")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(to_error)?;
    tmp.write_all(contents.as_bytes()).map_err(to_error)?;
    tmp.as_file().sync_all().map_err(to_error)?;
    set_readable(&tmp).map_err(to_error)?;
    tmp.persist(path).map_err(|e| to_error(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn set_readable(tmp: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_tmp: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}

/// Render `report` as `format` and store it at `path`.
pub fn write_report(
    registry: &FormatRegistry,
    report: &Report<'_>,
    format: &str,
    path: &Path,
) -> Result<(), FormatError> {
    let rendered = registry.serialize(report, format)?;
    write_atomic(path, &rendered)?;
    info!(format, path = %path.display(), documents = report.documents.len(), "report written");
    Ok(())
}
