/// Export file naming and delivery.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::ExportFormat;

/// Standard export file name: `mapify-export-<ISO date>.<ext>`.
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "mapify-export-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Writes an export blob under `dir` with the standard file name and
/// returns the full path.
pub fn write_export(
    dir: &Path,
    format: ExportFormat,
    content: &str,
    date: NaiveDate,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(format, date));
    std::fs::write(&path, content)
        .with_context(|| format!("writing export to {}", path.display()))?;
    Ok(path)
}
