//! Merged table export
//!
//! Writes one file per requested format to `<directory>/<basename>.<ext>`.
//! Existing files are overwritten.

mod csv;
mod json;
mod xlsx;

pub use self::csv::write_csv;
pub use self::json::write_json;
pub use self::xlsx::write_xlsx;

use crate::domain::{Ga4Error, MergedTable, OutputFormat, OutputName, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Exports a table in every requested format
///
/// The directory is created if it does not exist. Files are written in
/// format order (xlsx, csv, json); the first failure stops the export.
///
/// # Errors
///
/// Returns [`Ga4Error::Write`] naming the file or directory that failed.
pub fn export(
    table: &MergedTable,
    directory: &Path,
    basename: &OutputName,
    formats: &BTreeSet<OutputFormat>,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(directory).map_err(|e| Ga4Error::write(directory.display(), e))?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = output_path(directory, basename, *format);
        match format {
            OutputFormat::Xlsx => write_xlsx(table, &path)?,
            OutputFormat::Csv => write_csv(table, &path)?,
            OutputFormat::Json => write_json(table, &path)?,
        }
        tracing::debug!(path = %path.display(), rows = table.row_count(), "Wrote output file");
        written.push(path);
    }

    Ok(written)
}

/// `<directory>/<basename>.<extension>`
pub fn output_path(directory: &Path, basename: &OutputName, format: OutputFormat) -> PathBuf {
    directory.join(format!("{}.{}", basename.as_str(), format.extension()))
}
