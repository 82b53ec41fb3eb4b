//! Format-dispatching table reader.

use std::path::Path;

use quarry_generate::OutputTable;

use crate::csv_read;
use crate::error::IoError;
use crate::parquet_read;
use crate::writer::TableFormat;

/// Reads a table from `path`, choosing the format from the file extension.
///
/// # Errors
///
/// Returns the format-specific [`IoError`] if reading fails.
pub fn read_table(path: &Path) -> Result<OutputTable, IoError> {
    match TableFormat::from_path(path) {
        TableFormat::Csv => csv_read::read_csv(path),
        TableFormat::Parquet => parquet_read::read_parquet(path),
    }
}
