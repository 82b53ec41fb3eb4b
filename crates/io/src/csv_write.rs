//! CSV rendering of a generated table.

use std::path::Path;

use csv::WriterBuilder;
use quarry_generate::OutputTable;

use crate::error::IoError;

/// Date format used for the first column.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Writes `table` as CSV: the header row, then one row per day with the
/// date as `YYYY-MM-DD` and numbers in shortest round-trip form.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if the file cannot be created or written.
pub fn write_csv(path: &Path, table: &OutputTable) -> Result<(), IoError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(path)?;

    wtr.write_record(table.header())?;

    let mut record: Vec<String> = Vec::with_capacity(table.column_count());
    for row in table.rows() {
        record.clear();
        record.push(row.date().format(DATE_FORMAT).to_string());
        record.extend(row.values().iter().map(f64::to_string));
        record.push(row.total().to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| IoError::Access {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(())
}
