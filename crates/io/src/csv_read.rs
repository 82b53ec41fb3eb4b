//! Reading a table back from CSV.

use std::path::Path;

use csv::ReaderBuilder;
use quarry_calendar::parse_date;
use quarry_generate::{DATE_HEADER, OutputAssembler, OutputTable, TOTAL_HEADER};
use tracing::debug;

use crate::error::IoError;

/// Checks the `Date | unit... | Total` header and returns the unit names.
pub(crate) fn units_from_header(header: &[&str]) -> Result<Vec<String>, IoError> {
    let mut problems = Vec::new();
    if header.first().map(|h| h.trim()) != Some(DATE_HEADER) {
        problems.push(format!("first column must be '{DATE_HEADER}'"));
    }
    if header.len() < 2 || header.last().map(|h| h.trim()) != Some(TOTAL_HEADER) {
        problems.push(format!("last column must be '{TOTAL_HEADER}'"));
    }
    if header.len() < 3 {
        problems.push("at least one unit column is required".to_string());
    }
    if !problems.is_empty() {
        return Err(IoError::Validation {
            count: problems.len(),
            details: problems.join("; "),
        });
    }
    Ok(header[1..header.len() - 1]
        .iter()
        .map(|h| h.trim().to_string())
        .collect())
}

/// Reads a table written by [`write_csv`](crate::write_csv).
///
/// The first column must be `Date` and the last `Total`; every column in
/// between is a unit. The stored totals are ignored and recomputed from
/// the unit values. Dates are parsed leniently.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::Validation`] if the header has the wrong layout,
/// [`IoError::Table`] if a unit column name repeats, or
/// [`IoError::InvalidDate`] / [`IoError::InvalidNumber`] for bad cells.
pub fn read_csv(path: &Path) -> Result<OutputTable, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)?;

    let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let header_refs: Vec<&str> = header.iter().map(String::as_str).collect();
    let units = units_from_header(&header_refs)?;
    let n_units = units.len();

    let mut assembler = OutputAssembler::new(units)?;
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let row = idx + 1;

        let date_cell = record.get(0).unwrap_or_default();
        let date = parse_date(date_cell).map_err(|_| IoError::InvalidDate {
            row,
            value: date_cell.to_string(),
        })?;

        let mut values = Vec::with_capacity(n_units);
        for col in 1..=n_units {
            let cell = record.get(col).unwrap_or_default().trim();
            let value: f64 = cell.parse().map_err(|_| IoError::InvalidNumber {
                row,
                column: header[col].clone(),
                value: cell.to_string(),
            })?;
            values.push(value);
        }
        assembler.push_row(date, values)?;
    }

    let table = assembler.finish();
    debug!(path = %path.display(), rows = table.day_count(), "read csv table");
    Ok(table)
}
