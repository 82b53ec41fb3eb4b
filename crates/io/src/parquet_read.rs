//! Reading a table back from Parquet.

use std::path::Path;

use arrow::array::{AsArray, RecordBatch};
use arrow::datatypes::{DataType, Date32Type, Float64Type, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use quarry_generate::{OutputAssembler, OutputTable};
use tracing::debug;

use crate::error::IoError;
use crate::parquet_write::{DATE_COLUMN, TOTAL_COLUMN};

/// Reads all record batches from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be decoded.
pub(crate) fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Access {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(batches)
}

/// Validates the `date | unit... | total` schema and returns the unit names.
pub(crate) fn validate_schema(schema: &Schema) -> Result<Vec<String>, IoError> {
    let fields = schema.fields();
    let n = fields.len();
    let mut mismatches: Vec<String> = Vec::new();

    if n < 3 {
        return Err(IoError::Validation {
            count: 1,
            details: format!("expected at least 3 columns, got {n}"),
        });
    }

    let first = &fields[0];
    if first.name() != DATE_COLUMN || first.data_type() != &DataType::Date32 {
        mismatches.push(format!(
            "column 0: expected '{DATE_COLUMN}' (Date32), got '{}' ({})",
            first.name(),
            first.data_type()
        ));
    }
    let last = &fields[n - 1];
    if last.name() != TOTAL_COLUMN {
        mismatches.push(format!(
            "column {}: expected '{TOTAL_COLUMN}', got '{}'",
            n - 1,
            last.name()
        ));
    }
    for (i, field) in fields.iter().enumerate().skip(1) {
        if field.data_type() != &DataType::Float64 {
            mismatches.push(format!(
                "column {i} ('{}'): expected Float64, got {}",
                field.name(),
                field.data_type()
            ));
        }
    }

    if !mismatches.is_empty() {
        return Err(IoError::Validation {
            count: mismatches.len(),
            details: mismatches.join("; "),
        });
    }

    Ok(fields[1..n - 1].iter().map(|f| f.name().clone()).collect())
}

/// Reads a table written by [`write_table`](crate::write_table) in
/// Parquet format. Totals are recomputed from the unit columns.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Parquet`] on decode
/// failures, or [`IoError::Validation`] if the schema does not match.
pub fn read_parquet(path: &Path) -> Result<OutputTable, IoError> {
    let batches = read_batches(path)?;
    let Some(first) = batches.first() else {
        return Err(IoError::Validation {
            count: 1,
            details: "file contains no record batches".to_string(),
        });
    };
    let units = validate_schema(&first.schema())?;
    let n_units = units.len();

    let mut assembler = OutputAssembler::new(units)?;
    let mut row_no = 0usize;
    for batch in &batches {
        let date_col = batch.column(0).as_primitive::<Date32Type>();
        let unit_cols: Vec<_> = (1..=n_units)
            .map(|i| batch.column(i).as_primitive::<Float64Type>())
            .collect();

        for row in 0..batch.num_rows() {
            row_no += 1;
            let date = date_col
                .value_as_date(row)
                .ok_or_else(|| IoError::InvalidDate {
                    row: row_no,
                    value: date_col.value(row).to_string(),
                })?;
            let values = unit_cols.iter().map(|c| c.value(row)).collect();
            assembler.push_row(date, values)?;
        }
    }

    let table = assembler.finish();
    debug!(path = %path.display(), rows = table.day_count(), "read parquet table");
    Ok(table)
}
