//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, RecordBatch};
use arrow::datatypes::{DataType, Field, Schema};
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use quarry_generate::OutputTable;

use crate::error::IoError;

/// Name of the date column.
pub(crate) const DATE_COLUMN: &str = "date";
/// Name of the total column.
pub(crate) const TOTAL_COLUMN: &str = "total";

/// Days since 1970-01-01, the Date32 encoding.
pub(crate) fn to_date32(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}

/// Builds the Arrow schema for a table: `date: Date32`, one `Float64`
/// column per unit, `total: Float64`.
pub(crate) fn build_schema(units: &[String]) -> Schema {
    let mut fields = Vec::with_capacity(units.len() + 2);
    fields.push(Field::new(DATE_COLUMN, DataType::Date32, false));
    fields.extend(
        units
            .iter()
            .map(|u| Field::new(u.as_str(), DataType::Float64, false)),
    );
    fields.push(Field::new(TOTAL_COLUMN, DataType::Float64, false));
    Schema::new(fields)
}

/// Converts `table` into a single Arrow [`RecordBatch`] matching
/// [`build_schema`].
pub(crate) fn table_to_record_batch(
    table: &OutputTable,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let dates: Vec<i32> = table.rows().iter().map(|r| to_date32(r.date())).collect();

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(table.column_count());
    columns.push(Arc::new(Date32Array::from(dates)));
    for idx in 0..table.units().len() {
        let values: Vec<f64> = table.rows().iter().map(|r| r.values()[idx]).collect();
        columns.push(Arc::new(Float64Array::from(values)));
    }
    columns.push(Arc::new(Float64Array::from(table.totals())));

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Writes a [`RecordBatch`] to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Access`] if the file cannot be created, or
/// [`IoError::Parquet`] if batch writing or file finalisation fails.
pub(crate) fn write_batch(
    path: &Path,
    batch: &RecordBatch,
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Access {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_generate::OutputAssembler;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn epoch_encoding() {
        assert_eq!(to_date32(ymd(1970, 1, 1)), 0);
        assert_eq!(to_date32(ymd(1970, 1, 2)), 1);
        assert_eq!(to_date32(ymd(1969, 12, 31)), -1);
        assert_eq!(to_date32(ymd(2024, 1, 1)), 19_723);
    }

    #[test]
    fn schema_layout() {
        let schema = build_schema(&["North".to_string(), "South".to_string()]);
        assert_eq!(schema.fields().len(), 4);
        assert_eq!(schema.field(0).name(), "date");
        assert_eq!(schema.field(0).data_type(), &DataType::Date32);
        assert_eq!(schema.field(1).name(), "North");
        assert_eq!(schema.field(2).data_type(), &DataType::Float64);
        assert_eq!(schema.field(3).name(), "total");
    }

    #[test]
    fn record_batch_shape() {
        let mut asm = OutputAssembler::new(vec!["A".into(), "B".into()]).unwrap();
        for d in 1..=3 {
            asm.push_row(ymd(2024, 1, d), vec![1.0, f64::from(d)]).unwrap();
        }
        let table = asm.finish();
        let schema = build_schema(table.units());
        let batch = table_to_record_batch(&table, &schema).unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 4);
    }
}
