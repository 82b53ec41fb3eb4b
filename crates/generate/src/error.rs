//! Error types for the quarry-generate crate.

use chrono::NaiveDate;

/// Fatal configuration problems. Generation does not start and no output
/// is written when validation returns one of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Returned when no usable start date was supplied.
    #[error("invalid start date: missing or unparseable")]
    MissingStartDate,

    /// Returned when the number of days to generate is not positive.
    #[error("invalid day count: {days} (must be > 0)")]
    NonPositiveDayCount {
        /// The rejected day count.
        days: i64,
    },

    /// Returned when the unit list is empty after dropping blank names.
    #[error("no unit names defined")]
    NoUnits,

    /// Returned when two units share a name after trimming.
    #[error("duplicate unit name: {name:?}")]
    DuplicateUnit {
        /// The repeated name.
        name: String,
    },

    /// Returned when the requested date range runs past the last
    /// representable date.
    #[error("date range out of bounds: {start} + {days} days")]
    DateRangeOutOfBounds {
        /// Requested start date.
        start: NaiveDate,
        /// Requested day count.
        days: usize,
    },
}

/// Errors raised when assembling an [`OutputTable`](crate::OutputTable)
/// from externally supplied rows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// Returned when a table is built without any unit columns.
    #[error("table has no unit columns")]
    NoUnits,

    /// Returned when two unit columns share a name.
    #[error("duplicate unit column: {name:?}")]
    DuplicateUnit {
        /// The repeated name.
        name: String,
    },

    /// Returned when a row's width does not match the unit count.
    #[error("row {row} has {got} values, expected {expected}")]
    WidthMismatch {
        /// Zero-based data row index.
        row: usize,
        /// Number of unit columns.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
}
