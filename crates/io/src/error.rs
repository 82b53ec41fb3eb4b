//! Error types for quarry-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the quarry-io crate.
///
/// Covers filesystem failures, format-specific errors from CSV, Parquet
/// and JSON, and layout problems found when reading a table back.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file cannot be created, opened or written.
    #[error("cannot access {}: {reason}", path.display())]
    Access {
        /// Path of the file.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Wraps an error originating from the csv crate.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Wraps a JSON serialisation failure.
    #[error("json error: {reason}")]
    Json {
        /// Description of the underlying serde_json failure.
        reason: String,
    },

    /// Returned when a date cell cannot be parsed.
    #[error("row {row}: invalid date '{value}'")]
    InvalidDate {
        /// One-based data row.
        row: usize,
        /// Offending cell.
        value: String,
    },

    /// Returned when a numeric cell cannot be parsed.
    #[error("row {row}, column '{column}': invalid number '{value}'")]
    InvalidNumber {
        /// One-based data row.
        row: usize,
        /// Column header.
        column: String,
        /// Offending cell.
        value: String,
    },

    /// Returned when the header or schema does not have the expected layout.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Wraps an error raised while reassembling a table.
    #[error("table error: {reason}")]
    Table {
        /// Description of the underlying table failure.
        reason: String,
    },
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            reason: e.to_string(),
        }
    }
}

impl From<quarry_generate::TableError> for IoError {
    fn from(e: quarry_generate::TableError) -> Self {
        IoError::Table {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn display_access() {
        let err = IoError::Access {
            path: PathBuf::from("/ro/out.json"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "cannot access /ro/out.json: permission denied");
    }

    #[test]
    fn display_invalid_number() {
        let err = IoError::InvalidNumber {
            row: 3,
            column: "North".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "row 3, column 'North': invalid number 'abc'"
        );
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "first column must be 'Date'; last column must be 'Total'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): first column must be 'Date'; last column must be 'Total'"
        );
    }

    #[test]
    fn from_parquet_error() {
        let pq_err = parquet::errors::ParquetError::General("test pq error".to_string());
        let err: IoError = pq_err.into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("test pq error"));
    }

    #[test]
    fn from_table_error() {
        let err: IoError = quarry_generate::TableError::NoUnits.into();
        assert!(matches!(err, IoError::Table { .. }));
        assert!(err.to_string().contains("no unit columns"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
