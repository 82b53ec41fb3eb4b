//! Error types for quarry-stats.

use chrono::NaiveDate;

/// Errors raised by summary statistics, anomaly detection and reporting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// Returned when a statistic is requested for an empty series.
    #[error("series is empty")]
    EmptySeries,

    /// Returned when a detection parameter is out of range.
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// Returned when an anomaly method label is not recognised.
    #[error("unknown anomaly method '{name}' (expected iqr, z-score, moving-avg or grubbs)")]
    UnknownMethod {
        /// The rejected label.
        name: String,
    },

    /// Returned when a selected unit is not a column of the table.
    #[error("unknown unit '{name}'")]
    UnknownUnit {
        /// The rejected unit name.
        name: String,
    },

    /// Returned when the report date range is inverted.
    #[error("invalid date range: {from} is after {to}")]
    InvertedRange {
        /// Start of the requested range.
        from: NaiveDate,
        /// End of the requested range.
        to: NaiveDate,
    },

    /// Wraps a failure building a reference distribution.
    #[error("distribution error: {reason}")]
    Distribution {
        /// Description of the statrs failure.
        reason: String,
    },
}
