//! Per-column summary statistics.

use serde::Serialize;

use crate::descriptive::{mean, median, quartiles, sd, sorted};
use crate::error::StatsError;

/// Location and spread of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (N-1); 0 for a single value.
    pub sd: f64,
    /// Median.
    pub median: f64,
    /// Interquartile range `Q75 - Q25`.
    pub iqr: f64,
}

/// Summarises `values`.
///
/// # Errors
///
/// Returns [`StatsError::EmptySeries`] if `values` is empty.
pub fn summarize(values: &[f64]) -> Result<ColumnSummary, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySeries);
    }
    let s = sorted(values);
    let (q1, q3) = quartiles(&s);
    Ok(ColumnSummary {
        mean: mean(values),
        sd: sd(values),
        median: median(&s),
        iqr: q3 - q1,
    })
}
