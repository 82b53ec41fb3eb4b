//! Summary statistics and anomaly detection for generated production tables.
//!
//! [`analyze`] produces an [`AnalysisReport`]: mean, SD, median and IQR for
//! each selected column plus `Total`, and per-column anomaly counts from
//! any combination of IQR fences, z-scores, centred moving-average
//! distance and Grubbs' test.

mod anomaly;
mod descriptive;
mod error;
mod report;
mod summary;

pub use anomaly::{
    AnomalyConfig, AnomalyMethod, centred_moving_average, detect, grubbs_critical, grubbs_flags,
    iqr_flags, moving_average_flags, zscore_flags,
};
pub use descriptive::{mean, median, population_sd, quantile_type7, quartiles, sd, sorted, variance};
pub use error::StatsError;
pub use report::{AnalysisReport, NamedSummary, ReportOptions, UnitAnomalies, analyze};
pub use summary::{ColumnSummary, summarize};
