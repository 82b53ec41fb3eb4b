//! Column summaries plus anomaly counts for a generated table.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use quarry_generate::{OutputTable, TOTAL_HEADER};
use serde::Serialize;
use tracing::{debug, info};

use crate::anomaly::{AnomalyConfig, AnomalyMethod, detect};
use crate::error::StatsError;
use crate::summary::{ColumnSummary, summarize};

/// Which part of a table a report covers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOptions {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    units: Vec<String>,
}

impl ReportOptions {
    /// Covers every date and every unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first counted date (inclusive).
    pub fn with_from(mut self, from: Option<NaiveDate>) -> Self {
        self.from = from;
        self
    }

    /// Sets the last counted date (inclusive).
    pub fn with_to(mut self, to: Option<NaiveDate>) -> Self {
        self.to = to;
        self
    }

    /// Restricts the report to the named columns; empty selects all units.
    /// `Total` may be selected like a unit.
    pub fn with_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units = units.into_iter().map(Into::into).collect();
        self
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|f| date >= f) && self.to.is_none_or(|t| date <= t)
    }
}

/// Summary statistics of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSummary {
    /// Column name.
    pub name: String,
    /// Statistics over the whole table.
    #[serde(flatten)]
    pub summary: ColumnSummary,
}

/// Anomalies found in one column within the date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitAnomalies {
    /// Column name.
    pub name: String,
    /// Number of flagged days.
    pub count: usize,
    /// Flagged dates in ascending order.
    pub dates: Vec<NaiveDate>,
}

/// Result of [`analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// First counted date, if restricted.
    pub from: Option<NaiveDate>,
    /// Last counted date, if restricted.
    pub to: Option<NaiveDate>,
    /// Number of table rows inside the date range.
    pub rows_in_range: usize,
    /// Methods that were applied.
    pub methods: Vec<AnomalyMethod>,
    /// Statistics for the selected columns plus `Total`.
    pub summaries: Vec<NamedSummary>,
    /// Per-column anomaly counts.
    pub anomalies: Vec<UnitAnomalies>,
    /// Sum of the per-column counts.
    pub total_anomalies: usize,
    /// Days with at least one flagged column.
    pub unique_anomaly_days: usize,
}

/// Summarises `table` and counts anomalies.
///
/// Statistics and detection run over the whole table; the date range
/// only limits which flagged days are counted.
///
/// # Errors
///
/// Returns [`StatsError::InvertedRange`] for `from > to`,
/// [`StatsError::UnknownUnit`] for a selection that is not a column,
/// [`StatsError::EmptySeries`] for an empty table, or any detection error.
pub fn analyze(
    table: &OutputTable,
    config: &AnomalyConfig,
    options: &ReportOptions,
) -> Result<AnalysisReport, StatsError> {
    if let (Some(from), Some(to)) = (options.from, options.to) {
        if from > to {
            return Err(StatsError::InvertedRange { from, to });
        }
    }
    config.validate()?;

    let selected: Vec<String> = if options.units.is_empty() {
        table.units().to_vec()
    } else {
        options.units.clone()
    };
    let columns = selected
        .iter()
        .map(|name| column(table, name).map(|values| (name.clone(), values)))
        .collect::<Result<Vec<_>, _>>()?;

    let dates = table.dates();
    let in_range: Vec<bool> = dates.iter().map(|&d| options.contains(d)).collect();

    let mut summaries = Vec::with_capacity(columns.len() + 1);
    for (name, values) in &columns {
        summaries.push(NamedSummary {
            name: name.clone(),
            summary: summarize(values)?,
        });
    }
    if !selected.iter().any(|s| s == TOTAL_HEADER) {
        summaries.push(NamedSummary {
            name: TOTAL_HEADER.to_string(),
            summary: summarize(&table.totals())?,
        });
    }

    let mut anomalies = Vec::with_capacity(columns.len());
    let mut flagged_days: BTreeSet<NaiveDate> = BTreeSet::new();
    for (name, values) in &columns {
        let flags = detect(values, config)?;
        let hits: Vec<NaiveDate> = flags
            .iter()
            .zip(&dates)
            .zip(&in_range)
            .filter(|((flag, _), keep)| **flag && **keep)
            .map(|((_, date), _)| *date)
            .collect();
        debug!(unit = %name, count = hits.len(), "anomalies counted");
        flagged_days.extend(hits.iter().copied());
        anomalies.push(UnitAnomalies {
            name: name.clone(),
            count: hits.len(),
            dates: hits,
        });
    }

    let total_anomalies = anomalies.iter().map(|a| a.count).sum();
    let report = AnalysisReport {
        from: options.from,
        to: options.to,
        rows_in_range: in_range.iter().filter(|&&k| k).count(),
        methods: config.methods().to_vec(),
        summaries,
        anomalies,
        total_anomalies,
        unique_anomaly_days: flagged_days.len(),
    };
    info!(
        columns = report.anomalies.len(),
        total = report.total_anomalies,
        unique_days = report.unique_anomaly_days,
        "analysis complete"
    );
    Ok(report)
}

/// Returns the values of a unit column or `Total`.
fn column(table: &OutputTable, name: &str) -> Result<Vec<f64>, StatsError> {
    if name == TOTAL_HEADER {
        return Ok(table.totals());
    }
    table
        .column_by_name(name)
        .ok_or_else(|| StatsError::UnknownUnit {
            name: name.to_string(),
        })
}
