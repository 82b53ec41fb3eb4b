//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::Path;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use tracing::warn;

use crate::config::*;

use quarry_calendar::parse_date;
use quarry_generate::{ConfigDraft, EventDraft};
use quarry_io::{Compression, TableFormat, WriterConfig};
use quarry_sampler::DistributionKind;
use quarry_stats::{AnomalyConfig, AnomalyMethod};

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Parses a table format name string into the corresponding enum variant.
pub fn parse_format(s: &str) -> Result<TableFormat> {
    match s.to_lowercase().as_str() {
        "csv" => Ok(TableFormat::Csv),
        "parquet" => Ok(TableFormat::Parquet),
        other => bail!("unknown output format: {other:?}"),
    }
}

/// Parses anomaly method labels.
pub fn parse_methods(labels: &[String]) -> Result<Vec<AnomalyMethod>> {
    labels
        .iter()
        .map(|l| l.parse::<AnomalyMethod>().map_err(anyhow::Error::from))
        .collect()
}

/// Parses an optional CLI date bound.
pub fn parse_date_arg(s: Option<&str>) -> Result<Option<NaiveDate>> {
    match s {
        None => Ok(None),
        Some(s) => Ok(Some(parse_date(s)?)),
    }
}

/// Builds a [`ConfigDraft`] from the TOML generation and event sections.
///
/// Unparseable dates are passed on as missing: the start date then fails
/// validation and the event row is dropped.
pub fn build_config_draft(generation: &GenerationToml, events: &[EventToml]) -> ConfigDraft {
    let start_date = generation
        .start_date
        .as_deref()
        .and_then(|s| lenient_date("start_date", s));

    let events = events
        .iter()
        .map(|e| {
            let day = e.day.as_deref().and_then(|s| lenient_date("event day", s));
            EventDraft::new(day, e.duration, e.factor, e.probability)
        })
        .collect();

    ConfigDraft::new()
        .with_start_date_opt(start_date)
        .with_day_count(generation.days)
        .with_units(generation.units.iter().cloned())
        .with_distribution(
            DistributionKind::from_label(&generation.distribution),
            generation.p1,
            generation.p2,
        )
        .with_correlation(generation.correlation)
        .with_daily_growth_rate(generation.daily_growth_percent / 100.0)
        .with_weekday_multipliers(generation.weekday_multipliers.iter().copied().map(Some).collect())
        .with_events(events)
}

fn lenient_date(field: &str, s: &str) -> Option<NaiveDate> {
    match parse_date(s) {
        Ok(d) => Some(d),
        Err(e) => {
            warn!(field, value = s, error = %e, "ignoring unparseable date");
            None
        }
    }
}

/// Builds a [`WriterConfig`] from the TOML output configuration.
///
/// An explicit format wins; otherwise it is inferred from `path`.
pub fn build_writer_config(
    output: &OutputToml,
    format: Option<&str>,
    path: &Path,
) -> Result<WriterConfig> {
    let format = match format.or(output.format.as_deref()) {
        Some(f) => parse_format(f)?,
        None => TableFormat::from_path(path),
    };
    let compression = parse_compression(&output.compression)?;
    Ok(WriterConfig::default()
        .with_format(format)
        .with_compression(compression)
        .with_row_group_size(output.row_group_size))
}

/// Builds an [`AnomalyConfig`] from the TOML analysis configuration.
pub fn build_anomaly_config(analysis: &AnalysisToml) -> Result<AnomalyConfig> {
    let config = AnomalyConfig::new()
        .with_methods(parse_methods(&analysis.methods)?)
        .with_z_threshold(analysis.z_threshold)
        .with_ma_window(analysis.ma_window)
        .with_ma_percent(analysis.ma_percent)
        .with_iqr_factor(analysis.iqr_factor)
        .with_grubbs_alpha(analysis.grubbs_alpha);
    config.validate()?;
    Ok(config)
}
