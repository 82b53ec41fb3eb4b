//! Analyze command: summaries and anomaly counts for a written table.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use quarry_io::{read_table, write_pretty_json};
use quarry_stats::{AnalysisReport, ReportOptions, analyze};

use crate::cli::AnalyzeArgs;
use crate::config::{AnalysisToml, QuarryConfig};
use crate::convert;

/// Run the standalone analysis.
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let _cmd = info_span!("analyze").entered();
    let report = build_report(&args)?;

    match &args.output {
        Some(path) => {
            write_pretty_json(path, &report)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => {
            let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn build_report(args: &AnalyzeArgs) -> Result<AnalysisReport> {
    // 1. Settings: config file first, CLI flags override
    let mut analysis = match &args.config {
        Some(path) => QuarryConfig::load(path)?.analysis,
        None => AnalysisToml::default(),
    };
    if !args.methods.is_empty() {
        analysis.methods = args.methods.clone();
    }
    if !args.units.is_empty() {
        analysis.units = args.units.clone();
    }
    let anomaly_cfg = convert::build_anomaly_config(&analysis)?;

    let options = ReportOptions::new()
        .with_from(convert::parse_date_arg(args.from.as_deref()).context("invalid --from")?)
        .with_to(convert::parse_date_arg(args.to.as_deref()).context("invalid --to")?)
        .with_units(analysis.units.iter().cloned());

    // 2. Read table
    info!(path = %args.input.display(), "reading table");
    let table = read_table(&args.input)
        .with_context(|| format!("failed to read table: {}", args.input.display()))?;
    info!(rows = table.day_count(), units = table.units().len(), "table loaded");

    // 3. Analyse
    analyze(&table, &anomaly_cfg, &options).context("analysis failed")
}
