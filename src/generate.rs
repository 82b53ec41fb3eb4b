//! Generate command: configuration file to production table.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use quarry_generate::{OutputTable, generate, render_detached};
use quarry_io::{ChartSpecRenderer, write_pretty_json, write_table};
use quarry_sampler::RngSource;
use quarry_stats::{ReportOptions, analyze};

use crate::cli::GenerateArgs;
use crate::config::{AnalysisToml, QuarryConfig};
use crate::convert;

/// Run the full generation pipeline.
pub fn run(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();

    // 1. Load config and apply CLI overrides
    let config = QuarryConfig::load(&args.config)?;
    let output = args.output.unwrap_or_else(|| config.output.path.clone());
    let seed = args.seed.or(config.seed);
    let chart = args.chart.or_else(|| config.output.chart.clone());

    // 2. Build and validate
    let generation = convert::build_config_draft(&config.generation, &config.events)
        .validate()
        .context("invalid generation config")?;
    let writer_cfg = convert::build_writer_config(&config.output, args.format.as_deref(), &output)?;

    // 3. Generate
    let mut source = RngSource::from_seed(seed);
    let table = generate(&generation, &mut source).context("generation failed")?;

    // 4. Write the table; failure here is fatal
    write_table(&output, &table, &writer_cfg)
        .with_context(|| format!("failed to write table: {}", output.display()))?;

    // 5. Chart spec; failure is logged only
    if let Some(path) = chart {
        let mut renderer = ChartSpecRenderer::new(path);
        if render_detached(&mut renderer, &table) {
            info!(path = %renderer.path().display(), "chart spec written");
        }
    }

    // 6. Inline analysis
    if config.analysis.enabled {
        let report_path = analysis_path(&output);
        run_analysis(&table, &config.analysis, &report_path)?;
    }

    Ok(())
}

fn run_analysis(table: &OutputTable, analysis: &AnalysisToml, path: &Path) -> Result<()> {
    let anomaly_cfg = convert::build_anomaly_config(analysis)?;
    let options = ReportOptions::new().with_units(analysis.units.iter().cloned());

    info!("running anomaly analysis");
    let report = analyze(table, &anomaly_cfg, &options).context("analysis failed")?;
    if report.total_anomalies > 0 {
        warn!(
            anomalies = report.total_anomalies,
            days = report.unique_anomaly_days,
            "anomalous days detected"
        );
    }

    write_pretty_json(path, &report)
        .with_context(|| format!("failed to write analysis: {}", path.display()))?;
    info!(path = %path.display(), "analysis written");
    Ok(())
}

/// `out/prod.csv` -> `out/prod.analysis.json`.
fn analysis_path(output: &Path) -> PathBuf {
    output.with_extension("analysis.json")
}
