use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Quarry synthetic mining production generator.
#[derive(Parser)]
#[command(
    name = "quarry",
    version,
    about = "Synthetic daily production generator for mining units"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a production table from a configuration file.
    Generate(GenerateArgs),
    /// Summarise a generated table and flag anomalous days.
    Analyze(AnalyzeArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "quarry.toml")]
    pub config: PathBuf,

    /// Override output table path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (csv or parquet). Inferred from the path when absent.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Also write a line-chart spec JSON to this path.
    #[arg(long)]
    pub chart: Option<PathBuf>,
}

/// Arguments for the `analyze` subcommand.
#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Path to a CSV or Parquet table written by `generate`.
    #[arg(short, long)]
    pub input: PathBuf,

    /// TOML configuration whose [analysis] section supplies defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path for the report JSON. Printed to stdout when absent.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// First date counted (inclusive).
    #[arg(long)]
    pub from: Option<String>,

    /// Last date counted (inclusive).
    #[arg(long)]
    pub to: Option<String>,

    /// Column to analyse; repeatable. `Total` is accepted.
    #[arg(short, long = "unit")]
    pub units: Vec<String>,

    /// Detection method (iqr, z-score, moving-avg, grubbs); repeatable.
    #[arg(short, long = "method")]
    pub methods: Vec<String>,
}
