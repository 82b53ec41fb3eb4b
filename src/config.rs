use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level quarry configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuarryConfig {
    /// Global RNG seed. Fresh OS randomness when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Generation parameters.
    #[serde(default)]
    pub generation: GenerationToml,

    /// Transient events, applied in listed order.
    #[serde(default)]
    pub events: Vec<EventToml>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,

    /// Inline analysis settings.
    #[serde(default)]
    pub analysis: AnalysisToml,
}

impl QuarryConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GenerationToml {
    pub start_date: Option<String>,
    #[serde(default)]
    pub days: i64,
    #[serde(default)]
    pub units: Vec<String>,
    #[serde(default = "default_distribution")]
    pub distribution: String,
    #[serde(default)]
    pub p1: f64,
    #[serde(default)]
    pub p2: f64,
    #[serde(default)]
    pub correlation: f64,
    #[serde(default)]
    pub daily_growth_percent: f64,
    #[serde(default)]
    pub weekday_multipliers: Vec<f64>,
}

fn default_distribution() -> String {
    "Normal".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventToml {
    pub day: Option<String>,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub factor: f64,
    #[serde(default)]
    pub probability: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub chart: Option<PathBuf>,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: None,
            chart: None,
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("generated.csv")
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisToml {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,
    #[serde(default = "default_z_threshold")]
    pub z_threshold: f64,
    #[serde(default = "default_ma_window")]
    pub ma_window: usize,
    #[serde(default = "default_ma_percent")]
    pub ma_percent: f64,
    #[serde(default = "default_iqr_factor")]
    pub iqr_factor: f64,
    #[serde(default = "default_grubbs_alpha")]
    pub grubbs_alpha: f64,
    #[serde(default)]
    pub units: Vec<String>,
}

impl Default for AnalysisToml {
    fn default() -> Self {
        Self {
            enabled: false,
            methods: default_methods(),
            z_threshold: default_z_threshold(),
            ma_window: default_ma_window(),
            ma_percent: default_ma_percent(),
            iqr_factor: default_iqr_factor(),
            grubbs_alpha: default_grubbs_alpha(),
            units: Vec::new(),
        }
    }
}

fn default_methods() -> Vec<String> {
    vec!["iqr".to_string(), "z-score".to_string()]
}
fn default_z_threshold() -> f64 {
    3.0
}
fn default_ma_window() -> usize {
    7
}
fn default_ma_percent() -> f64 {
    0.2
}
fn default_iqr_factor() -> f64 {
    1.5
}
fn default_grubbs_alpha() -> f64 {
    0.05
}
