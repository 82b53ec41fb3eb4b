//! Line-chart description of a generated table, serialised as JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use quarry_generate::{DATE_HEADER, OutputTable, Renderer};
use serde::Serialize;
use tracing::debug;

use crate::error::IoError;

/// Chart title.
pub const CHART_TITLE: &str = "Generated Mining Output";

/// Legend placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    /// Where the legend is drawn.
    pub position: String,
}

/// Horizontal axis formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisFormat {
    /// Date pattern for tick labels.
    pub format: String,
}

/// Display options of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    /// Chart title.
    pub title: String,
    /// `"function"` for smoothed lines.
    pub curve_type: String,
    /// Legend placement.
    pub legend: Legend,
    /// X-axis formatting.
    pub h_axis: AxisFormat,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: CHART_TITLE.to_string(),
            curve_type: "function".to_string(),
            legend: Legend {
                position: "right".to_string(),
            },
            h_axis: AxisFormat {
                format: "yyyy-MM-dd".to_string(),
            },
        }
    }
}

/// X-axis domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainSeries {
    /// Axis label.
    pub label: String,
    /// One date per row.
    pub values: Vec<NaiveDate>,
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    /// Unit name.
    pub name: String,
    /// One value per date.
    pub values: Vec<f64>,
}

/// Renderer-agnostic line-chart description: dates on the x-axis, one
/// line per unit. The total column is not plotted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    /// Always `"line"`.
    pub chart_type: String,
    /// Display options.
    pub options: ChartOptions,
    /// Number of header rows in the source range.
    pub num_headers: u32,
    /// X-axis values.
    pub domain: DomainSeries,
    /// Y-series in unit order.
    pub series: Vec<LineSeries>,
}

impl ChartSpec {
    /// Builds the chart description for `table`.
    pub fn from_table(table: &OutputTable) -> Self {
        let view = table.chart_series();
        Self {
            chart_type: "line".to_string(),
            options: ChartOptions::default(),
            num_headers: 1,
            domain: DomainSeries {
                label: DATE_HEADER.to_string(),
                values: view.dates,
            },
            series: view
                .series
                .into_iter()
                .map(|s| LineSeries {
                    name: s.name,
                    values: s.values,
                })
                .collect(),
        }
    }

    /// Serialises the spec as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Json`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the spec as pretty JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Access`] if the file cannot be written, or
    /// [`IoError::Json`] if serialisation fails.
    pub fn write_json(&self, path: &Path) -> Result<(), IoError> {
        write_pretty_json(path, self)
    }
}

/// Writes any serialisable value as pretty JSON to `path`.
///
/// # Errors
///
/// Returns [`IoError::Access`] if the file cannot be created or flushed,
/// or [`IoError::Json`] if serialisation fails.
pub fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), IoError> {
    let access = |e: std::io::Error| IoError::Access {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    let file = File::create(path).map_err(access)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n").map_err(access)?;
    out.flush().map_err(access)?;
    Ok(())
}

/// Presents a table by writing its [`ChartSpec`] to a JSON file.
#[derive(Debug, Clone)]
pub struct ChartSpecRenderer {
    path: PathBuf,
}

impl ChartSpecRenderer {
    /// Creates a renderer writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Renderer for ChartSpecRenderer {
    type Error = IoError;

    fn render(&mut self, table: &OutputTable) -> Result<(), IoError> {
        let spec = ChartSpec::from_table(table);
        spec.write_json(&self.path)?;
        debug!(path = %self.path.display(), series = spec.series.len(), "chart spec written");
        Ok(())
    }

    fn name(&self) -> &str {
        "chart-spec"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_generate::{OutputAssembler, render_detached};

    fn table() -> OutputTable {
        let mut asm = OutputAssembler::new(vec!["North".into(), "South".into()]).unwrap();
        asm.push_row(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), vec![1.0, 2.0])
            .unwrap();
        asm.push_row(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), vec![3.0, 4.0])
            .unwrap();
        asm.finish()
    }

    #[test]
    fn spec_layout() {
        let spec = ChartSpec::from_table(&table());
        assert_eq!(spec.options.title, "Generated Mining Output");
        assert_eq!(spec.num_headers, 1);
        assert_eq!(spec.domain.values.len(), 2);
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[1].name, "South");
        assert_eq!(spec.series[1].values, vec![2.0, 4.0]);
    }

    #[test]
    fn json_field_names() {
        let json: serde_json::Value =
            serde_json::from_str(&ChartSpec::from_table(&table()).to_json().unwrap()).unwrap();
        assert_eq!(json["chartType"], "line");
        assert_eq!(json["options"]["curveType"], "function");
        assert_eq!(json["options"]["legend"]["position"], "right");
        assert_eq!(json["options"]["hAxis"]["format"], "yyyy-MM-dd");
        assert_eq!(json["numHeaders"], 1);
        assert_eq!(json["domain"]["values"][0], "2024-01-01");
        assert_eq!(json["series"][0]["name"], "North");
    }

    #[test]
    fn renderer_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        let mut renderer = ChartSpecRenderer::new(&path);
        assert!(render_detached(&mut renderer, &table()));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Generated Mining Output"));
    }

    #[test]
    fn renderer_failure_is_detached() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = ChartSpecRenderer::new(dir.path().join("missing").join("chart.json"));
        let t = table();
        assert!(!render_detached(&mut renderer, &t));
        assert!(matches!(renderer.render(&t), Err(IoError::Access { .. })));
    }
}
