//! High-level table writer configuration and orchestration.

use std::fmt;
use std::path::Path;

use parquet::file::properties::WriterProperties;
use quarry_generate::OutputTable;
use tracing::info;

use crate::csv_write;
use crate::error::IoError;
use crate::parquet_write;

/// On-disk table format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated text with a header row.
    #[default]
    Csv,
    /// Apache Parquet with a typed Arrow schema.
    Parquet,
}

impl TableFormat {
    /// Guesses the format from a file extension (`.parquet`/`.pq`, otherwise CSV).
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("parquet" | "pq") => Self::Parquet,
            _ => Self::Csv,
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Parquet => write!(f, "parquet"),
        }
    }
}

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for writing a generated table.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Output format.
    format: TableFormat,
    /// Compression algorithm (Parquet only).
    compression: Compression,
    /// Maximum number of rows per row group (Parquet only).
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            format: TableFormat::default(),
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the output format.
    pub fn with_format(mut self, format: TableFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Returns the output format.
    pub fn format(&self) -> TableFormat {
        self.format
    }

    /// Returns the Parquet compression.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Writes `table` to `path` in the format selected by `config`.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// the format-specific error if writing fails.
pub fn write_table(path: &Path, table: &OutputTable, config: &WriterConfig) -> Result<(), IoError> {
    config.validate()?;

    match config.format {
        TableFormat::Csv => csv_write::write_csv(path, table)?,
        TableFormat::Parquet => write_parquet(path, table, config)?,
    }

    info!(
        path = %path.display(),
        format = %config.format,
        rows = table.day_count(),
        units = table.units().len(),
        "table written"
    );
    Ok(())
}

/// Writes `table` to a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Parquet`] if schema construction, batch conversion, or file I/O
/// fails.
pub fn write_parquet(path: &Path, table: &OutputTable, config: &WriterConfig) -> Result<(), IoError> {
    config.validate()?;

    let schema = parquet_write::build_schema(table.units());

    let compression = config.compression.to_parquet()?;
    let props = WriterProperties::builder()
        .set_compression(compression)
        .set_max_row_group_size(config.row_group_size)
        .build();

    let batch = parquet_write::table_to_record_batch(table, &schema)?;
    parquet_write::write_batch(path, &batch, &schema, props)
}
