//! # quarry-io
//!
//! Write generated production tables to CSV or Parquet, read them back
//! for analysis, and describe them as a line chart in JSON.

mod chart;
mod csv_read;
mod csv_write;
mod error;
mod parquet_read;
mod parquet_write;
mod reader;
mod writer;

pub use chart::{
    AxisFormat, CHART_TITLE, ChartOptions, ChartSpec, ChartSpecRenderer, DomainSeries, Legend,
    LineSeries, write_pretty_json,
};
pub use csv_read::read_csv;
pub use csv_write::write_csv;
pub use error::IoError;
pub use parquet_read::read_parquet;
pub use reader::read_table;
pub use writer::{Compression, TableFormat, WriterConfig, write_parquet, write_table};
