//! # quarry-generate
//!
//! Synthetic daily production series for multiple independent units.
//!
//! A [`ConfigDraft`] is validated into a [`Configuration`], which
//! [`generate`] turns into an [`OutputTable`] (`Date | unit... | Total`)
//! using randomness drawn from an injected
//! [`RandomSource`](quarry_sampler::RandomSource).
//!
//! # Pipeline Order
//!
//! For each day `i` and each unit, in order:
//!
//! 1. **Draw**: Normal (Box-Muller) or Uniform
//! 2. **Coerce**: non-finite to `|p1|`, negative to `|x|`
//! 3. **Weekday**: Monday-first multiplier of the day's date
//! 4. **Smoothing**: blend with the unit's previous smoothed value
//! 5. **Trend**: `(1 + rate)^i`
//! 6. **Events**: gated Gaussian multipliers, configured order
//! 7. **Clamp**: non-finite or negative to 0
//!
//! # Quick start
//!
//! ```
//! use chrono::NaiveDate;
//! use quarry_generate::{ConfigDraft, generate};
//! use quarry_sampler::{DistributionKind, SequenceSource};
//!
//! let config = ConfigDraft::new()
//!     .with_start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .with_day_count(1)
//!     .with_units(["A"])
//!     .with_distribution(DistributionKind::Uniform, 10.0, 10.0)
//!     .validate()
//!     .unwrap();
//! let mut source = SequenceSource::constant(0.5).unwrap();
//! let table = generate(&config, &mut source).unwrap();
//! assert_eq!(table.header(), vec!["Date", "A", "Total"]);
//! assert_eq!(table.totals(), vec![10.0]);
//! ```

mod config;
mod error;
mod generator;
mod render;
mod table;

pub use config::{ConfigDraft, Configuration, EventDraft};
pub use error::{ConfigError, TableError};
pub use generator::{SeriesGenerator, generate};
pub use render::{Renderer, render_detached};
pub use table::{
    Cell, ChartSeries, DATE_HEADER, NamedSeries, OutputAssembler, OutputTable, TOTAL_HEADER,
    TableRow,
};
