//! The per-(day, unit) generation pipeline.

use chrono::NaiveDate;
use quarry_sampler::RandomSource;
use tracing::{debug, info};

use crate::config::Configuration;
use crate::error::TableError;
use crate::table::{OutputAssembler, OutputTable};

/// Stateful generator over a validated [`Configuration`].
///
/// Holds the previous smoothed (pre-trend) value of every unit. Days must
/// be generated in order starting from index 0.
#[derive(Debug, Clone)]
pub struct SeriesGenerator<'a> {
    config: &'a Configuration,
    prev: Vec<Option<f64>>,
}

impl<'a> SeriesGenerator<'a> {
    /// Creates a generator with no smoothing history.
    pub fn new(config: &'a Configuration) -> Self {
        Self {
            config,
            prev: vec![None; config.units().len()],
        }
    }

    /// Returns each unit's last smoothed, pre-trend value.
    pub fn smoothed_state(&self) -> &[Option<f64>] {
        &self.prev
    }

    /// Generates the unit values for day index `i` falling on `date`.
    ///
    /// Per unit: draw, coerce, weekday multiplier, smoothing (the smoothed
    /// value is stored as the next `prev`), compound growth, gated events,
    /// final clamp to a finite non-negative value.
    pub fn generate_day<S: RandomSource + ?Sized>(
        &mut self,
        i: usize,
        date: NaiveDate,
        source: &mut S,
    ) -> Vec<f64> {
        let cfg = self.config;
        let distribution = cfg.distribution();
        let fallback = distribution.params().0.abs();
        let weekday = cfg.weekday_multipliers().for_date(date);
        let correlation = cfg.correlation();
        let trend = (1.0 + cfg.daily_growth_rate()).powf(i as f64);
        let engine = cfg.event_engine();

        self.prev
            .iter_mut()
            .map(|prev| {
                let mut val = distribution.sample(source);
                if !val.is_finite() {
                    val = fallback;
                }
                if val < 0.0 {
                    val = val.abs();
                }

                val *= weekday;

                if let Some(p) = *prev {
                    val = (1.0 - correlation) * val + correlation * p;
                }
                *prev = Some(val);

                val *= trend;
                val = engine.apply(date, val, source);

                if val.is_finite() && val >= 0.0 { val } else { 0.0 }
            })
            .collect()
    }
}

/// Generates the full table for `config`, drawing all randomness from
/// `source`.
///
/// Days are generated in order and, within a day, units in configured
/// order, so a fixed `source` reproduces the table exactly.
///
/// # Errors
///
/// Returns [`TableError`] only if the assembler rejects a row, which a
/// validated configuration never produces.
pub fn generate<S: RandomSource + ?Sized>(
    config: &Configuration,
    source: &mut S,
) -> Result<OutputTable, TableError> {
    info!(
        start = %config.start_date(),
        days = config.day_count(),
        units = config.units().len(),
        events = config.events().len(),
        "generating series"
    );

    let mut generator = SeriesGenerator::new(config);
    let mut assembler =
        OutputAssembler::with_capacity(config.units().to_vec(), config.day_count())?;

    for (i, date) in config.dates().enumerate() {
        let values = generator.generate_day(i, date, source);
        assembler.push_row(date, values)?;
    }

    let table = assembler.finish();
    debug!(rows = table.day_count(), "series generated");
    Ok(table)
}
