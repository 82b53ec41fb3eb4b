//! Generation parameters: the raw [`ConfigDraft`] and the validated
//! [`Configuration`].

use std::collections::HashSet;

use chrono::NaiveDate;
use quarry_calendar::{WeekdayMultipliers, nth_day};
use quarry_events::{Event, EventEngine};
use quarry_sampler::{Distribution, DistributionKind};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Uniform bounds used when both shape parameters are zero.
const DEFAULT_UNIFORM: (f64, f64) = (40.0, 60.0);
/// Normal mean / SD used when both shape parameters are zero.
const DEFAULT_NORMAL: (f64, f64) = (50.0, 20.0);

/// One event row as supplied by a configuration loader.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    day: Option<NaiveDate>,
    duration: f64,
    factor: f64,
    probability: f64,
}

impl EventDraft {
    /// Creates an event row.
    ///
    /// # Arguments
    ///
    /// * `day`: Window start, `None` when the source cell was blank or unparseable.
    /// * `duration`: Window length in days; floored during validation.
    /// * `factor`: Peak multiplier.
    /// * `probability`: Trigger probability; clamped to `[0, 1]` during validation.
    pub fn new(day: Option<NaiveDate>, duration: f64, factor: f64, probability: f64) -> Self {
        Self {
            day,
            duration,
            factor,
            probability,
        }
    }

    /// Converts the row into an [`Event`], or explains why it is dropped.
    fn resolve(&self) -> Result<Event, String> {
        let day = self.day.ok_or_else(|| "missing day".to_string())?;
        let duration = if self.duration.is_finite() {
            self.duration.floor()
        } else {
            0.0
        };
        if duration <= 0.0 {
            return Err(format!("non-positive duration {}", self.duration));
        }
        let duration = duration.min(f64::from(u32::MAX)) as u32;
        let probability = if self.probability.is_nan() {
            0.0
        } else {
            self.probability.clamp(0.0, 1.0)
        };
        Event::new(day, duration, self.factor, probability).map_err(|e| e.to_string())
    }
}

/// Unvalidated generation parameters.
///
/// Use the builder methods to fill in values, then call
/// [`validate`](Self::validate) to obtain a [`Configuration`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use quarry_generate::ConfigDraft;
/// use quarry_sampler::DistributionKind;
///
/// let config = ConfigDraft::new()
///     .with_start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .with_day_count(30)
///     .with_units(["North", "South"])
///     .with_distribution(DistributionKind::Uniform, 60.0, 40.0)
///     .validate()
///     .unwrap();
/// assert_eq!(config.distribution().params(), (40.0, 60.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigDraft {
    start_date: Option<NaiveDate>,
    day_count: i64,
    units: Vec<String>,
    kind: DistributionKind,
    p1: f64,
    p2: f64,
    correlation: f64,
    daily_growth_rate: f64,
    weekday_multipliers: Vec<Option<f64>>,
    events: Vec<EventDraft>,
}

impl ConfigDraft {
    /// Creates an empty draft: no start date, zero days, no units,
    /// Normal(0, 0) (defaults apply on validation), no smoothing, no
    /// growth, neutral weekdays, no events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first generated day.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets or clears the first generated day.
    pub fn with_start_date_opt(mut self, date: Option<NaiveDate>) -> Self {
        self.start_date = date;
        self
    }

    /// Sets the number of days to generate.
    pub fn with_day_count(mut self, days: i64) -> Self {
        self.day_count = days;
        self
    }

    /// Sets the unit names in column order. Blank names are dropped on validation.
    pub fn with_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units = units.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the distribution family and its two shape parameters.
    pub fn with_distribution(mut self, kind: DistributionKind, p1: f64, p2: f64) -> Self {
        self.kind = kind;
        self.p1 = p1;
        self.p2 = p2;
        self
    }

    /// Sets the day-to-day smoothing weight; clamped to `[0, 1]` on validation.
    pub fn with_correlation(mut self, correlation: f64) -> Self {
        self.correlation = correlation;
        self
    }

    /// Sets the fractional daily growth rate (`0.01` = 1 % per day).
    pub fn with_daily_growth_rate(mut self, rate: f64) -> Self {
        self.daily_growth_rate = rate;
        self
    }

    /// Sets up to seven Monday-first weekday multipliers.
    pub fn with_weekday_multipliers(mut self, multipliers: Vec<Option<f64>>) -> Self {
        self.weekday_multipliers = multipliers;
        self
    }

    /// Appends one event row.
    pub fn with_event(mut self, event: EventDraft) -> Self {
        self.events.push(event);
        self
    }

    /// Replaces all event rows.
    pub fn with_events(mut self, events: Vec<EventDraft>) -> Self {
        self.events = events;
        self
    }

    /// Validates and normalises the draft.
    ///
    /// Normalisation rules:
    /// - both shape parameters zero: Uniform 40/60, Normal 50/20;
    /// - Uniform bounds are swapped when min > max;
    /// - Normal SD <= 0 becomes `max(1, |mean| * 0.2)`;
    /// - non-finite shape parameters, correlation or growth count as zero;
    /// - correlation is clamped to `[0, 1]`;
    /// - unit names are trimmed, blanks dropped, and must be unique;
    /// - weekday entries that are missing or not positive become 1;
    /// - event rows without a day or with a non-positive duration are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the start date is missing, the day
    /// count is not positive, no non-blank unit names remain, a unit name
    /// repeats, or the date range is not representable.
    pub fn validate(self) -> Result<Configuration, ConfigError> {
        let start_date = self.start_date.ok_or(ConfigError::MissingStartDate)?;
        if self.day_count <= 0 {
            return Err(ConfigError::NonPositiveDayCount {
                days: self.day_count,
            });
        }
        let day_count = self.day_count as usize;
        if nth_day(start_date, (day_count - 1) as u64).is_err() {
            return Err(ConfigError::DateRangeOutOfBounds {
                start: start_date,
                days: day_count,
            });
        }

        let units: Vec<String> = self
            .units
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect();
        if units.is_empty() {
            return Err(ConfigError::NoUnits);
        }
        if let Some(name) = first_duplicate(&units) {
            return Err(ConfigError::DuplicateUnit {
                name: name.to_string(),
            });
        }

        let distribution = resolve_distribution(self.kind, finite_or_zero(self.p1), finite_or_zero(self.p2));
        let correlation = finite_or_zero(self.correlation).clamp(0.0, 1.0);
        let daily_growth_rate = finite_or_zero(self.daily_growth_rate);
        let weekday_multipliers = WeekdayMultipliers::from_entries(&self.weekday_multipliers);

        let mut events = Vec::with_capacity(self.events.len());
        for (idx, draft) in self.events.iter().enumerate() {
            match draft.resolve() {
                Ok(event) => events.push(event),
                Err(reason) => warn!(row = idx, %reason, "dropping malformed event"),
            }
        }

        debug!(
            %start_date,
            day_count,
            n_units = units.len(),
            ?distribution,
            correlation,
            daily_growth_rate,
            n_events = events.len(),
            "configuration validated"
        );

        Ok(Configuration {
            start_date,
            day_count,
            units,
            distribution,
            correlation,
            daily_growth_rate,
            weekday_multipliers,
            events: EventEngine::new(events),
        })
    }
}

/// Returns the first name that occurs more than once.
pub(crate) fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .find(|n| !seen.insert(n.as_str()))
        .map(String::as_str)
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

/// Applies the distribution defaults and parameter coercions.
fn resolve_distribution(kind: DistributionKind, p1: f64, p2: f64) -> Distribution {
    match kind {
        DistributionKind::Uniform => {
            let (mut min, mut max) = if p1 == 0.0 && p2 == 0.0 {
                DEFAULT_UNIFORM
            } else {
                (p1, p2)
            };
            if max < min {
                std::mem::swap(&mut min, &mut max);
            }
            Distribution::Uniform { min, max }
        }
        DistributionKind::Normal => {
            let (mean, mut sd) = if p1 == 0.0 && p2 == 0.0 {
                DEFAULT_NORMAL
            } else {
                (p1, p2)
            };
            if sd <= 0.0 {
                sd = (mean.abs() * 0.2).max(1.0);
            }
            Distribution::Normal { mean, sd }
        }
    }
}

/// Validated, immutable generation parameters.
#[derive(Debug, Clone)]
pub struct Configuration {
    start_date: NaiveDate,
    day_count: usize,
    units: Vec<String>,
    distribution: Distribution,
    correlation: f64,
    daily_growth_rate: f64,
    weekday_multipliers: WeekdayMultipliers,
    events: EventEngine,
}

impl Configuration {
    /// Returns the first generated day.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the number of generated days (at least 1).
    pub fn day_count(&self) -> usize {
        self.day_count
    }

    /// Returns the unit names in column order (at least one, none blank).
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Returns the sampling distribution.
    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    /// Returns the smoothing weight in `[0, 1]`.
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    /// Returns the fractional daily growth rate.
    pub fn daily_growth_rate(&self) -> f64 {
        self.daily_growth_rate
    }

    /// Returns the Monday-first weekday multipliers.
    pub fn weekday_multipliers(&self) -> &WeekdayMultipliers {
        &self.weekday_multipliers
    }

    /// Returns the surviving events in configured order.
    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    /// Returns the engine that applies the events.
    pub fn event_engine(&self) -> &EventEngine {
        &self.events
    }

    /// Iterates over the generated dates.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date.iter_days().take(self.day_count)
    }
}
