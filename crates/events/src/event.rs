//! A single transient event and its Gaussian influence profile.

use chrono::NaiveDate;

use crate::error::EventError;

/// Lower bound on the Gaussian width, in days.
const MIN_SIGMA: f64 = 0.1;

/// A transient event (outage, surge) with a localized influence window.
///
/// The window is the inclusive day range `[day, day + duration]`. Inside
/// it the multiplier follows a Gaussian bump centred on the window
/// midpoint, reaching `factor` exactly at the midpoint and relaxing
/// towards 1 at the edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    day: NaiveDate,
    duration: u32,
    factor: f64,
    probability: f64,
}

impl Event {
    /// Creates a new event.
    ///
    /// # Arguments
    ///
    /// * `day`: First day of the window.
    /// * `duration`: Window length in days; the window spans `duration + 1` dates.
    /// * `factor`: Peak multiplier at the window midpoint.
    /// * `probability`: Chance in `[0, 1]` that the multiplier applies to a given value.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] if `duration` is zero, `factor` is not
    /// finite, or `probability` is outside `[0, 1]`.
    pub fn new(
        day: NaiveDate,
        duration: u32,
        factor: f64,
        probability: f64,
    ) -> Result<Self, EventError> {
        if duration == 0 {
            return Err(EventError::NonPositiveDuration { duration: 0 });
        }
        if !factor.is_finite() {
            return Err(EventError::NonFiniteFactor { factor });
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(EventError::InvalidProbability { probability });
        }
        Ok(Self {
            day,
            duration,
            factor,
            probability,
        })
    }

    /// Returns the first day of the window.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Returns the window length in days.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Returns the peak multiplier.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Returns the per-value trigger probability.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Returns the whole-day offset of `date` into the window, or `None`
    /// if the event is not active on `date`.
    pub fn offset(&self, date: NaiveDate) -> Option<i64> {
        let diff = (date - self.day).num_days();
        (0..=i64::from(self.duration)).contains(&diff).then_some(diff)
    }

    /// Returns the ungated multiplier at a window offset.
    ///
    /// `x = diff - duration / 2`, `sigma = max(duration / 4, 0.1)`,
    /// `multiplier = 1 + (factor - 1) * exp(-x^2 / (2 sigma^2))`.
    pub fn multiplier_at(&self, diff: i64) -> f64 {
        let duration = f64::from(self.duration);
        let x = diff as f64 - duration / 2.0;
        let sigma = (duration / 4.0).max(MIN_SIGMA);
        let gauss = (-(x * x) / (2.0 * sigma * sigma)).exp();
        1.0 + (self.factor - 1.0) * gauss
    }

    /// Returns the ungated multiplier on `date`, or `None` if inactive.
    pub fn multiplier_on(&self, date: NaiveDate) -> Option<f64> {
        self.offset(date).map(|diff| self.multiplier_at(diff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(duration: u32, factor: f64) -> Event {
        Event::new(ymd(2024, 3, 1), duration, factor, 1.0).unwrap()
    }

    #[test]
    fn rejects_zero_duration() {
        assert_eq!(
            Event::new(ymd(2024, 1, 1), 0, 2.0, 0.5).unwrap_err(),
            EventError::NonPositiveDuration { duration: 0 }
        );
    }

    #[test]
    fn rejects_bad_probability() {
        assert!(Event::new(ymd(2024, 1, 1), 3, 2.0, 1.01).is_err());
        assert!(Event::new(ymd(2024, 1, 1), 3, 2.0, -0.01).is_err());
        assert!(Event::new(ymd(2024, 1, 1), 3, 2.0, f64::NAN).is_err());
    }

    #[test]
    fn rejects_non_finite_factor() {
        assert!(Event::new(ymd(2024, 1, 1), 3, f64::INFINITY, 0.5).is_err());
    }

    #[test]
    fn window_is_inclusive() {
        let e = event(4, 2.0);
        assert_eq!(e.offset(ymd(2024, 2, 29)), None);
        assert_eq!(e.offset(ymd(2024, 3, 1)), Some(0));
        assert_eq!(e.offset(ymd(2024, 3, 5)), Some(4));
        assert_eq!(e.offset(ymd(2024, 3, 6)), None);
    }

    #[test]
    fn peak_at_midpoint() {
        let e = event(4, 2.0);
        assert_eq!(e.multiplier_at(2), 2.0);
    }

    #[test]
    fn symmetric_around_midpoint() {
        let e = event(6, 0.3);
        assert_relative_eq!(e.multiplier_at(1), e.multiplier_at(5), epsilon = 1e-12);
        assert_relative_eq!(e.multiplier_at(0), e.multiplier_at(6), epsilon = 1e-12);
    }

    #[test]
    fn edges_relax_towards_one() {
        // duration 4: sigma = 1, x = -2 at the edge, gauss = exp(-2).
        let e = event(4, 3.0);
        assert_relative_eq!(
            e.multiplier_at(0),
            1.0 + 2.0 * (-2.0f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn odd_duration_midpoint_falls_between_days() {
        // duration 1: x = -0.5 or 0.5, sigma = 0.25, gauss = exp(-2).
        let e = event(1, 2.0);
        let expected = 1.0 + (-2.0f64).exp();
        assert_relative_eq!(e.multiplier_at(0), expected, epsilon = 1e-12);
        assert_relative_eq!(e.multiplier_at(1), expected, epsilon = 1e-12);
    }

    #[test]
    fn factor_one_is_neutral() {
        let e = event(5, 1.0);
        for diff in 0..=5 {
            assert_eq!(e.multiplier_at(diff), 1.0);
        }
    }

    #[test]
    fn multiplier_on_inactive_day() {
        let e = event(2, 2.0);
        assert_eq!(e.multiplier_on(ymd(2024, 3, 10)), None);
        assert_eq!(e.multiplier_on(ymd(2024, 3, 2)), Some(2.0));
    }
}
