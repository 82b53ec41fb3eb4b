//! Gated application of all configured events.

use chrono::NaiveDate;
use quarry_sampler::RandomSource;
use tracing::trace;

use crate::event::Event;

/// Applies an ordered list of [`Event`]s to generated values.
#[derive(Debug, Clone, Default)]
pub struct EventEngine {
    events: Vec<Event>,
}

impl EventEngine {
    /// Creates an engine over events in their configured order.
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Returns the events in configured order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns `true` if no events are configured.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates over events active on `date` with their ungated multipliers,
    /// in configured order.
    pub fn active_on(&self, date: NaiveDate) -> impl Iterator<Item = (&Event, f64)> + '_ {
        self.events
            .iter()
            .filter_map(move |e| e.multiplier_on(date).map(|m| (e, m)))
    }

    /// Applies every event active on `date` to `value`.
    ///
    /// Active events are visited in configured order; each draws one
    /// independent Bernoulli trial with its own probability and, on
    /// success, multiplies the running value by its multiplier. Inactive
    /// events consume no randomness.
    pub fn apply<S: RandomSource + ?Sized>(
        &self,
        date: NaiveDate,
        value: f64,
        source: &mut S,
    ) -> f64 {
        let mut val = value;
        for (event, multiplier) in self.active_on(date) {
            if source.bernoulli(event.probability()) {
                trace!(%date, event_day = %event.day(), multiplier, "event applied");
                val *= multiplier;
            }
        }
        val
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quarry_sampler::SequenceSource;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_engine_is_identity() {
        let engine = EventEngine::default();
        let mut src = SequenceSource::constant(0.0).unwrap();
        assert_eq!(engine.apply(ymd(2024, 1, 1), 42.0, &mut src), 42.0);
        assert_eq!(src.draws(), 0);
    }

    #[test]
    fn inactive_events_draw_nothing() {
        let engine = EventEngine::new(vec![
            Event::new(ymd(2024, 5, 1), 3, 2.0, 1.0).unwrap(),
        ]);
        let mut src = SequenceSource::constant(0.0).unwrap();
        assert_eq!(engine.apply(ymd(2024, 1, 1), 10.0, &mut src), 10.0);
        assert_eq!(src.draws(), 0);
    }

    #[test]
    fn zero_probability_never_alters() {
        let engine = EventEngine::new(vec![
            Event::new(ymd(2024, 1, 1), 2, 50.0, 0.0).unwrap(),
        ]);
        let mut src = SequenceSource::new(vec![0.0, 0.3, 0.999]).unwrap();
        for d in 1..=3 {
            assert_eq!(engine.apply(ymd(2024, 1, d), 10.0, &mut src), 10.0);
        }
        assert_eq!(src.draws(), 3);
    }

    #[test]
    fn certain_event_doubles_at_midpoint() {
        let engine = EventEngine::new(vec![
            Event::new(ymd(2024, 1, 1), 2, 2.0, 1.0).unwrap(),
        ]);
        let mut src = SequenceSource::constant(0.75).unwrap();
        assert_eq!(engine.apply(ymd(2024, 1, 2), 10.0, &mut src), 20.0);
    }

    #[test]
    fn trial_gates_each_event_independently() {
        let engine = EventEngine::new(vec![
            Event::new(ymd(2024, 1, 1), 2, 2.0, 0.5).unwrap(),
            Event::new(ymd(2024, 1, 1), 2, 3.0, 0.5).unwrap(),
        ]);
        // First trial fails (0.9 >= 0.5), second succeeds (0.1 < 0.5).
        let mut src = SequenceSource::new(vec![0.9, 0.1]).unwrap();
        assert_eq!(engine.apply(ymd(2024, 1, 2), 10.0, &mut src), 30.0);
    }

    #[test]
    fn overlapping_events_compound_in_order() {
        let engine = EventEngine::new(vec![
            Event::new(ymd(2024, 1, 1), 4, 0.5, 1.0).unwrap(),
            Event::new(ymd(2024, 1, 2), 2, 3.0, 1.0).unwrap(),
        ]);
        let date = ymd(2024, 1, 3);
        let active: Vec<f64> = engine.active_on(date).map(|(_, m)| m).collect();
        assert_eq!(active.len(), 2);
        let mut src = SequenceSource::constant(0.0).unwrap();
        let out = engine.apply(date, 8.0, &mut src);
        assert_relative_eq!(out, 8.0 * active[0] * active[1], epsilon = 1e-12);
        assert_relative_eq!(out, 8.0 * 0.5 * 3.0, epsilon = 1e-12);
    }

    #[test]
    fn active_on_preserves_configured_order() {
        let first = Event::new(ymd(2024, 1, 1), 10, 1.5, 1.0).unwrap();
        let second = Event::new(ymd(2023, 12, 30), 10, 0.5, 1.0).unwrap();
        let engine = EventEngine::new(vec![first, second]);
        let days: Vec<NaiveDate> = engine
            .active_on(ymd(2024, 1, 2))
            .map(|(e, _)| e.day())
            .collect();
        assert_eq!(days, vec![first.day(), second.day()]);
    }
}
