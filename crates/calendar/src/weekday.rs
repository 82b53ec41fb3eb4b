//! Weekday index remapping and the weekday multiplier table.

use chrono::{Datelike, NaiveDate};

/// Maps a Sunday-first day number (Sunday = 0 … Saturday = 6) to the
/// Monday-first index (Monday = 0 … Sunday = 6) used by multiplier tables.
pub const SUNDAY_FIRST_TO_MONDAY_FIRST: [usize; 7] = [6, 0, 1, 2, 3, 4, 5];

/// Returns the Monday-first index (0..=6) of `date`.
pub fn monday_first_index(date: NaiveDate) -> usize {
    let sunday_first = date.weekday().num_days_from_sunday() as usize;
    SUNDAY_FIRST_TO_MONDAY_FIRST[sunday_first]
}

/// Seven positive multipliers indexed Monday = 0 … Sunday = 6.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekdayMultipliers([f64; 7]);

impl Default for WeekdayMultipliers {
    fn default() -> Self {
        Self([1.0; 7])
    }
}

impl WeekdayMultipliers {
    /// Builds a table from up to seven optional entries in Monday-first order.
    ///
    /// Missing entries, and entries that are zero, negative or non-finite,
    /// default to 1. Entries beyond the seventh are ignored.
    pub fn from_entries(entries: &[Option<f64>]) -> Self {
        let mut values = [1.0; 7];
        for (slot, entry) in values.iter_mut().zip(entries) {
            match *entry {
                Some(v) if v.is_finite() && v > 0.0 => *slot = v,
                _ => {}
            }
        }
        Self(values)
    }

    /// Returns the multiplier for a Monday-first index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`.
    pub fn get(&self, index: usize) -> f64 {
        self.0[index]
    }

    /// Returns the multiplier that applies on `date`.
    pub fn for_date(&self, date: NaiveDate) -> f64 {
        self.0[monday_first_index(date)]
    }

    /// Returns the table in Monday-first order.
    pub fn as_array(&self) -> &[f64; 7] {
        &self.0
    }
}
