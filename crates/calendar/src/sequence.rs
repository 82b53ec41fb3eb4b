//! Checked day offsets.

use chrono::{Days, NaiveDate};

use crate::error::CalendarError;

/// Returns `start` advanced by `offset` days.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] if the result is not representable.
pub fn nth_day(start: NaiveDate, offset: u64) -> Result<NaiveDate, CalendarError> {
    start
        .checked_add_days(Days::new(offset))
        .ok_or(CalendarError::OutOfRange { start, offset })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn zero_offset_is_start() {
        assert_eq!(nth_day(ymd(2024, 6, 15), 0).unwrap(), ymd(2024, 6, 15));
    }

    #[test]
    fn leap_year_february() {
        let start = ymd(2024, 2, 27);
        assert_eq!(nth_day(start, 2).unwrap(), ymd(2024, 2, 29));
        assert_eq!(nth_day(start, 3).unwrap(), ymd(2024, 3, 1));
    }

    #[test]
    fn year_transition() {
        assert_eq!(nth_day(ymd(2023, 12, 30), 2).unwrap(), ymd(2024, 1, 1));
    }

    #[test]
    fn full_leap_year() {
        assert_eq!(nth_day(ymd(2024, 1, 1), 365).unwrap(), ymd(2024, 12, 31));
    }

    #[test]
    fn overflow_is_error() {
        let err = nth_day(NaiveDate::MAX, 1).unwrap_err();
        assert!(matches!(err, CalendarError::OutOfRange { offset: 1, .. }));
    }
}
