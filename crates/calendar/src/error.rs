//! Error types for the quarry-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the quarry-calendar crate.
///
/// Covers date strings that cannot be interpreted and date arithmetic
/// that leaves the range representable by [`NaiveDate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a date string is empty after trimming.
    #[error("date is empty")]
    EmptyDate,

    /// Returned when a date string matches none of the accepted formats.
    #[error("unparseable date: {input:?}")]
    UnparseableDate {
        /// The input that could not be parsed.
        input: String,
    },

    /// Returned when advancing a date by `offset` days overflows.
    #[error("date out of range: {start} + {offset} days")]
    OutOfRange {
        /// The date the offset was applied to.
        start: NaiveDate,
        /// Number of days added.
        offset: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_date() {
        assert_eq!(CalendarError::EmptyDate.to_string(), "date is empty");
    }

    #[test]
    fn display_unparseable_date() {
        let err = CalendarError::UnparseableDate {
            input: "31/31/2024".to_string(),
        };
        assert_eq!(err.to_string(), "unparseable date: \"31/31/2024\"");
    }

    #[test]
    fn display_out_of_range() {
        let err = CalendarError::OutOfRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            offset: 7,
        };
        assert_eq!(err.to_string(), "date out of range: 2024-01-01 + 7 days");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_clone() {
        let err = CalendarError::EmptyDate;
        assert_eq!(err.clone(), err);
    }
}
