//! Lenient date parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::CalendarError;

/// Date-only formats tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%b %d, %Y",
];

/// Date-time formats tried in order; the time of day is discarded.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parses a calendar date, stripping any time-of-day component.
///
/// Accepts ISO dates (`2024-01-31`), slash and dot separated variants,
/// long and short month names, naive date-times and RFC 3339 timestamps.
/// Leading and trailing whitespace is ignored.
///
/// # Errors
///
/// Returns [`CalendarError::EmptyDate`] for blank input and
/// [`CalendarError::UnparseableDate`] when no format matches.
pub fn parse_date(input: &str) -> Result<NaiveDate, CalendarError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(CalendarError::EmptyDate);
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    Err(CalendarError::UnparseableDate {
        input: s.to_string(),
    })
}
