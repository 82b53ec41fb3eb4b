//! # quarry-calendar
//!
//! Gregorian date helpers shared by the quarry generator crates.
//!
//! ## Quick Start
//!
//! ```
//! use quarry_calendar::{WeekdayMultipliers, monday_first_index, nth_day, parse_date};
//!
//! let start = parse_date("15.01.2024").unwrap();
//! assert_eq!(monday_first_index(start), 0); // a Monday
//! assert_eq!(nth_day(start, 6).unwrap().to_string(), "2024-01-21");
//!
//! let table = WeekdayMultipliers::from_entries(&[Some(1.2), None]);
//! assert_eq!(table.for_date(start), 1.2);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `parse` | Lenient date parsing |
//! | `sequence` | Checked day offsets |
//! | `weekday` | Sunday-first to Monday-first remap and multiplier table |
//! | `error` | Error types |

mod error;
mod parse;
mod sequence;
mod weekday;

pub use error::CalendarError;
pub use parse::parse_date;
pub use sequence::nth_day;
pub use weekday::{
    SUNDAY_FIRST_TO_MONDAY_FIRST, WeekdayMultipliers, monday_first_index,
};
