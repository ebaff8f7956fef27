//! # vk-time
//!
//! Date and day-counter types.  Calendars and business-day adjustment are
//! left to the caller; curves and instruments only need a date type with
//! serial arithmetic and a year-fraction convention.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `Date` type.
pub mod date;

/// `DayCounter` trait and built-in day-count conventions.
pub mod day_counter;

pub use date::Date;
pub use day_counter::{Actual360, Actual365Fixed, DayCounter, Thirty360};
