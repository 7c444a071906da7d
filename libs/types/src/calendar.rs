//! Calendar-day handling
//!
//! Dates travel as `YYYY-MM-DD` strings. Every component that needs a real
//! date parses it here, so the ads cleaner and the store's date filter
//! agree on what counts as a valid day.

use chrono::{DateTime, NaiveDate, Utc};

/// Wire format for calendar days.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar day.
///
/// Only the zero-padded form is accepted: `2023-1-5` is rejected.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DAY_FORMAT).ok()
}

/// Midnight UTC at the start of `day`.
pub fn day_start_utc(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Format a calendar day back into its wire form.
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}
