//! Date formatting and calendar arithmetic for daily notes.
//!
//! Daily notes are identified by a `YYYY-MM-DD` string; the kernel's
//! attribute tags use the compact `YYYYMMDD` form.

use chrono::{Local, NaiveDate};

use crate::{DailyNavError, Result};

/// Formats a date as `YYYY-MM-DD` with zero-padded month and day.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` string back into a date.
///
/// Returns `None` for anything that is not a real calendar date, including
/// date-shaped strings such as `2026-13-40`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Collapses `"2026-01-17"` into the attribute form `"20260117"`.
pub fn compact(date_str: &str) -> String {
    date_str.replace('-', "")
}

/// Shifts a date by a signed number of calendar days.
pub fn shift(date: NaiveDate, offset: i64) -> Result<NaiveDate> {
    chrono::Duration::try_days(offset)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| DailyNavError::DateOutOfRange {
            date: format_date(date),
            offset,
        })
}

/// The current date in the local calendar, no timezone conversion.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
