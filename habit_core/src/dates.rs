//! Canonical calendar-date handling.
//!
//! Completion history is keyed by local calendar days rendered as
//! `YYYY-MM-DD`. No timezone conversion is applied anywhere: the day a
//! habit was completed is the day on the user's wall clock.
//!
//! Every function that needs "today" takes it as an explicit `NaiveDate`
//! parameter; only [`today`] consults the wall clock, and callers resolve
//! it once at the application boundary.

use chrono::{Local, NaiveDate};

/// Canonical storage format for completion dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a calendar date in the canonical `YYYY-MM-DD` form
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a canonical `YYYY-MM-DD` string back into a calendar date
///
/// Returns `None` for anything that is not a valid date in the canonical
/// form (wrong separators, missing zero padding, impossible days).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// The current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The current local calendar date in canonical string form
pub fn today_string() -> String {
    format_date(today())
}

/// Whether a canonical date string names the given day
pub fn is_today(value: &str, today: NaiveDate) -> bool {
    value == format_date(today)
}

/// Whether a canonical date string names the day before the given day
///
/// Rollovers across month and year boundaries (including leap days) are
/// handled by calendar arithmetic, not string manipulation.
pub fn is_yesterday(value: &str, today: NaiveDate) -> bool {
    today
        .pred_opt()
        .map(|yesterday| value == format_date(yesterday))
        .unwrap_or(false)
}
