//! Due-date helpers.

use chrono::{DateTime, NaiveDate};
use mockable::Clock;

/// Placeholder shown when a task has no due date.
pub const NO_DATE_LABEL: &str = "No Date";

/// Placeholder shown when a stored date cannot be read.
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// Returns the current calendar date according to `clock` (UTC).
#[must_use]
pub fn today(clock: &impl Clock) -> NaiveDate {
    clock.utc().date_naive()
}

/// Formats a stored date (`YYYY-MM-DD` or RFC 3339) as `"March 5, 2025"`.
#[must_use]
pub fn format_due_date(value: Option<&str>) -> String {
    let Some(text) = value.map(str::trim).filter(|text| !text.is_empty()) else {
        return NO_DATE_LABEL.to_owned();
    };

    let parsed = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|d| d.date_naive()));

    parsed.map_or_else(
        || {
            tracing::warn!(value = text, "unreadable due date");
            INVALID_DATE_LABEL.to_owned()
        },
        |date| date.format("%B %-d, %Y").to_string(),
    )
}
