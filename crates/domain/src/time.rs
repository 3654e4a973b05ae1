//! Calendar-date helpers for rental periods.

use chrono::NaiveDate;

use crate::error::ValidationError;

/// A calendar day, without time or zone.
pub type Date = NaiveDate;

/// Textual format used for dates in requests and in storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date submitted for `field`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] when `value` is not a valid date.
pub fn parse_date(field: &'static str, value: &str) -> Result<Date, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate { field })
}

/// Render a date the way [`parse_date`] reads it.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).to_string()
}
