//! Calendar date helpers.

use chrono::{NaiveDate, Utc};

/// Calendar date used for manufacturing and service dates.
pub type Date = NaiveDate;

/// Format used when dates cross a text boundary (storage, URLs).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Return the current UTC calendar date.
#[must_use]
pub fn today() -> Date {
    Utc::now().date_naive()
}
