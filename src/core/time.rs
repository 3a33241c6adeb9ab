//! Shared date helpers for creation timestamps.
//!
//! Creation dates are kept at day granularity and persisted as `dd-MM-yy`.

use chrono::{Local, NaiveDate};

/// `chrono` pattern for the persisted `dd-MM-yy` form.
pub const DATE_FORMAT: &str = "%d-%m-%y";

/// Current local date, used as the creation date of new records.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}
