//! Calendar-day keys for usage records.
//!
//! Records are keyed by the *local* calendar day an app was closed on,
//! formatted `YYYY-MM-DD`, so the day rolls over at local midnight.

use chrono::{Duration, Local, NaiveDate};

use crate::constants::DAY_FORMAT;
use crate::error::{Error, Result};

/// The current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a day as a `YYYY-MM-DD` key.
pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` key back into a date.
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DAY_FORMAT).map_err(|source| Error::InvalidDay {
        value: value.to_string(),
        source,
    })
}

/// The oldest day still inside the retention window. Records dated strictly
/// before this day are eligible for deletion; the cutoff day itself is kept.
pub fn cutoff(today: NaiveDate, retention_days: u32) -> NaiveDate {
    today - Duration::days(i64::from(retention_days))
}
