//! Cutoff date parsing.

use crate::error::{CleanError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Accepted layouts, tried in order.
pub const DATE_TIME_LAYOUTS: [&str; 2] = ["%d.%m.%Y %H:%M:%S", "%d.%m.%Y %H:%M"];

/// Date-only layout, tried last. Midnight UTC is assumed.
pub const DATE_LAYOUT: &str = "%d.%m.%Y";

/// Parses a cutoff date written as `DD.MM.YYYY`, optionally followed by
/// `HH:MM` or `HH:MM:SS`. The first matching layout wins and the result is
/// interpreted as UTC.
///
/// # Examples
///
/// ```
/// use libregclean::policy::parse_date;
///
/// let cutoff = parse_date("15.03.2021 10:30").unwrap();
/// assert_eq!(cutoff.to_rfc3339(), "2021-03-15T10:30:00+00:00");
/// assert!(parse_date("2021-03-15").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    for layout in DATE_TIME_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, DATE_LAYOUT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| CleanError::unparseable_date(input))
}
