// Shared primitives for time values exchanged with the membership API.
//
// Notes
// - All instants are epoch milliseconds in i64, the same unit the API uses for spans.
// - Dates without a time component map to UTC midnight.

use chrono::{DateTime, NaiveDate, TimeZone};

pub type Millis = i64;

pub const DAY_MS: Millis = 24 * 3600 * 1000;

/// Parses a `YYYY-MM-DD` date into the epoch milliseconds of its UTC midnight.
pub fn date_to_millis(date: &str) -> Option<Millis> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// Formats epoch milliseconds as the `YYYY-MM-DD` of its UTC date.
pub fn millis_to_date(millis: Millis) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(|t| t.format("%Y-%m-%d").to_string())
}

/// Epoch milliseconds of a server timestamp (RFC 3339) or a bare `YYYY-MM-DD` date.
pub fn timestamp_to_millis(timestamp: &str) -> Option<Millis> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.timestamp_millis())
        .ok()
        .or_else(|| date_to_millis(timestamp))
}

/// Date part of a server timestamp, `None` if the timestamp does not parse.
pub fn date_to_str(timestamp: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|t| t.format("%Y-%m-%d").to_string())
}

/// Server timestamp rendered as local date and time in `tz`.
pub fn date_time_to_str<Tz>(timestamp: &str, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|t| t.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string())
}
