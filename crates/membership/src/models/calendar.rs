use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{MembershipError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Lenient parse of a calendar date coming off the wire.
///
/// Accepts a plain `YYYY-MM-DD`, an RFC 3339 timestamp or a naive ISO
/// datetime; the time of day is dropped. Returns `None` for anything else.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|datetime| datetime.date())
}

/// Parses an evaluation instant. A bare date means midnight of that day.
pub fn parse_instant(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Ok(datetime);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.naive_local());
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| MembershipError::InvalidDate(raw.to_string()))
}
