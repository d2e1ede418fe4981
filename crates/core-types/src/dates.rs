//! Date handling policy.
//!
//! Every date string coming from the backend is interpreted in UTC:
//!
//! - RFC 3339 timestamps with an offset are converted to UTC,
//! - naive date-times (`2023-01-15T10:30:00`, `2023-01-15 10:30:00.250`) are taken as UTC,
//! - bare dates (`2023-01-15`) become midnight UTC.
//!
//! Anything else is unparseable and yields `None`. Callers treat such values
//! as "does not match" instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

const LAST_INSTANT: NaiveTime = match NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Parses a backend date string into a UTC instant.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    let parsed = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .map(start_of_day);
    if parsed.is_none() {
        tracing::debug!(raw, "Unparseable date string.");
    }
    parsed
}

/// Midnight UTC of the given calendar day.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// The last representable instant of the given calendar day, used for
/// inclusive end bounds. Sub-second timestamps late in the day stay inside.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(LAST_INSTANT).and_utc()
}

/// The timeline key of an instant: full month name and 4-digit year.
pub fn month_key(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %Y").to_string()
}
