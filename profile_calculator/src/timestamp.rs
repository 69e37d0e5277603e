use crate::error::{ProfileError, ProfileResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

// Month-first before day-first, so "01/02/2019" reads as January 2nd.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

// Hour-only layouts; chrono needs a minute, so ":00" is appended first.
const HOUR_FORMATS: &[&str] = &["%Y-%m-%d-%H:%M", "%Y-%m-%d %H:%M"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d.%m.%Y"];

/// Parse a loosely formatted timestamp and truncate it to the hour.
///
/// Offsets are read but not applied: the wall-clock time as written is what
/// the weekday and hour-of-day are derived from.
pub fn normalize_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    parse_any(raw).and_then(truncate_to_hour)
}

/// Normalize a whole column; the first bad value fails the table.
pub fn normalize_column<'a, I>(values: I) -> ProfileResult<Vec<NaiveDateTime>>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            normalize_timestamp(value).ok_or_else(|| ProfileError::UnparseableTimestamp {
                row,
                value: value.to_string(),
            })
        })
        .collect()
}

fn parse_any(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.naive_local());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    let with_minutes = format!("{raw}:00");
    for format in HOUR_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&with_minutes, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

fn truncate_to_hour(dt: NaiveDateTime) -> Option<NaiveDateTime> {
    dt.date().and_hms_opt(dt.hour(), 0, 0)
}
