//! Program ordering.

use super::collation::compare_icelandic;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dagskra_types::{Program, SortBy};
use std::cmp::Reverse;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a backend timestamp into milliseconds since the Unix epoch.
///
/// Accepts RFC 3339, ISO date-times without an offset (read as UTC) and
/// plain `YYYY-MM-DD` dates (UTC midnight).
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Creation time used for ordering; missing or unparseable timestamps count
/// as the epoch.
fn created_millis(program: &Program) -> i64 {
    program
        .created_at
        .as_deref()
        .and_then(parse_timestamp_millis)
        .unwrap_or(0)
}

/// Return the programs ordered by `sort_by` as a new vector.
///
/// The sort is stable, so programs that compare equal keep their incoming
/// order.
pub fn sort_programs<'a, I>(programs: I, sort_by: SortBy) -> Vec<&'a Program>
where
    I: IntoIterator<Item = &'a Program>,
{
    let mut sorted: Vec<&Program> = programs.into_iter().collect();

    match sort_by {
        SortBy::Newest => sorted.sort_by_key(|p| Reverse(created_millis(p))),
        SortBy::Oldest => sorted.sort_by_key(|p| created_millis(p)),
        SortBy::MostLiked => sorted.sort_by(|a, b| b.like_count.cmp(&a.like_count)),
        SortBy::Alphabetical => sorted.sort_by(|a, b| compare_icelandic(&a.name, &b.name)),
    }

    sorted
}
