//! Timestamp parsing for the temporal family.
//!
//! SQLite has no native date type; temporal columns carry text in a handful
//! of common shapes. Parsing tries the shapes in a fixed order so results do
//! not depend on input ordering.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse one temporal value. Returns `None` when no known shape matches.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    // Bare clock times anchor to the epoch date so spans stay meaningful
    // within a single day.
    if let Ok(time) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        return NaiveDate::from_ymd_opt(1970, 1, 1).map(|d| d.and_time(time));
    }

    None
}

/// Coarse duration string: whole days when the span reaches one day, whole
/// hours otherwise.
pub fn span_string(span: Duration) -> String {
    let days = span.num_days();
    if days >= 1 {
        format!("{days}d")
    } else {
        format!("{}h", span.num_hours())
    }
}
