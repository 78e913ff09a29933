//! Display helpers for dates and labels

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const WIRE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a backend timestamp (`2024-01-15 09:30:00`), a date-only value
/// (`2024-01-15`) or a table cell date (`Jan 15, 2024`).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in WIRE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    ["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `Jan 15, 2024`; unparsable input comes back unchanged.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None if raw.trim().is_empty() => "Unknown date".to_string(),
        None => raw.to_string(),
    }
}

/// `Today`, `Yesterday`, `N days ago` within a week, absolute date after that.
pub fn format_relative_date(raw: &str, now: NaiveDateTime) -> String {
    let Some(dt) = parse_timestamp(raw) else {
        return format_date(raw);
    };

    let days = (now.date() - dt.date()).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        _ => dt.format("%b %-d, %Y").to_string(),
    }
}

/// Wall-clock time from a JS timestamp and the browser's UTC offset
/// (`Date.getTimezoneOffset()`, minutes west of UTC).
pub fn local_from_millis(millis: f64, offset_minutes: f64) -> Option<NaiveDateTime> {
    let local = millis - offset_minutes * 60_000.0;
    DateTime::from_timestamp_millis(local as i64).map(|dt| dt.naive_utc())
}

/// Upper-case the first character: `shortlisted` -> `Shortlisted`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fallback text for optional profile fields.
pub fn or_not_specified(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "Not specified".to_string(),
    }
}
