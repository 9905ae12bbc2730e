//! Time utilities: parsing HH:MM[:SS], duration formatting and conversions.

use chrono::NaiveTime;

/// Parse a worksheet time cell. Both `HH:MM:SS` and `HH:MM` are accepted,
/// some callers (and most humans editing the workbook) use the shorter form.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

/// Render a duration in seconds as `HH:MM:SS`. Negative values are clamped.
pub fn format_duration_hms(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// Duration in decimal hours, rounded to 2 places (the workbook column).
pub fn duration_hours(secs: i64) -> f64 {
    (secs as f64 / 3600.0 * 100.0).round() / 100.0
}

/// Inverse of `duration_hours`: decimal hours back to whole seconds.
pub fn hours_to_seconds(hours: f64) -> i64 {
    (hours * 3600.0).round() as i64
}
