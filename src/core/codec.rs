//! Conversion between workbook-local (date, time) string pairs and UTC
//! timestamps.
//!
//! Round-trips at second granularity: `format(parse(d, t)) == (d, t)` for
//! any valid pair with seconds, in any fixed zone. Parse failures are
//! row-scoped errors; the sync loop logs and skips the row, it never aborts
//! the run.

use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_time;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a `YYYY-MM-DD` date cell and an `HH:MM[:SS]` time cell into a UTC
/// timestamp, interpreting the pair in the workbook zone.
///
/// A date cell Excel typed as a datetime serial stringifies with a time
/// suffix; only its date token is used. An ambiguous local time (DST
/// fall-back) resolves to the earlier instant; a nonexistent one (DST
/// spring-forward gap) is an error.
pub fn parse(date_str: &str, time_str: &str, tz: Tz) -> AppResult<DateTime<Utc>> {
    let date_token = date_str
        .split_whitespace()
        .next()
        .ok_or_else(|| AppError::InvalidDate(date_str.to_string()))?;

    let date = NaiveDate::parse_from_str(date_token, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(date_str.to_string()))?;

    let time =
        parse_time(time_str.trim()).ok_or_else(|| AppError::InvalidTime(time_str.to_string()))?;

    let local = tz
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| AppError::InvalidTime(format!("{} {}", date_str, time_str)))?;

    Ok(local.with_timezone(&Utc))
}

/// Render a UTC timestamp as workbook-local (`YYYY-MM-DD`, `HH:MM:SS`).
pub fn format(ts: &DateTime<Utc>, tz: Tz) -> (String, String) {
    let local = ts.with_timezone(&tz);
    (
        local.format("%Y-%m-%d").to_string(),
        local.format("%H:%M:%S").to_string(),
    )
}
