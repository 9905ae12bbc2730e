//! Row mapping between SQLite and the TimeRecord domain model.

use crate::errors::AppError;
use crate::models::record::TimeRecord;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rusqlite::{Result, Row};

/// Storage format for every timestamp column: UTC, second granularity,
/// fixed width so TEXT comparison orders chronologically.
pub const DB_TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn to_db_ts(dt: &DateTime<Utc>) -> String {
    dt.format(DB_TS_FORMAT).to_string()
}

pub fn from_db_ts(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, DB_TS_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn ts_conversion_error(s: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(AppError::InvalidDate(s.to_string())),
    )
}

pub fn map_record_row(row: &Row) -> Result<TimeRecord> {
    let start_str: String = row.get("start_time")?;
    let start_time = from_db_ts(&start_str).ok_or_else(|| ts_conversion_error(&start_str))?;

    let end_time = match row.get::<_, Option<String>>("end_time")? {
        Some(s) => Some(from_db_ts(&s).ok_or_else(|| ts_conversion_error(&s))?),
        None => None,
    };

    let created_str: String = row.get("created_at")?;
    let created_at = from_db_ts(&created_str).ok_or_else(|| ts_conversion_error(&created_str))?;

    Ok(TimeRecord {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        employee_name: row.get("employee_name")?,
        project_id: row.get("project_id")?,
        project_name: row.get("project_name")?,
        task: row.get("task")?,
        is_non_productive: row.get::<_, i64>("is_non_productive")? != 0,
        start_time,
        end_time,
        duration_seconds: row.get("duration_seconds")?,
        created_at,
    })
}
