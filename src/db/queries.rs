use crate::db::models::{map_record_row, to_db_ts};
use crate::errors::AppResult;
use crate::models::record::TimeRecord;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, params};

pub fn insert_record(conn: &Connection, rec: &TimeRecord) -> AppResult<()> {
    conn.execute(
        "INSERT INTO time_records
             (id, employee_id, employee_name, project_id, project_name,
              task, is_non_productive, start_time, end_time, duration_seconds, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            rec.id,
            rec.employee_id,
            rec.employee_name,
            rec.project_id,
            rec.project_name,
            rec.task,
            rec.is_non_productive as i64,
            to_db_ts(&rec.start_time),
            rec.end_time.as_ref().map(to_db_ts),
            rec.duration_seconds,
            to_db_ts(&rec.created_at),
        ],
    )?;
    Ok(())
}

/// Update a record's mutable fields (everything but id and created_at).
pub fn update_record(conn: &Connection, rec: &TimeRecord) -> AppResult<()> {
    conn.execute(
        "UPDATE time_records
         SET employee_id = ?1, employee_name = ?2,
             project_id = ?3, project_name = ?4,
             task = ?5, is_non_productive = ?6,
             start_time = ?7, end_time = ?8, duration_seconds = ?9
         WHERE id = ?10",
        params![
            rec.employee_id,
            rec.employee_name,
            rec.project_id,
            rec.project_name,
            rec.task,
            rec.is_non_productive as i64,
            to_db_ts(&rec.start_time),
            rec.end_time.as_ref().map(to_db_ts),
            rec.duration_seconds,
            rec.id,
        ],
    )?;
    Ok(())
}

pub fn delete_record(conn: &Connection, id: &str) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM time_records WHERE id = ?1", [id])?;
    Ok(n)
}

/// Candidates for the sync upsert: same employee, task and partition, with
/// a start time inside `[window_start, window_end)`.
///
/// Results are ordered by start_time then id, so "update the first match"
/// is deterministic for a given database state. The tie-break among several
/// candidates in the same minute is still arbitrary in meaning; the window
/// is a pseudo-key, not a real one.
pub fn find_matching(
    conn: &Connection,
    employee_id: &str,
    task: &str,
    is_non_productive: bool,
    window_start: &DateTime<Utc>,
    window_end: &DateTime<Utc>,
) -> AppResult<Vec<TimeRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM time_records
         WHERE employee_id = ?1
           AND task = ?2
           AND is_non_productive = ?3
           AND start_time >= ?4
           AND start_time < ?5
         ORDER BY start_time ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            employee_id,
            task,
            is_non_productive as i64,
            to_db_ts(window_start),
            to_db_ts(window_end),
        ],
        map_record_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All completed records (non-null end_time), oldest first. Active timers
/// are never mirrored to the workbook.
pub fn list_completed(conn: &Connection) -> AppResult<Vec<TimeRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM time_records
         WHERE end_time IS NOT NULL
         ORDER BY start_time ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_record_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Completed records filtered for display, optionally by employee and by an
/// inclusive UTC date range on the start time.
pub fn list_filtered(
    conn: &Connection,
    employee_id: Option<&str>,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<TimeRecord>> {
    let mut sql = String::from(
        "SELECT * FROM time_records
         WHERE end_time IS NOT NULL",
    );
    let mut args: Vec<String> = Vec::new();

    if let Some(emp) = employee_id {
        args.push(emp.to_string());
        sql.push_str(&format!(" AND employee_id = ?{}", args.len()));
    }

    if let Some((from, to)) = bounds {
        args.push(format!("{} 00:00:00", from.format("%Y-%m-%d")));
        sql.push_str(&format!(" AND start_time >= ?{}", args.len()));
        args.push(format!("{} 23:59:59", to.format("%Y-%m-%d")));
        sql.push_str(&format!(" AND start_time <= ?{}", args.len()));
    }

    sql.push_str(" ORDER BY start_time ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), map_record_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The employee's active timer, if any. At most one exists; enforced by the
/// existence check in TimerLogic::start, not by a constraint.
pub fn find_active(conn: &Connection, employee_id: &str) -> AppResult<Option<TimeRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM time_records
         WHERE employee_id = ?1 AND end_time IS NULL
         ORDER BY start_time DESC
         LIMIT 1",
    )?;

    let mut rows = stmt.query_map([employee_id], map_record_row)?;
    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}
