//! Bidirectional workbook <-> database reconciliation.
//!
//! Two phases, always run together. Phase 1 absorbs both partition
//! worksheets into the database, matching rows to existing records through
//! a 1-minute window on (employee, task, partition, start time). Phase 2
//! rewrites both worksheets from the full set of completed records, so the
//! workbook ends up matching the database exactly.
//!
//! The database is the durable source of truth, but external edits made
//! directly in the workbook survive: they are upserted in Phase 1 before
//! the rewrite. A workbook-only row that fails Phase-1 parsing is
//! permanently lost in the rewrite; each skip is logged.
//!
//! Phase-1 upserts are individual transactions, deliberately not one
//! encompassing one: a crash mid-run leaves a partially-upserted store and
//! a stale workbook, and the next run converges. The window match is a
//! pseudo-key: several records can share a minute, in which case the first
//! by (start_time, id) is updated and the rest are left alone.

use crate::core::codec;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::excel::{
    NON_PRODUCTIVE_HEADERS, NON_PRODUCTIVE_SHEET, PRODUCTIVE_HEADERS, PRODUCTIVE_SHEET, SheetRow,
    SpreadsheetStore,
};
use crate::models::record::TimeRecord;
use crate::ui::messages::{error, info, warning};
use crate::utils::time::{duration_hours, format_duration_hms, hours_to_seconds};
use chrono::{DateTime, Duration, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use uuid::Uuid;

/// Structured result of one sync run, also emitted as JSON by `sync --json`.
#[derive(Debug, Serialize)]
pub struct SyncOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub productive_count: usize,
    pub non_productive_count: usize,
    pub upserted_from_excel: usize,
    pub inserted_count: usize,
    pub updated_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncOutcome {
    fn failure(err: String) -> Self {
        Self {
            success: false,
            message: None,
            productive_count: 0,
            non_productive_count: 0,
            upserted_from_excel: 0,
            inserted_count: 0,
            updated_count: 0,
            error: Some(err),
        }
    }
}

#[derive(Default)]
struct UpsertTally {
    upserted: usize,
    inserted: usize,
    updated: usize,
}

enum Upserted {
    Inserted,
    Updated,
}

pub struct SyncLogic;

impl SyncLogic {
    /// Run the full reconciliation. Never returns an error: top-level
    /// failures come back as a `success: false` outcome so the caller
    /// always has a structured result to relay.
    pub fn run(pool: &mut DbPool, store: &dyn SpreadsheetStore, tz: Tz) -> SyncOutcome {
        match run_inner(pool, store, tz) {
            Ok(outcome) => outcome,
            Err(e) => {
                error(format!("Sync failed: {}", e));
                SyncOutcome::failure(e.to_string())
            }
        }
    }
}

fn run_inner(pool: &mut DbPool, store: &dyn SpreadsheetStore, tz: Tz) -> AppResult<SyncOutcome> {
    // ------------------------------------------------
    // Phase 1: absorb workbook rows into the database
    // ------------------------------------------------
    let mut tally = UpsertTally::default();

    absorb_partition(pool, store, tz, PRODUCTIVE_SHEET, false, &mut tally);
    absorb_partition(pool, store, tz, NON_PRODUCTIVE_SHEET, true, &mut tally);

    info(format!(
        "Upserted {} records from workbook (inserted: {}, updated: {})",
        tally.upserted, tally.inserted, tally.updated
    ));

    // ------------------------------------------------
    // Phase 2: republish the database into the workbook
    // ------------------------------------------------
    let completed = queries::list_completed(&pool.conn)?;

    let mut productive: Vec<Vec<String>> = Vec::new();
    let mut non_productive: Vec<Vec<String>> = Vec::new();

    for rec in &completed {
        if let Some(row) = record_to_sheet_row(rec, tz) {
            if rec.is_non_productive {
                non_productive.push(row);
            } else {
                productive.push(row);
            }
        }
    }

    let productive_count = productive.len();
    let non_productive_count = non_productive.len();

    // Each partition write is attempted independently: a failure on one
    // sheet is logged and the other sheet still gets rewritten.
    let mut first_error: Option<String> = None;

    if let Err(e) = store.replace_rows(PRODUCTIVE_SHEET, &PRODUCTIVE_HEADERS, productive) {
        error(format!("Error replacing '{}': {}", PRODUCTIVE_SHEET, e));
        first_error.get_or_insert(e.to_string());
    }
    if let Err(e) = store.replace_rows(NON_PRODUCTIVE_SHEET, &NON_PRODUCTIVE_HEADERS, non_productive)
    {
        error(format!("Error replacing '{}': {}", NON_PRODUCTIVE_SHEET, e));
        first_error.get_or_insert(e.to_string());
    }

    if let Some(err) = first_error {
        return Ok(SyncOutcome::failure(err));
    }

    let message = format!(
        "Synchronized {} productive and {} non-productive records; upserted {} from workbook (inserted: {}, updated: {})",
        productive_count, non_productive_count, tally.upserted, tally.inserted, tally.updated
    );

    if let Err(e) = oplog(&pool.conn, "sync", "", &message) {
        warning(format!("Failed to write internal log: {}", e));
    }

    Ok(SyncOutcome {
        success: true,
        message: Some(message),
        productive_count,
        non_productive_count,
        upserted_from_excel: tally.upserted,
        inserted_count: tally.inserted,
        updated_count: tally.updated,
        error: None,
    })
}

/// Phase-1 loop for one worksheet. Partition-level read failures and
/// row-level parse failures are logged and swallowed; the rest of the run
/// proceeds.
fn absorb_partition(
    pool: &DbPool,
    store: &dyn SpreadsheetStore,
    tz: Tz,
    sheet: &str,
    non_productive: bool,
    tally: &mut UpsertTally,
) {
    let rows = match store.read_rows(sheet) {
        Ok(rows) => rows,
        Err(e) => {
            warning(format!("Error reading worksheet '{}': {}", sheet, e));
            return;
        }
    };

    for row in rows {
        match upsert_row(pool, tz, &row, non_productive) {
            Ok(Upserted::Inserted) => {
                tally.inserted += 1;
                tally.upserted += 1;
            }
            Ok(Upserted::Updated) => {
                tally.updated += 1;
                tally.upserted += 1;
            }
            Err(e) => warning(format!("Skipping row in '{}': {}", sheet, e)),
        }
    }
}

fn required_cell(row: &SheetRow, column: &str) -> AppResult<String> {
    row.get(column)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::MissingCell(column.to_string()))
}

fn optional_cell(row: &SheetRow, column: &str) -> Option<String> {
    row.get(column)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Upsert one worksheet row into the database.
fn upsert_row(pool: &DbPool, tz: Tz, row: &SheetRow, non_productive: bool) -> AppResult<Upserted> {
    let employee_id = required_cell(row, "EmployeeId")?;
    let date_str = required_cell(row, "Date")?;
    let start_str = required_cell(row, "StartTime")?;
    let end_str = required_cell(row, "EndTime")?;

    let start_time = codec::parse(&date_str, &start_str, tz)?;
    let mut end_time = codec::parse(&date_str, &end_str, tz)?;

    // End-of-day before start-of-day: the shift crossed midnight.
    if end_time < start_time {
        end_time += Duration::days(1);
    }

    let task = optional_cell(row, "Task").unwrap_or_default();
    let employee_name = optional_cell(row, "EmployeeName").unwrap_or_default();
    let (project_id, project_name) = if non_productive {
        (None, None)
    } else {
        (
            optional_cell(row, "ProjectId"),
            optional_cell(row, "ProjectName"),
        )
    };

    let duration_seconds = row_duration_seconds(row, &start_time, &end_time)?;

    // Matching window: start truncated to the minute, one minute wide.
    let window_start = start_time - Duration::seconds(start_time.second() as i64);
    let window_end = window_start + Duration::minutes(1);

    let matches = queries::find_matching(
        &pool.conn,
        &employee_id,
        &task,
        non_productive,
        &window_start,
        &window_end,
    )?;

    if let Some(existing) = matches.into_iter().next() {
        let updated = TimeRecord {
            id: existing.id,
            employee_id,
            employee_name,
            project_id,
            project_name,
            task,
            is_non_productive: non_productive,
            start_time,
            end_time: Some(end_time),
            duration_seconds: Some(duration_seconds),
            created_at: existing.created_at,
        };
        queries::update_record(&pool.conn, &updated)?;
        Ok(Upserted::Updated)
    } else {
        let inserted = TimeRecord {
            id: Uuid::new_v4().to_string(),
            employee_id,
            employee_name,
            project_id,
            project_name,
            task,
            is_non_productive: non_productive,
            start_time,
            end_time: Some(end_time),
            duration_seconds: Some(duration_seconds),
            created_at: Utc::now(),
        };
        queries::insert_record(&pool.conn, &inserted)?;
        Ok(Upserted::Inserted)
    }
}

/// Duration for an absorbed row: the decimal-hours column wins, then the
/// legacy integer-seconds column, then the start/end difference.
fn row_duration_seconds(
    row: &SheetRow,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> AppResult<i64> {
    if let Some(hours) = row.get("DurationHours") {
        let value: f64 = hours
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidDuration(hours.clone()))?;
        return Ok(hours_to_seconds(value));
    }

    if let Some(secs) = row.get("DurationSeconds") {
        let value: i64 = secs
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidDuration(secs.clone()))?;
        return Ok(value);
    }

    Ok((*end - *start).num_seconds())
}

/// Render a completed record as one worksheet data row, in partition column
/// order. Active timers have no end time and are never mirrored.
pub(crate) fn record_to_sheet_row(rec: &TimeRecord, tz: Tz) -> Option<Vec<String>> {
    let end_time = rec.end_time?;

    let (date, start) = codec::format(&rec.start_time, tz);
    let (_, end) = codec::format(&end_time, tz);
    let secs = rec.duration_seconds.unwrap_or(0);

    let mut row = vec![date, rec.employee_id.clone(), rec.employee_name.clone()];
    if !rec.is_non_productive {
        row.push(rec.project_id.clone().unwrap_or_default());
        row.push(rec.project_name.clone().unwrap_or_default());
    }
    row.extend([
        rec.task.clone(),
        start,
        end,
        format_duration_hms(secs),
        duration_hours(secs).to_string(),
    ]);

    Some(row)
}
