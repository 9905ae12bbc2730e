//! Start/stop/status logic for per-employee timers.

use crate::core::sync::record_to_sheet_row;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::excel::{
    NON_PRODUCTIVE_HEADERS, NON_PRODUCTIVE_SHEET, PRODUCTIVE_HEADERS, PRODUCTIVE_SHEET,
    SpreadsheetStore,
};
use crate::models::record::TimeRecord;
use crate::ui::messages::warning;
use chrono::{DateTime, SubsecRound, Utc};
use chrono_tz::Tz;

pub struct TimerLogic;

impl TimerLogic {
    /// Start a new timer. At most one active timer per employee; a second
    /// start is refused.
    #[allow(clippy::too_many_arguments)]
    pub fn start(
        pool: &mut DbPool,
        employee_id: &str,
        employee_name: &str,
        project_id: Option<String>,
        project_name: Option<String>,
        task: &str,
        non_productive: bool,
        at: Option<DateTime<Utc>>,
    ) -> AppResult<TimeRecord> {
        if queries::find_active(&pool.conn, employee_id)?.is_some() {
            return Err(AppError::TimerAlreadyRunning(employee_id.to_string()));
        }

        let start_time = at.unwrap_or_else(Utc::now).trunc_subsecs(0);

        // Non-productive records never carry project references.
        let (project_id, project_name) = if non_productive {
            (None, None)
        } else {
            (project_id, project_name)
        };

        let record = TimeRecord::new_active(
            employee_id,
            employee_name,
            project_id,
            project_name,
            task,
            non_productive,
            start_time,
        );
        queries::insert_record(&pool.conn, &record)?;

        if let Err(e) = oplog(
            &pool.conn,
            "start",
            employee_id,
            &format!("Started timer for {}: {}", employee_name, task),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(record)
    }

    /// Stop the employee's active timer: set the end time, compute the
    /// duration, then append the completed row to the matching partition
    /// worksheet. The workbook append is best-effort; the database write is
    /// the one that counts, and the next sync republishes everything anyway.
    pub fn stop(
        pool: &mut DbPool,
        store: &dyn SpreadsheetStore,
        tz: Tz,
        employee_id: &str,
        at: Option<DateTime<Utc>>,
    ) -> AppResult<TimeRecord> {
        let mut record = queries::find_active(&pool.conn, employee_id)?
            .ok_or_else(|| AppError::NoActiveTimer(employee_id.to_string()))?;

        let end_time = at.unwrap_or_else(Utc::now).trunc_subsecs(0);

        let mut duration_seconds = (end_time - record.start_time).num_seconds();
        if duration_seconds < 0 {
            warning(format!(
                "Negative duration for timer {}, clamping to 0",
                record.id
            ));
            duration_seconds = 0;
        }

        record.end_time = Some(end_time);
        record.duration_seconds = Some(duration_seconds);
        queries::update_record(&pool.conn, &record)?;

        if let Some(row) = record_to_sheet_row(&record, tz) {
            let (sheet, headers): (&str, &[&str]) = if record.is_non_productive {
                (NON_PRODUCTIVE_SHEET, &NON_PRODUCTIVE_HEADERS)
            } else {
                (PRODUCTIVE_SHEET, &PRODUCTIVE_HEADERS)
            };

            if let Err(e) = store.append_row(sheet, headers, row) {
                warning(format!(
                    "Record saved to database but workbook append failed: {}",
                    e
                ));
            }
        }

        if let Err(e) = oplog(
            &pool.conn,
            "stop",
            employee_id,
            &format!(
                "Stopped timer for {}: {} ({})",
                record.employee_name,
                record.task,
                record.duration_formatted()
            ),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(record)
    }

    pub fn status(pool: &mut DbPool, employee_id: &str) -> AppResult<Option<TimeRecord>> {
        queries::find_active(&pool.conn, employee_id)
    }
}
