//! Core domain model: one time-tracking record.
//!
//! A record with `end_time == None` is an active timer (at most one per
//! employee). Completed records are the only ones mirrored to the workbook.

use crate::utils::time::format_duration_hms;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TimeRecord {
    /// Opaque UUIDv4 identifier, generated at creation.
    pub id: String,
    pub employee_id: String,
    /// Denormalized: copied at record-creation time, not live-synced.
    pub employee_name: String,
    /// Absent for non-productive records.
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub task: String,
    /// Partitions records between the two workbook worksheets.
    pub is_non_productive: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Derived from end - start on stop, but independently editable through
    /// the workbook; the two may disagree and the system tolerates it.
    pub duration_seconds: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl TimeRecord {
    /// Create a fresh active timer (no end time, no duration).
    #[allow(clippy::too_many_arguments)]
    pub fn new_active(
        employee_id: &str,
        employee_name: &str,
        project_id: Option<String>,
        project_name: Option<String>,
        task: &str,
        is_non_productive: bool,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            employee_name: employee_name.to_string(),
            project_id,
            project_name,
            task: task.to_string(),
            is_non_productive,
            start_time,
            end_time: None,
            duration_seconds: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// `HH:MM:SS` rendering of the stored duration (00:00:00 when absent).
    pub fn duration_formatted(&self) -> String {
        format_duration_hms(self.duration_seconds.unwrap_or(0))
    }
}
