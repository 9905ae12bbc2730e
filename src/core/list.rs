use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::time::duration_hours;
use chrono::NaiveDate;

pub struct ListLogic;

impl ListLogic {
    /// Print completed records, optionally filtered by employee and by an
    /// inclusive date range on the start time.
    pub fn print(
        pool: &mut DbPool,
        employee_id: Option<&str>,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<()> {
        let records = queries::list_filtered(&pool.conn, employee_id, bounds)?;

        if records.is_empty() {
            info("No records found.");
            return Ok(());
        }

        println!(
            "{:<36} {:<10} {:<20} {:<20} {:<20} {:>10} {:>7}",
            "ID", "EMPLOYEE", "TASK", "START (UTC)", "END (UTC)", "DURATION", "HOURS"
        );

        for rec in &records {
            let end = rec
                .end_time
                .map(|e| e.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();

            println!(
                "{:<36} {:<10} {:<20} {:<20} {:<20} {:>10} {:>7}",
                rec.id,
                rec.employee_id,
                rec.task,
                rec.start_time.format("%Y-%m-%d %H:%M:%S"),
                end,
                rec.duration_formatted(),
                duration_hours(rec.duration_seconds.unwrap_or(0)),
            );
        }

        println!("\n{} record(s).", records.len());

        Ok(())
    }
}
