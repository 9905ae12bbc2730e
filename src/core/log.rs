use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub struct LogLogic;

impl LogLogic {
    /// Print the internal operations log table.
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in entries {
            let op_target = if target.is_empty() {
                operation
            } else {
                format!("{} ({})", operation, target)
            };

            println!("{:>5}: {} | {:<42} => {}", id, date, op_target, message);
        }

        Ok(())
    }
}
