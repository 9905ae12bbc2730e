use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Administrative delete of one record by id.
    pub fn apply(pool: &mut DbPool, id: &str) -> AppResult<()> {
        let deleted = queries::delete_record(&pool.conn, id)?;
        if deleted == 0 {
            return Err(AppError::RecordNotFound(id.to_string()));
        }

        if let Err(e) = oplog(&pool.conn, "del", id, "Record deleted") {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(())
    }
}
