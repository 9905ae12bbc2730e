use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::period_bounds;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, employee } = cmd {
        let bounds = match period {
            Some(p) => Some(period_bounds(p).map_err(AppError::InvalidDate)?),
            None => None,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        ListLogic::print(&mut pool, employee.as_deref(), bounds)?;
    }

    Ok(())
}
