use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::TimerLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { employee } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match TimerLogic::status(&mut pool, employee)? {
            Some(timer) => {
                info(format!(
                    "Active timer for {}: {} (since {})",
                    timer.employee_name,
                    timer.task,
                    timer.start_time.format("%Y-%m-%d %H:%M:%S UTC")
                ));
            }
            None => {
                info(format!("No active timer for employee {}.", employee));
            }
        }
    }

    Ok(())
}
