use crate::cli::commands::start::parse_at;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::TimerLogic;
use crate::core::tz::resolve_workbook_timezone;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::excel::XlsxStore;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stop { employee, at } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let store = XlsxStore::new(&cfg.workbook);
        let tz = resolve_workbook_timezone(&cfg.excel_timezone);

        let record = TimerLogic::stop(&mut pool, &store, tz, employee, parse_at(at)?)?;

        success(format!(
            "Stopped timer for {} ({}): {}.",
            record.employee_name,
            record.task,
            record.duration_formatted()
        ));
    }

    Ok(())
}
