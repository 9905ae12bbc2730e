use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::SyncLogic;
use crate::core::tz::resolve_workbook_timezone;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::excel::XlsxStore;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sync { json } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let store = XlsxStore::new(&cfg.workbook);
        let tz = resolve_workbook_timezone(&cfg.excel_timezone);

        let outcome = SyncLogic::run(&mut pool, &store, tz);

        if *json {
            println!(
                "{}",
                serde_json::to_string_pretty(&outcome)
                    .map_err(|e| AppError::Other(e.to_string()))?
            );
        } else if let Some(message) = &outcome.message {
            success(message);
        }

        // Exit code reflects the structured outcome.
        if !outcome.success {
            let err = outcome
                .error
                .unwrap_or_else(|| "synchronization failed".to_string());
            return Err(AppError::Other(err));
        }
    }

    Ok(())
}
