use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::TimerLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::{DateTime, Utc};

pub(crate) fn parse_at(at: &Option<String>) -> AppResult<Option<DateTime<Utc>>> {
    match at {
        Some(s) => {
            let dt = DateTime::parse_from_rfc3339(s)
                .map_err(|_| AppError::InvalidTime(s.clone()))?
                .with_timezone(&Utc);
            Ok(Some(dt))
        }
        None => Ok(None),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start {
        employee,
        name,
        task,
        project_id,
        project_name,
        non_productive,
        at,
    } = cmd
    {
        if !non_productive && project_id.is_none() {
            return Err(AppError::Config(
                "--project-id is required for productive records (or pass --non-productive)"
                    .to_string(),
            ));
        }

        let mut pool = DbPool::new(&cfg.database)?;

        let record = TimerLogic::start(
            &mut pool,
            employee,
            name,
            project_id.clone(),
            project_name.clone(),
            task,
            *non_productive,
            parse_at(at)?,
        )?;

        success(format!(
            "Started timer for {} ({}) at {}.",
            record.employee_name,
            record.task,
            record.start_time.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    Ok(())
}
