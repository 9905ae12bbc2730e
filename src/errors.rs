//! Unified application error type.
//! All modules (db, core, excel, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors (row-scoped: the sync loop logs and skips these)
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid duration value: {0}")]
    InvalidDuration(String),

    #[error("Missing required cell: {0}")]
    MissingCell(String),

    // ---------------------------
    // Workbook errors
    // ---------------------------
    #[error("Workbook error: {0}")]
    Workbook(String),

    // ---------------------------
    // Timer logic errors
    // ---------------------------
    #[error("Employee {0} already has an active timer")]
    TimerAlreadyRunning(String),

    #[error("No active timer for employee {0}")]
    NoActiveTimer(String),

    #[error("No record found with id {0}")]
    RecordNotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
