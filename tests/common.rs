#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn tb() -> Command {
    cargo_bin_cmd!("timebook")
}

/// Create unique database + workbook paths inside the system temp dir and
/// remove any leftovers from a previous run.
pub fn setup_paths(name: &str) -> (String, String) {
    let mut db: PathBuf = env::temp_dir();
    db.push(format!("{}_timebook.sqlite", name));
    let mut wb: PathBuf = env::temp_dir();
    wb.push(format!("{}_timebook.xlsx", name));

    let db = db.to_string_lossy().to_string();
    let wb = wb.to_string_lossy().to_string();

    fs::remove_file(&db).ok();
    fs::remove_file(&wb).ok();

    (db, wb)
}

/// Initialize database and workbook through the CLI (uses --test so the
/// user's real config file is never touched).
pub fn init_workspace(db: &str, wb: &str) {
    tb().args(["--db", db, "--workbook", wb, "--test", "init"])
        .assert()
        .success();
}

/// Open a DbPool on an initialized test database.
pub fn open_pool(db: &str) -> timebook::db::pool::DbPool {
    let pool = timebook::db::pool::DbPool::new(db).expect("open db");
    timebook::db::initialize::init_db(&pool.conn).expect("init db");
    pool
}
