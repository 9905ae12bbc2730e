use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::errors::AppResult;
use crate::excel::{NON_PRODUCTIVE_HEADERS, NON_PRODUCTIVE_SHEET, PRODUCTIVE_HEADERS, PRODUCTIVE_SHEET, XlsxStore};
use crate::ui::messages::warning;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database (all pending migrations)
///  - the Excel workbook (both partition worksheets with headers)
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.workbook.clone(), cli.test)?;

    println!("⚙️  Initializing timebook…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);
    println!("📊 Workbook    : {}", &cfg.workbook);

    let conn = Connection::open(&cfg.database)?;
    init_db(&conn)?;
    println!("✅ Database initialized at {}", &cfg.database);

    let store = XlsxStore::new(&cfg.workbook);
    store.ensure_workbook(&[
        (PRODUCTIVE_SHEET, &PRODUCTIVE_HEADERS),
        (NON_PRODUCTIVE_SHEET, &NON_PRODUCTIVE_HEADERS),
    ])?;
    println!("✅ Workbook ready at {}", &cfg.workbook);

    if let Err(e) = log::oplog(
        &conn,
        "init",
        "",
        &format!("Initialized database at {}", &cfg.database),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 timebook initialization completed!");
    Ok(())
}
