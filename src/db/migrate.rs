use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `time_records` table exists.
fn records_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='time_records'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if `time_records` has a given column.
fn records_has_column(conn: &Connection, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('time_records')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `time_records` table with the modern schema.
///
/// Timestamps are TEXT columns in UTC `YYYY-MM-DD HH:MM:SS`; the fixed
/// width keeps lexicographic comparison equal to chronological comparison,
/// which the window-match query depends on. A NULL end_time marks an
/// active timer.
fn create_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS time_records (
            id                TEXT PRIMARY KEY,
            employee_id       TEXT NOT NULL,
            employee_name     TEXT NOT NULL DEFAULT '',
            project_id        TEXT,
            project_name      TEXT,
            task              TEXT NOT NULL DEFAULT '',
            is_non_productive INTEGER NOT NULL DEFAULT 0,
            start_time        TEXT NOT NULL,
            end_time          TEXT,
            duration_seconds  INTEGER,
            created_at        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_employee_start
            ON time_records(employee_id, start_time);
        CREATE INDEX IF NOT EXISTS idx_records_end
            ON time_records(end_time);
        "#,
    )?;
    Ok(())
}

/// Databases created before project names were denormalized onto records
/// only carry `project_id`. Add the missing column once, tracked in the log
/// table like every other applied migration.
fn migrate_add_project_name(conn: &Connection) -> Result<()> {
    let version = "20250412_0001_add_project_name";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if !records_has_column(conn, "project_name")? {
        conn.execute("ALTER TABLE time_records ADD COLUMN project_name TEXT;", [])?;
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added project_name to time_records')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'project_name' to time_records",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create records table if missing, else make sure indexes exist
    if !records_table_exists(conn)? {
        create_records_table(conn)?;
    } else {
        conn.execute_batch(
            r#"
            CREATE INDEX IF NOT EXISTS idx_records_employee_start
                ON time_records(employee_id, start_time);
            CREATE INDEX IF NOT EXISTS idx_records_end
                ON time_records(end_time);
            "#,
        )?;

        migrate_add_project_name(conn)?;
    }

    Ok(())
}
