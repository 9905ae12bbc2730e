use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use timebook::excel::{PRODUCTIVE_HEADERS, PRODUCTIVE_SHEET, SpreadsheetStore, XlsxStore};

mod common;
use common::{init_workspace, setup_paths, tb};

/// The CLI prints progress messages before the JSON payload; the payload is
/// the trailing block.
fn json_tail(stdout: &str) -> Value {
    let start = stdout.find('{').expect("JSON object in output");
    serde_json::from_str(&stdout[start..]).expect("valid JSON")
}

#[test]
fn end_to_end_timer_and_sync() {
    let (db, wb) = setup_paths("e2e_sync");
    init_workspace(&db, &wb);

    tb().args([
        "--db",
        &db,
        "--workbook",
        &wb,
        "--tz",
        "UTC",
        "start",
        "--employee",
        "E1",
        "--name",
        "Alice",
        "--project-id",
        "P1",
        "--project-name",
        "Projekt",
        "--task",
        "LOADING",
        "--at",
        "2024-01-01T08:00:00Z",
    ])
    .assert()
    .success();

    tb().args([
        "--db",
        &db,
        "--workbook",
        &wb,
        "--tz",
        "UTC",
        "stop",
        "--employee",
        "E1",
        "--at",
        "2024-01-01T08:30:00Z",
    ])
    .assert()
    .success();

    let output = tb()
        .args(["--db", &db, "--workbook", &wb, "--tz", "UTC", "sync", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let outcome = json_tail(&String::from_utf8_lossy(&output));
    assert_eq!(outcome["success"], Value::Bool(true));
    assert_eq!(outcome["productive_count"], 1);
    assert_eq!(outcome["non_productive_count"], 0);
    // The stop already appended the row, so the sync matches it instead of
    // inserting a duplicate.
    assert_eq!(outcome["inserted_count"], 0);
    assert_eq!(outcome["updated_count"], 1);

    // Exactly one productive worksheet row, with the half-hour rendered.
    let store = XlsxStore::new(&wb);
    let rows = store.read_rows(PRODUCTIVE_SHEET).expect("read workbook");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("EmployeeId").map(String::as_str), Some("E1"));
    assert_eq!(rows[0].get("StartTime").map(String::as_str), Some("08:00:00"));
    assert_eq!(rows[0].get("DurationHours").map(String::as_str), Some("0.5"));
}

#[test]
fn manual_workbook_row_syncs_into_database() {
    let (db, wb) = setup_paths("e2e_manual_row");
    init_workspace(&db, &wb);

    // Hand-insert a row the way a human editing the workbook would.
    let store = XlsxStore::new(&wb);
    store
        .replace_rows(
            PRODUCTIVE_SHEET,
            &PRODUCTIVE_HEADERS,
            vec![vec![
                "2024-02-01".to_string(),
                "E7".to_string(),
                "Bob".to_string(),
                "P2".to_string(),
                "Sklad".to_string(),
                "PACKING".to_string(),
                "09:00:00".to_string(),
                "10:30:00".to_string(),
                String::new(),
                String::new(),
            ]],
        )
        .expect("seed workbook");

    let output = tb()
        .args(["--db", &db, "--workbook", &wb, "--tz", "UTC", "sync", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let outcome = json_tail(&String::from_utf8_lossy(&output));
    assert_eq!(outcome["success"], Value::Bool(true));
    assert_eq!(outcome["inserted_count"], 1);
    assert_eq!(outcome["upserted_from_excel"], 1);

    tb().args(["--db", &db, "--workbook", &wb, "list"])
        .assert()
        .success()
        .stdout(contains("PACKING"))
        .stdout(contains("E7"));
}

#[test]
fn operations_are_logged() {
    let (db, wb) = setup_paths("e2e_log");
    init_workspace(&db, &wb);

    tb().args([
        "--db",
        &db,
        "--workbook",
        &wb,
        "start",
        "--employee",
        "E1",
        "--name",
        "Alice",
        "--task",
        "BREAK",
        "--non-productive",
    ])
    .assert()
    .success();

    tb().args(["--db", &db, "--workbook", &wb, "stop", "--employee", "E1"])
        .assert()
        .success();

    tb().args(["--db", &db, "--workbook", &wb, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("start"))
        .stdout(contains("stop"));
}

#[test]
fn del_removes_record() {
    let (db, wb) = setup_paths("e2e_del");
    init_workspace(&db, &wb);

    tb().args([
        "--db",
        &db,
        "--workbook",
        &wb,
        "start",
        "--employee",
        "E1",
        "--name",
        "Alice",
        "--task",
        "BREAK",
        "--non-productive",
    ])
    .assert()
    .success();

    tb().args(["--db", &db, "--workbook", &wb, "stop", "--employee", "E1"])
        .assert()
        .success();

    let pool = common::open_pool(&db);
    let records = timebook::db::queries::list_completed(&pool.conn).expect("list");
    assert_eq!(records.len(), 1);
    let id = records[0].id.clone();
    drop(pool);

    tb().args(["--db", &db, "--workbook", &wb, "del", "--id", &id])
        .assert()
        .success()
        .stdout(contains("deleted"));

    tb().args(["--db", &db, "--workbook", &wb, "del", "--id", &id])
        .assert()
        .failure()
        .stderr(contains("No record found"));
}

#[test]
fn list_filters_by_period() {
    let (db, wb) = setup_paths("e2e_list_period");
    init_workspace(&db, &wb);

    for (emp, at_start, at_stop) in [
        ("E1", "2024-01-10T08:00:00Z", "2024-01-10T09:00:00Z"),
        ("E2", "2024-03-05T08:00:00Z", "2024-03-05T09:00:00Z"),
    ] {
        tb().args([
            "--db",
            &db,
            "--workbook",
            &wb,
            "start",
            "--employee",
            emp,
            "--name",
            emp,
            "--task",
            "BREAK",
            "--non-productive",
            "--at",
            at_start,
        ])
        .assert()
        .success();

        tb().args([
            "--db",
            &db,
            "--workbook",
            &wb,
            "stop",
            "--employee",
            emp,
            "--at",
            at_stop,
        ])
        .assert()
        .success();
    }

    tb().args([
        "--db",
        &db,
        "--workbook",
        &wb,
        "list",
        "--period",
        "2024-01",
    ])
    .assert()
    .success()
    .stdout(contains("E1"))
    .stdout(contains("2024-01-10"))
    .stdout(contains("2024-03-05").not());
}
