use predicates::str::contains;
use timebook::db::queries;

mod common;
use common::{init_workspace, setup_paths, tb};

#[test]
fn start_and_stop_compute_duration() {
    let (db, wb) = setup_paths("timer_duration");
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
    .success()
    .stdout(contains("Started timer for Alice"));

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
    .success()
    .stdout(contains("00:30:00"));

    let pool = common::open_pool(&db);
    let records = queries::list_completed(&pool.conn).expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].duration_seconds, Some(1800));
    assert_eq!(records[0].task, "LOADING");
}

#[test]
fn second_start_is_refused() {
    let (db, wb) = setup_paths("timer_double_start");
    init_workspace(&db, &wb);

    let start_args: [&str; 12] = [
        "--db",
        db.as_str(),
        "--workbook",
        wb.as_str(),
        "start",
        "--employee",
        "E1",
        "--name",
        "Alice",
        "--task",
        "BREAK",
        "--non-productive",
    ];

    tb().args(start_args).assert().success();

    tb().args(start_args)
        .assert()
        .failure()
        .stderr(contains("already has an active timer"));
}

#[test]
fn stop_without_active_timer_fails() {
    let (db, wb) = setup_paths("timer_no_active");
    init_workspace(&db, &wb);

    tb().args(["--db", &db, "--workbook", &wb, "stop", "--employee", "E9"])
        .assert()
        .failure()
        .stderr(contains("No active timer"));
}

#[test]
fn productive_start_requires_project() {
    let (db, wb) = setup_paths("timer_no_project");
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
        "LOADING",
    ])
    .assert()
    .failure()
    .stderr(contains("--project-id is required"));
}

#[test]
fn status_reports_active_timer() {
    let (db, wb) = setup_paths("timer_status");
    init_workspace(&db, &wb);

    tb().args([
        "--db",
        &db,
        "--workbook",
        &wb,
        "status",
        "--employee",
        "E1",
    ])
    .assert()
    .success()
    .stdout(contains("No active timer"));

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

    tb().args([
        "--db",
        &db,
        "--workbook",
        &wb,
        "status",
        "--employee",
        "E1",
    ])
    .assert()
    .success()
    .stdout(contains("Active timer for Alice"))
    .stdout(contains("BREAK"));
}
