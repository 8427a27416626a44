use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_roster, rsr, setup_test_db};

const DAY: &str = "2026-03-10";
const NEXT_DAY: &str = "2026-03-11";

/// Roster of four, Plock and Pack both needing two on DAY, then planned.
fn planned_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_db_with_roster(&db_path);

    for station in ["Plock", "Pack"] {
        rsr()
            .args(["--db", &db_path, "need", "set", station, "2", "--date", DAY])
            .assert()
            .success();
    }

    rsr()
        .args([
            "--db",
            &db_path,
            "plan",
            "--workers",
            "w1,w2,w3,w4",
            "--manual",
            "w5 on holiday",
            "--date",
            DAY,
        ])
        .assert()
        .success()
        .stdout(contains("Planned 2026-03-10: 4 worker(s) placed."));

    db_path
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rsr()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_worker_add_and_list() {
    let db_path = setup_test_db("cli_workers");
    init_db_with_roster(&db_path);

    rsr()
        .args(["--db", &db_path, "worker", "list"])
        .assert()
        .success()
        .stdout(contains("Anna").and(contains("Dario")));

    rsr()
        .args(["--db", &db_path, "worker", "add", "w1", "Again"])
        .assert()
        .failure();

    rsr()
        .args(["--db", &db_path, "worker", "add", "w5,w6", "Twins"])
        .assert()
        .code(2)
        .stderr(contains("Invalid worker id 'w5,w6'"));
}

#[test]
fn test_need_set_and_list() {
    let db_path = setup_test_db("cli_needs");
    init_db_with_roster(&db_path);

    rsr()
        .args(["--db", &db_path, "need", "set", "Rep", "3", "--date", DAY])
        .assert()
        .success();

    rsr()
        .args(["--db", &db_path, "need", "list", "--date", DAY])
        .assert()
        .success()
        .stdout(contains("Rep").and(contains("Total: 3")));

    rsr()
        .args(["--db", &db_path, "need", "set", "Notes", "1", "--date", DAY])
        .assert()
        .code(2)
        .stderr(contains("free text"));
}

#[test]
fn test_plan_and_show() {
    let db_path = planned_db("cli_plan_show");

    rsr()
        .args(["--db", &db_path, "show", "--date", DAY])
        .assert()
        .success()
        .stdout(
            contains("Assignment for 2026-03-10")
                .and(contains("w1, w2"))
                .and(contains("Pack:1"))
                .and(contains("w5 on holiday")),
        );

    rsr()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Ledger mirrors assignments."));
}

#[test]
fn test_plan_reports_unassigned() {
    let db_path = setup_test_db("cli_plan_unassigned");
    init_db_with_roster(&db_path);

    rsr()
        .args(["--db", &db_path, "need", "set", "KM", "1", "--date", DAY])
        .assert()
        .success();

    rsr()
        .args(["--db", &db_path, "plan", "--all", "--date", DAY])
        .assert()
        .success()
        .stdout(contains("Unassigned today: w2, w3, w4"));
}

#[test]
fn test_plan_validation_errors() {
    let db_path = setup_test_db("cli_plan_errors");
    init_db_with_roster(&db_path);

    rsr()
        .args(["--db", &db_path, "plan", "--date", DAY])
        .assert()
        .code(2)
        .stderr(contains("No workers selected"));

    rsr()
        .args(["--db", &db_path, "plan", "--workers", "w1,ghost", "--date", DAY])
        .assert()
        .code(2)
        .stderr(contains("ghost"));

    rsr()
        .args(["--db", &db_path, "plan", "--workers", "w1", "--date", "10/03/2026"])
        .assert()
        .code(2)
        .stderr(contains("Invalid date"));
}

#[test]
fn test_move_lane_change() {
    let db_path = planned_db("cli_move_lane");

    rsr()
        .args([
            "--db", &db_path, "move", "w3", "--from", "Pack:1", "--to", "Pack:2", "--date", DAY,
        ])
        .assert()
        .success()
        .stdout(contains("Moved w3 from Pack:1 to Pack:2 on 2026-03-10."));

    rsr()
        .args(["--db", &db_path, "db", "--check", "--date", DAY])
        .assert()
        .success();
}

#[test]
fn test_move_errors() {
    let db_path = planned_db("cli_move_errors");

    rsr()
        .args([
            "--db", &db_path, "move", "w1", "--from", "Rep", "--to", "KM", "--date", DAY,
        ])
        .assert()
        .code(2)
        .stderr(contains("No assignment for w1 at Rep"));

    rsr()
        .args([
            "--db", &db_path, "move", "w1", "--from", "Plock", "--to", "Pack", "--date", DAY,
        ])
        .assert()
        .code(2)
        .stderr(contains("Invalid lane"));

    rsr()
        .args([
            "--db", &db_path, "move", "w1", "--from", "Plock", "--to", "Pack:x", "--date", DAY,
        ])
        .assert()
        .code(2)
        .stderr(contains("Invalid slot"));
}

#[test]
fn test_pending_confirm_cancel_without_moves() {
    let db_path = planned_db("cli_pending");

    rsr()
        .args(["--db", &db_path, "pending"])
        .assert()
        .success()
        .stdout(contains("No pending moves."));

    rsr()
        .args(["--db", &db_path, "confirm", "999"])
        .assert()
        .code(2)
        .stderr(contains("No pending move with token 999"));

    rsr()
        .args(["--db", &db_path, "cancel", "999"])
        .assert()
        .failure();
}

#[test]
fn test_stations_and_rotation_view() {
    let db_path = planned_db("cli_stations");

    rsr()
        .args(["--db", &db_path, "stations"])
        .assert()
        .success()
        .stdout(contains("Pack (2 lanes)").and(contains("free text")));

    rsr()
        .args(["--db", &db_path, "stations", "--worker", "w1", "--date", NEXT_DAY])
        .assert()
        .success()
        .stdout(contains("Stations for w1 on 2026-03-11").and(contains("blocked")));
}

#[test]
fn test_history_view() {
    let db_path = planned_db("cli_history");

    rsr()
        .args(["--db", &db_path, "history", "w1", "--date", NEXT_DAY])
        .assert()
        .success()
        .stdout(
            contains("History of w1")
                .and(contains("Mean of visited stations: 1.00"))
                .and(contains("Least visited: Pack, KM, Decating, Rep")),
        );
}

#[test]
fn test_log_records_operations() {
    let db_path = planned_db("cli_log");

    rsr()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("migration_applied")
                .and(contains("worker"))
                .and(contains("plan")),
        );
}

#[test]
fn test_config_check_defaults() {
    rsr()
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration OK: 5 stations"));
}

#[test]
fn test_db_info() {
    let db_path = planned_db("cli_db_info");

    rsr()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Ledger rows:"));
}
