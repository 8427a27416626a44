mod common;
use common::{init_db_with_roster, rsr, setup_test_db, temp_out};
use std::fs;

fn db_with_plan(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_db_with_roster(&db_path);

    for (date, station) in [("2026-03-09", "KM"), ("2026-03-10", "Rep")] {
        rsr()
            .args(["--db", &db_path, "need", "set", station, "2", "--date", date])
            .assert()
            .success();
        rsr()
            .args(["--db", &db_path, "plan", "--workers", "w1,w2", "--date", date])
            .assert()
            .success();
    }

    db_path
}

#[test]
fn test_export_ledger_csv_all() {
    let db_path = db_with_plan("export_csv_all");
    let out = temp_out("export_csv_all", "csv");

    rsr()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("id,date,worker_id,station,lane"));
    assert!(content.contains("2026-03-09,w1,KM"));
    assert!(content.contains("2026-03-10,w2,Rep"));
}

#[test]
fn test_export_ledger_json_range() {
    let db_path = db_with_plan("export_json_range");
    let out = temp_out("export_json_range", "json");

    rsr()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--since",
            "2026-03-10", "--until", "2026-03-10",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("json array");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["station"] == "Rep"));
}

#[test]
fn test_export_refuses_bad_date() {
    let db_path = db_with_plan("export_bad_date");
    let out = temp_out("export_bad_date", "csv");

    rsr()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--since", "yesterday",
        ])
        .assert()
        .failure();
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = db_with_plan("backup_db");

    let plain = temp_out("backup_plain", "sqlite");
    rsr()
        .args(["--db", &db_path, "backup", "--file", &plain, "--force"])
        .assert()
        .success();
    assert!(fs::metadata(&plain).is_ok());

    let zipped = temp_out("backup_zipped", "sqlite");
    let zip_path = temp_out("backup_zipped", "zip");
    rsr()
        .args(["--db", &db_path, "backup", "--file", &zipped, "--compress", "--force"])
        .assert()
        .success();
    assert!(fs::metadata(&zip_path).is_ok());
    assert!(fs::metadata(&zipped).is_err());
}
