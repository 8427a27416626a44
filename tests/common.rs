#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rstationrota::config::Config;
use rstationrota::core::roster::RosterLogic;
use rstationrota::db::initialize::init_db;
use rstationrota::db::pool::DbPool;
use rstationrota::models::station::Station;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, with HOME pointed at a scratch directory so a real
/// user configuration never leaks into the run.
pub fn rsr() -> Command {
    let mut home: PathBuf = env::temp_dir();
    home.push("rstationrota_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("rstationrota");
    cmd.env("HOME", &home).env("APPDATA", &home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rstationrota.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Fresh, migrated database for library-level tests.
pub fn open_test_pool(name: &str) -> (DbPool, String) {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    (pool, db_path)
}

/// Default layout (Plock, Pack with 2 lanes, KM, Decating, Rep; manual "Notes").
pub fn test_config(db_path: &str) -> Config {
    Config {
        database: db_path.to_string(),
        ..Config::default()
    }
}

/// Stations A and C (unordered) and B (two lanes).
pub fn abc_config(db_path: &str) -> Config {
    Config {
        database: db_path.to_string(),
        stations: vec![
            Station::new("A", 0),
            Station::new("B", 2),
            Station::new("C", 0),
        ],
        ..Config::default()
    }
}

pub fn add_workers(pool: &mut DbPool, ids: &[&str]) {
    for id in ids {
        RosterLogic::add(pool, id, &format!("Worker {}", id), "").expect("add worker");
    }
}

pub fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

/// `--test init` plus a four-worker roster.
pub fn init_db_with_roster(db_path: &str) {
    rsr()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (id, name) in [("w1", "Anna"), ("w2", "Bruno"), ("w3", "Carla"), ("w4", "Dario")] {
        rsr()
            .args(["--db", db_path, "worker", "add", id, name])
            .assert()
            .success();
    }
}
