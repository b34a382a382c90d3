#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn vt() -> Command {
    cargo_bin_cmd!("vesseltreat")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_vesseltreat.sqlite", name));
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

/// Initialize the DB (schema only, config file untouched)
pub fn init_db(db_path: &str) {
    vt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize the DB and store a draft with every field and both signatures
pub fn init_db_with_complete_draft(db_path: &str) {
    init_db(db_path);

    vt().args([
        "--db",
        db_path,
        "--test",
        "form",
        "set",
        "vessel",
        "vessel-001",
        "tankNumber",
        "tank-2",
        "dyeColor",
        "blue",
        "dischargeRate",
        "12.5",
        "quantityDischarged",
        "200",
        "comments",
        "Routine treatment",
    ])
    .assert()
    .success();

    vt().args([
        "--db",
        db_path,
        "--test",
        "form",
        "sign",
        "--technician",
        "data:image/png;base64,TECH",
        "--operator",
        "data:image/png;base64,OPER",
    ])
    .assert()
    .success();
}

/// Read the raw draft JSON stored under the default key, if any
pub fn stored_draft(db_path: &str) -> Option<String> {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(
        "SELECT payload FROM drafts WHERE key = 'treatmentLogDraft'",
        [],
        |row| row.get(0),
    )
    .ok()
}

/// Fake `$HOME` holding a config with a short autosave interval.
/// Pass the returned dir as `HOME` to the binary.
pub fn home_with_autosave(name: &str, db_path: &str, secs: u64) -> String {
    let mut home: PathBuf = env::temp_dir();
    home.push(format!("{}_home", name));
    fs::remove_dir_all(&home).ok();

    let dir = home.join(".vesseltreat");
    fs::create_dir_all(&dir).expect("create config dir");
    fs::write(
        dir.join("vesseltreat.conf"),
        format!("database: {}\nautosave_interval_secs: {}\n", db_path, secs),
    )
    .expect("write config");

    home.to_string_lossy().to_string()
}
