#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn skd() -> Command {
    cargo_bin_cmd!("skedjit")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_skedjit.sqlite", name));
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

/// Form fields of the reference event, as `--field=value` arguments
pub fn proper_post_data() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "My Wonderful Event"),
        ("description", "This event will change the world!"),
        ("access", "access"),
        ("year", "2017"),
        ("month", "12"),
        ("day", "12"),
        ("hour", "10"),
        ("minute", "00"),
        ("ampm", "am"),
        ("timezone", "-5"),
    ]
}

pub fn to_args(fields: &[(&str, &str)]) -> Vec<String> {
    fields
        .iter()
        .map(|(k, v)| format!("--{}={}", k, v))
        .collect()
}

/// Initialize an empty DB in test mode
pub fn init_db(db_path: &str) {
    skd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Run `create` with the given fields and return the new event's link
pub fn create_event(db_path: &str, fields: &[(&str, &str)]) -> String {
    let output = skd()
        .args(["--db", db_path, "--test", "create"])
        .args(to_args(fields))
        .output()
        .expect("failed to run create");
    assert!(
        output.status.success(),
        "create failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("Location: /event/"))
        .map(|l| l.trim().to_string())
        .expect("no Location line in create output")
}
