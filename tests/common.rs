#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Pinned reference time used by every test: Monday 2025-03-10, 09:00.
pub const NOW: &str = "2025-03-10 09:00";

pub fn skd() -> Command {
    cargo_bin_cmd!("skedule")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_skedule.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the schema (test mode: no config file update)
pub fn init_db(db_path: &str) {
    skd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Run a subcommand as user u1 with the pinned reference time and
/// return stdout.
pub fn run(db_path: &str, args: &[&str]) -> String {
    run_at(db_path, NOW, args)
}

pub fn run_at(db_path: &str, now: &str, args: &[&str]) -> String {
    let out = skd()
        .args(["--db", db_path, "--user", "u1", "--now", now])
        .args(args)
        .output()
        .expect("spawn skedule");
    String::from_utf8_lossy(&out.stdout).to_string()
}
