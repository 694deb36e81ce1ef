//! Smoke tests for the estatectl binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_seed(dir: &Path) {
    fs::write(
        dir.join("agents.json"),
        r#"[
            {"_id": 101, "name": "Alice Smith", "active": true},
            {"_id": 102, "name": "Bob Johnson", "active": false},
            {"_id": 103, "name": "Carol Lee", "active": true}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join("listings.json"),
        r#"[
            {"_id": 1, "agentId": 101, "price": 250000},
            {"_id": 2, "agentId": 102, "price": 320000},
            {"_id": 3, "agentId": 103, "price": 450000}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join("views.json"),
        r#"[
            {"listingId": 1, "date": "2025-09-01", "views": 100},
            {"listingId": 1, "date": "2025-09-10", "views": 80},
            {"listingId": 2, "date": "2025-09-05", "views": 50},
            {"listingId": 3, "date": "2025-09-08", "views": 200}
        ]"#,
    )
    .unwrap();
}

/// Command isolated from the developer's home config and environment
fn estatectl(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("estatectl").unwrap();
    cmd.env("HOME", home)
        .env_remove("ESTATECTL_CONFIG")
        .env_remove("ESTATECTL_DATA_DIR")
        .env_remove("ESTATECTL_PRICE_THRESHOLD")
        .env_remove("ESTATECTL_BIND")
        .env_remove("DATABASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

// === Help Tests ===

#[test]
fn test_stats_help() {
    let home = TempDir::new().unwrap();
    estatectl(home.path())
        .arg("stats")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed directory"));
}

#[test]
fn test_serve_help() {
    let home = TempDir::new().unwrap();
    estatectl(home.path())
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data source"));
}

// === Stats Command Tests ===

#[test]
fn test_stats_json_output() {
    let home = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    write_seed(data.path());

    let output = estatectl(home.path())
        .arg("stats")
        .arg("--data-dir")
        .arg(data.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        stats,
        serde_json::json!([
            {"agent": "Carol Lee", "listings": 1, "totalViews": 200},
            {"agent": "Alice Smith", "listings": 0, "totalViews": 0}
        ])
    );
}

#[test]
fn test_stats_threshold_flag() {
    let home = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    write_seed(data.path());

    estatectl(home.path())
        .args(["stats", "--format", "table", "--threshold", "100000", "--data-dir"])
        .arg(data.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Smith"))
        .stdout(predicate::str::contains("180"));
}

#[test]
fn test_stats_reads_data_dir_from_env() {
    let home = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    write_seed(data.path());

    estatectl(home.path())
        .env("ESTATECTL_DATA_DIR", data.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Carol Lee"));
}

#[test]
fn test_stats_without_data_dir_fails() {
    let home = TempDir::new().unwrap();

    estatectl(home.path())
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data directory"));
}

#[test]
fn test_stats_reports_malformed_documents() {
    let home = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    write_seed(data.path());
    fs::write(data.path().join("views.json"), r#"[{"views": 3}]"#).unwrap();

    estatectl(home.path())
        .arg("stats")
        .arg("--data-dir")
        .arg(data.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed views document"));
}

// === Environment Tests ===

#[test]
fn test_rust_log_from_dotenv_is_honored() {
    let home = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    write_seed(data.path());
    let workdir = TempDir::new().unwrap();
    fs::write(workdir.path().join(".env"), "RUST_LOG=debug\n").unwrap();

    estatectl(home.path())
        .current_dir(workdir.path())
        .arg("stats")
        .arg("--data-dir")
        .arg(data.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded .env from"));
}
