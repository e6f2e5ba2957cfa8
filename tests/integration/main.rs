//! Integration tests for the shutter CLI
//!
//! These tests run the binary against temporary projects, testing the full
//! cycle of: test writes pending snapshot -> review -> baseline


use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper function to create a shutter command
fn shutter() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("shutter"))
}

/// Helper to create a project with a Cargo.toml marker
fn setup_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Cargo.toml"), "[package]\nname = \"demo\"\n").unwrap();
    temp
}

/// Helper to write a snapshot file the way a test run would
fn write_snapshot(root: &Path, file_name: &str, test_name: &str, content: &str) {
    let dir = root.join("__snapshots__");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(file_name),
        format!("---\ntest_name: {test_name}\nversion: 0.1.0\n---\n{content}"),
    )
    .unwrap();
}

// =============================================================================
// Basic commands
// =============================================================================

#[test]
fn test_help() {
    shutter()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("accept-all"))
        .stdout(predicate::str::contains("reject-all"));
}

#[test]
fn test_version() {
    shutter()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_list_empty() {
    let temp = setup_project();
    shutter()
        .args(["list", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending snapshots."));
}

#[test]
fn test_list_json() {
    let temp = setup_project();
    write_snapshot(temp.path(), "beta.snap.new", "beta", "b\n");
    write_snapshot(temp.path(), "alpha.snap.new", "alpha", "a\n");
    write_snapshot(temp.path(), "gamma.snap", "gamma", "g\n");

    let output = shutter()
        .args(["--json", "list", "--root"])
        .arg(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["pending"], serde_json::json!(["alpha", "beta"]));
}

#[test]
fn test_discovers_root_from_working_directory() {
    let temp = setup_project();
    write_snapshot(temp.path(), "found.snap.new", "found", "x\n");
    let nested = temp.path().join("src");
    fs::create_dir_all(&nested).unwrap();

    shutter()
        .arg("list")
        .current_dir(&nested)
        .env_remove("CARGO_MANIFEST_DIR")
        .assert()
        .success()
        .stdout(predicate::str::contains("found"));
}

#[test]
fn test_custom_snapshot_dir_from_config() {
    let temp = setup_project();
    fs::write(temp.path().join(".shutter.toml"), "snapshot_dir = \"snaps\"\n").unwrap();
    fs::create_dir_all(temp.path().join("snaps")).unwrap();
    fs::write(
        temp.path().join("snaps/custom.snap.new"),
        "---\ntest_name: custom\nversion: 1\n---\nx\n",
    )
    .unwrap();

    shutter()
        .args(["list", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("custom"));
}

// =============================================================================
// Show
// =============================================================================

#[test]
fn test_show_diff_against_baseline() {
    let temp = setup_project();
    write_snapshot(temp.path(), "page.snap", "page", "a\nb\nc");
    write_snapshot(temp.path(), "page.snap.new", "page", "a\nx\nc");

    shutter()
        .args(["show", "page", "--root"])
        .arg(temp.path())
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Snapshot changed:"))
        .stdout(predicate::str::contains("-    2      | b"))
        .stdout(predicate::str::contains("+         2 | x"));
}

#[test]
fn test_show_json_includes_diff() {
    let temp = setup_project();
    write_snapshot(temp.path(), "page.snap", "page", "a\nb");
    write_snapshot(temp.path(), "page.snap.new", "page", "a\nc");

    let output = shutter()
        .args(["--json", "show", "page", "--root"])
        .arg(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["baseline"], "a\nb");
    assert_eq!(json["snapshot"]["content"], "a\nc");
    assert_eq!(json["diff"][1]["kind"], "removed");
    assert_eq!(json["diff"][2]["kind"], "added");
}

#[test]
fn test_show_missing_fails() {
    let temp = setup_project();
    shutter()
        .args(["show", "nope", "--root"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no pending snapshot for 'nope'"));
}

#[test]
fn test_corrupt_snapshot_is_reported() {
    let temp = setup_project();
    fs::create_dir_all(temp.path().join("__snapshots__")).unwrap();
    fs::write(temp.path().join("__snapshots__/bad.snap.new"), "garbage").unwrap();

    shutter()
        .args(["show", "bad", "--root"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed snapshot file"));
}
