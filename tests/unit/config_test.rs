//! Configuration and project root discovery tests

use std::fs;

use serial_test::serial;
use shutter::paths::{PROJECT_MARKER, find_project_root, search_start};
use shutter::{Config, SnapshotError};

use crate::common::TestProject;

#[test]
fn test_discover_from_subdirectory() {
    let project = TestProject::new();
    let nested = project.path().join("tests/fixtures");
    fs::create_dir_all(&nested).unwrap();

    let config = Config::discover_from(&nested).unwrap();
    assert_eq!(config.project_root(), project.path());
    assert_eq!(config.snapshot_dir(), project.snapshot_dir());
}

#[test]
fn test_custom_snapshot_dir() {
    let project = TestProject::new();
    fs::write(
        project.path().join(".shutter.toml"),
        "snapshot_dir = \"tests/snapshots\"\n",
    )
    .unwrap();

    let config = Config::at(project.path()).unwrap();
    assert_eq!(config.snapshot_dir(), project.path().join("tests/snapshots"));
}

#[test]
fn test_unknown_key_type_is_config_error() {
    let project = TestProject::new();
    fs::write(project.path().join(".shutter.toml"), "snapshot_dir = 3\n").unwrap();

    let err = Config::at(project.path()).unwrap_err();
    assert!(matches!(err, SnapshotError::Config { .. }));
    assert!(err.to_string().contains(".shutter.toml"));
}

#[test]
fn test_root_not_found_names_marker() {
    let temp = tempfile::TempDir::new().unwrap();
    let err = find_project_root(temp.path(), "no-such-marker.toml").unwrap_err();
    assert!(err.to_string().contains("no-such-marker.toml"));
}

#[test]
#[serial]
fn test_discovery_ignores_working_directory() {
    let elsewhere = tempfile::TempDir::new().unwrap();
    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(elsewhere.path()).unwrap();

    // cargo sets CARGO_MANIFEST_DIR for test binaries, so discovery still
    // lands on this package
    let start = search_start();
    let config = Config::discover();
    std::env::set_current_dir(original).unwrap();

    assert!(start.unwrap().join(PROJECT_MARKER).is_file());
    assert_eq!(
        config.unwrap().project_root(),
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
    );
}
