//! File snapshot store tests
//!
//! Lifecycle transitions against a real directory.

use shutter::core::ports::SnapshotStore;
use shutter::{FileSnapshotStore, Slot, Snapshot, SnapshotError};

use crate::common::TestProject;

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_accept_promotes_pending() {
    let project = TestProject::new();
    let store = project.store();
    store
        .save(&Snapshot::new("0.1.0", "TestLogin", "welcome\n"), Slot::Pending)
        .unwrap();

    store.accept("TestLogin").unwrap();

    assert_eq!(store.read("TestLogin", Slot::Baseline).unwrap().content, "welcome\n");
    assert!(store.read("TestLogin", Slot::Pending).unwrap_err().is_not_found());
}

#[test]
fn test_accept_replaces_existing_baseline() {
    let project = TestProject::new();
    project.put("greeting", "old\n", Slot::Baseline);
    project.put("greeting", "new\n", Slot::Pending);

    project.store().accept("greeting").unwrap();

    assert_eq!(project.store().read("greeting", Slot::Baseline).unwrap().content, "new\n");
}

#[test]
fn test_reject_keeps_baseline() {
    let project = TestProject::new();
    project.put("greeting", "old\n", Slot::Baseline);
    project.put("greeting", "new\n", Slot::Pending);

    project.store().reject("greeting").unwrap();

    assert_eq!(project.store().read("greeting", Slot::Baseline).unwrap().content, "old\n");
    assert!(!project.store().exists("greeting", Slot::Pending).unwrap());
}

#[test]
fn test_accept_and_reject_without_pending() {
    let project = TestProject::new();
    let store = project.store();

    assert!(matches!(
        store.accept("nothing"),
        Err(SnapshotError::NotFound { slot: Slot::Pending, .. })
    ));
    assert!(store.reject("nothing").unwrap_err().is_not_found());
}

#[test]
fn test_corrupt_pending_is_not_promoted() {
    let project = TestProject::new();
    project.put("broken", "good\n", Slot::Baseline);
    project.write_raw("broken.snap.new", "garbage");

    let err = project.store().accept("broken").unwrap_err();

    assert!(matches!(err, SnapshotError::Format { .. }));
    assert!(project.snapshot_dir().join("broken.snap.new").exists());
    assert_eq!(project.store().read("broken", Slot::Baseline).unwrap().content, "good\n");
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_files_use_normalized_identifier() {
    let project = TestProject::new();
    project.put("TestHTTPClient", "x", Slot::Pending);
    project.put("TestHTTPClient", "x", Slot::Baseline);

    assert!(project.snapshot_dir().join("test_h_t_t_p_client.snap.new").is_file());
    assert!(project.snapshot_dir().join("test_h_t_t_p_client.snap").is_file());
}

#[test]
fn test_list_pending_is_sorted_and_ignores_other_files() {
    let project = TestProject::new();
    project.put("zeta", "z", Slot::Pending);
    project.put("alpha", "a", Slot::Pending);
    project.put("middle", "m", Slot::Baseline);
    project.write_raw("notes.txt", "not a snapshot");

    assert_eq!(project.store().list_pending().unwrap(), vec!["alpha", "zeta"]);
}

#[test]
fn test_list_pending_without_directory() {
    let project = TestProject::new();
    assert!(project.store().list_pending().unwrap().is_empty());
    assert!(!project.snapshot_dir().exists());
}

#[test]
fn test_save_creates_nested_directory() {
    let project = TestProject::new();
    let store = FileSnapshotStore::new(project.path().join("tests/snaps/deep"));
    store
        .save(&Snapshot::new("1", "nested", "x"), Slot::Pending)
        .unwrap();
    assert!(project.path().join("tests/snaps/deep/nested.snap.new").is_file());
}

#[test]
fn test_empty_identifier_is_rejected() {
    let project = TestProject::new();
    let err = project
        .store()
        .save(&Snapshot::new("1", "!!!", "x"), Slot::Pending)
        .unwrap_err();
    assert!(matches!(err, SnapshotError::EmptyIdentifier(_)));
}

#[test]
fn test_raw_name_and_identifier_address_same_file() {
    let project = TestProject::new();
    project.put("Test Login Page", "x", Slot::Pending);

    let ids = project.store().list_pending().unwrap();
    assert_eq!(ids, vec!["test_login_page"]);
    assert_eq!(
        project.store().read(&ids[0], Slot::Pending).unwrap().test_name,
        "Test Login Page"
    );
}
