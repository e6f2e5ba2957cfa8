//! Capture service tests

use shutter::core::models::{DiffKind, Slot, Snapshot};
use shutter::core::ports::SnapshotStore;
use shutter::core::services::{CaptureOutcome, Snapshotter};
use shutter::core::transform::{IgnoreRule, Scrubber, Transform};
use shutter::{Config, FileSnapshotStore};

use crate::common::TestProject;
use crate::common::mocks::MockSnapshotStore;

#[test]
fn test_capture_accept_then_match() {
    let snap = Snapshotter::new(MockSnapshotStore::new(), "0.1.0");
    let transform = Transform::new();

    assert_eq!(
        snap.snap_string("TestGreeting", "hi\n", &transform).unwrap(),
        CaptureOutcome::Created
    );
    snap.store().accept("TestGreeting").unwrap();

    assert_eq!(
        snap.snap_string("TestGreeting", "hi\n", &transform).unwrap(),
        CaptureOutcome::Matched
    );
    assert!(snap.store().list_pending().unwrap().is_empty());
}

#[test]
fn test_change_overwrites_previous_pending() {
    let snap = Snapshotter::new(MockSnapshotStore::new(), "0.1.0");
    snap.store()
        .save(&Snapshot::new("0.1.0", "t", "base\n"), Slot::Baseline)
        .unwrap();

    snap.snap_string("t", "first\n", &Transform::new()).unwrap();
    let outcome = snap.snap_string("t", "second\n", &Transform::new()).unwrap();

    assert!(matches!(outcome, CaptureOutcome::Changed { .. }));
    assert_eq!(snap.store().read("t", Slot::Pending).unwrap().content, "second\n");
}

#[test]
fn test_changed_diff_covers_both_sides() {
    let snap = Snapshotter::new(MockSnapshotStore::new(), "0.1.0");
    snap.store()
        .save(&Snapshot::new("0.1.0", "t", "a\nb\n"), Slot::Baseline)
        .unwrap();

    let CaptureOutcome::Changed { diff } = snap.snap_string("t", "a\nc\n", &Transform::new()).unwrap()
    else {
        panic!("expected a change");
    };
    assert_eq!(diff.iter().filter(|l| l.kind == DiffKind::Removed).count(), 1);
    assert_eq!(diff.iter().filter(|l| l.kind == DiffKind::Added).count(), 1);
}

#[test]
fn test_json_capture_with_rules() {
    let snap = Snapshotter::new(MockSnapshotStore::new(), "0.1.0");
    let transform = Transform::new()
        .scrub(Scrubber::uuids())
        .ignore(IgnoreRule::keys(["created_at"]).omit());

    snap.snap_json(
        "TestUser",
        r#"{"id":"3f2504e0-4f89-11d3-9a0c-0305e82c3301","created_at":"now","name":"ada"}"#,
        &transform,
    )
    .unwrap();

    assert_eq!(
        snap.store().read("TestUser", Slot::Pending).unwrap().content,
        "{\n  \"id\": \"<UUID>\",\n  \"name\": \"ada\"\n}\n"
    );
}

#[test]
fn test_version_from_config() {
    let project = TestProject::new();
    std::fs::write(project.path().join(".shutter.toml"), "version = \"9\"\n").unwrap();
    let config = Config::at(project.path()).unwrap();

    let snap = Snapshotter::from_config(&config);
    snap.snap_string("versioned", "x", &Transform::new()).unwrap();

    let stored = FileSnapshotStore::new(project.snapshot_dir())
        .read("versioned", Slot::Pending)
        .unwrap();
    assert_eq!(stored.version, "9");
}
