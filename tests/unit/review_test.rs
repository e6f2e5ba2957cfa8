//! Review workflow tests
//!
//! Sessions are scripted through an in-memory input and the mock store.

use shutter::core::models::{Slot, Snapshot};
use shutter::core::ports::SnapshotStore;
use shutter::core::services::{ReviewSummary, Reviewer, accept_all, reject_all, review};

use crate::common::mocks::MockSnapshotStore;

fn run(store: &MockSnapshotStore, input: &str) -> (ReviewSummary, String) {
    let mut out = Vec::new();
    let summary = review(store, input.as_bytes(), &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[test]
fn test_quit_keeps_earlier_decisions() {
    let store = MockSnapshotStore::with_pending(&["a", "b", "c"]);

    let (summary, _) = run(&store, "a\nq\n");

    assert_eq!(
        summary,
        ReviewSummary {
            accepted: 1,
            rejected: 0,
            skipped: 0,
            interrupted: true,
        }
    );
    assert_eq!(store.baseline_ids(), vec!["a"]);
    assert_eq!(store.list_pending().unwrap(), vec!["b", "c"]);
}

#[test]
fn test_reject_leaves_baseline() {
    let store = MockSnapshotStore::with_pending(&["page"]);
    store
        .save(&Snapshot::new("0.1.0", "page", "old\n"), Slot::Baseline)
        .unwrap();

    let (summary, _) = run(&store, "r\n");

    assert_eq!(summary.rejected, 1);
    assert_eq!(store.read("page", Slot::Baseline).unwrap().content, "old\n");
    assert!(store.list_pending().unwrap().is_empty());
}

#[test]
fn test_diff_toggle_shows_full_content() {
    let store = MockSnapshotStore::with_pending(&["page"]);
    store
        .save(&Snapshot::new("0.1.0", "page", "old\n"), Slot::Baseline)
        .unwrap();

    let (summary, out) = run(&store, "d\ns\n");

    assert_eq!(summary.skipped, 1);
    assert!(out.contains("Snapshot changed:"));
    assert!(out.contains("New snapshot:"));
    assert!(out.contains("Skipped page"));
}

#[test]
fn test_choices_are_case_insensitive_words() {
    let store = MockSnapshotStore::with_pending(&["one", "two"]);
    let (summary, _) = run(&store, "ACCEPT\n Reject \n");
    assert_eq!(summary.decided(), 2);
    assert!(!summary.interrupted);
}

#[test]
fn test_failed_accept_is_reported_and_counted_as_skipped() {
    let store = MockSnapshotStore::with_pending(&["flaky", "solid"]);
    store.fail_accept("flaky");

    let (summary, out) = run(&store, "a\na\n");

    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.skipped, 1);
    assert!(out.contains("Failed to accept flaky"));
    assert_eq!(store.list_pending().unwrap(), vec!["flaky"]);
}

#[test]
fn test_accept_remaining_applies_to_current_and_rest() {
    let store = MockSnapshotStore::with_pending(&["a", "b", "c", "d"]);

    let (summary, out) = run(&store, "s\nA\n");

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.accepted, 3);
    assert!(!summary.interrupted);
    assert_eq!(store.baseline_ids(), vec!["b", "c", "d"]);
    assert_eq!(store.list_pending().unwrap(), vec!["a"]);
    assert!(out.contains("Accepted d"));
    assert!(!out.contains("[3/4]"));
}

#[test]
fn test_accept_remaining_stops_at_first_failure() {
    let store = MockSnapshotStore::with_pending(&["a", "b", "c"]);
    store.fail_accept("b");

    let (summary, out) = run(&store, "accept-all\n");

    assert_eq!(
        summary,
        ReviewSummary {
            accepted: 1,
            rejected: 0,
            skipped: 1,
            interrupted: true,
        }
    );
    assert!(out.contains("Failed to accept b"));
    assert_eq!(store.baseline_ids(), vec!["a"]);
    assert_eq!(store.list_pending().unwrap(), vec!["b", "c"]);
}

#[test]
fn test_skip_remaining_leaves_everything_pending() {
    let store = MockSnapshotStore::with_pending(&["a", "b", "c"]);

    let (summary, _) = run(&store, "r\nS\n");

    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.skipped, 2);
    assert!(!summary.interrupted);
    assert_eq!(store.list_pending().unwrap(), vec!["b", "c"]);
}

#[test]
fn test_progress_counter() {
    let store = MockSnapshotStore::with_pending(&["one", "two"]);
    let (_, out) = run(&store, "s\ns\n");
    assert!(out.contains("[1/2] one"));
    assert!(out.contains("[2/2] two"));
}

#[test]
fn test_reviewer_with_explicit_streams() {
    let store = MockSnapshotStore::with_pending(&["only"]);
    let summary = Reviewer::new(&store, &b"a\n"[..], std::io::sink()).run().unwrap();
    assert_eq!(summary.accepted, 1);
}

#[test]
fn test_accept_all_stops_at_first_failure() {
    let store = MockSnapshotStore::with_pending(&["a", "b", "c"]);
    store.fail_accept("b");

    assert!(accept_all(&store).is_err());
    assert_eq!(store.baseline_ids(), vec!["a"]);
    assert_eq!(store.list_pending().unwrap(), vec!["b", "c"]);
}

#[test]
fn test_reject_all_counts() {
    let store = MockSnapshotStore::with_pending(&["a", "b"]);
    assert_eq!(reject_all(&store).unwrap(), 2);
    assert_eq!(reject_all(&store).unwrap(), 0);
}
