//! Snapshot store port
//!
//! Defines the interface the capture and review services use to persist
//! snapshots. Identifiers passed in are normalized by the store, so both a raw
//! test name and an identifier returned by [`SnapshotStore::list_pending`] work.

use super::super::models::{Slot, Snapshot};
use crate::error::Result;

/// Persistent storage for snapshots, one file per test per [`Slot`]
///
/// Transitions are per snapshot: a failure part-way through a batch leaves
/// earlier transitions applied.
pub trait SnapshotStore {
    /// Write `snapshot` into `slot`, replacing whatever was there
    ///
    /// A failed write leaves the previous slot content intact.
    fn save(&self, snapshot: &Snapshot, slot: Slot) -> Result<()>;

    /// Read the snapshot in `slot` for `test_name`
    ///
    /// Fails with `NotFound` if the slot is empty and `Format` if the file
    /// does not parse.
    fn read(&self, test_name: &str, slot: Slot) -> Result<Snapshot>;

    /// Identifiers with a pending snapshot, in lexical order
    fn list_pending(&self) -> Result<Vec<String>>;

    /// Promote the pending snapshot to baseline
    ///
    /// Fails with `NotFound` if nothing is pending. If the promotion fails the
    /// pending snapshot is still there, so the call can be retried.
    fn accept(&self, test_name: &str) -> Result<()>;

    /// Discard the pending snapshot, leaving any baseline untouched
    ///
    /// Fails with `NotFound` if nothing is pending.
    fn reject(&self, test_name: &str) -> Result<()>;

    /// Whether `slot` holds a snapshot for `test_name`
    fn exists(&self, test_name: &str, slot: Slot) -> Result<bool> {
        match self.read(test_name, slot) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
