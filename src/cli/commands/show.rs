//! Show command - print one pending snapshot

use std::path::Path;

use shutter::core::ports::SnapshotStore;
use shutter::output::{OutputMode, ShowResult};
use shutter::{Slot, histogram_diff};

/// Show the pending snapshot for `name`, diffed against its baseline if any
pub fn show(root: Option<&Path>, name: &str, mode: OutputMode) -> anyhow::Result<()> {
    let store = super::open_store(root)?;

    let snapshot = match store.read(name, Slot::Pending) {
        Ok(snapshot) => snapshot,
        Err(e) if e.is_not_found() => anyhow::bail!("no pending snapshot for '{name}'"),
        Err(e) => return Err(e.into()),
    };
    let baseline = match store.read(name, Slot::Baseline) {
        Ok(baseline) => Some(baseline.content),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.into()),
    };
    let diff = baseline
        .as_deref()
        .map(|old| histogram_diff(old, &snapshot.content));

    ShowResult {
        snapshot,
        baseline,
        diff,
    }
    .render(mode);
    Ok(())
}
