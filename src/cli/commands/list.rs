//! List command

use std::path::Path;

use shutter::core::ports::SnapshotStore;
use shutter::output::{OutputMode, PendingListResult};

/// List pending snapshot identifiers
pub fn list(root: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let store = super::open_store(root)?;
    PendingListResult {
        pending: store.list_pending()?,
    }
    .render(mode);
    Ok(())
}
