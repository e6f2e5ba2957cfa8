//! Reject-all command - discard every pending snapshot

use std::path::Path;

use shutter::core::services;
use shutter::output::{BatchResult, OutputMode};

/// Reject every pending snapshot, leaving baselines untouched
pub fn reject_all(root: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let store = super::open_store(root)?;
    let count = services::reject_all(&store)?;

    BatchResult {
        action: "rejected",
        count,
    }
    .render(mode);
    Ok(())
}
