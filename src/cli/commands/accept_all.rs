//! Accept-all command - promote every pending snapshot

use std::path::Path;

use shutter::core::services;
use shutter::output::{BatchResult, OutputMode};

/// Accept every pending snapshot
pub fn accept_all(root: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let store = super::open_store(root)?;
    let count = services::accept_all(&store)?;

    BatchResult {
        action: "accepted",
        count,
    }
    .render(mode);
    Ok(())
}
