//! Review command - accept or reject pending snapshots one by one

use std::io;
use std::path::Path;

use shutter::core::services;
use shutter::output::{OutputMode, ReviewResult};

/// Review pending snapshots from stdin
///
/// In JSON mode the session itself goes to stderr so stdout carries only the
/// summary.
pub fn review(root: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let store = super::open_store(root)?;
    let input = io::stdin().lock();

    let summary = match mode {
        OutputMode::Human => services::review(&store, input, io::stdout().lock())?,
        OutputMode::Json => services::review(&store, input, io::stderr().lock())?,
    };

    ReviewResult { summary }.render(mode);
    Ok(())
}
