//! Command implementations

mod accept_all;
mod list;
mod reject_all;
mod review;
mod show;

pub use accept_all::accept_all;
pub use list::list;
pub use reject_all::reject_all;
pub use review::review;
pub use show::show;

use std::path::Path;

use shutter::{Config, FileSnapshotStore};

/// Open the store for an explicit root, or the discovered project
fn open_store(root: Option<&Path>) -> anyhow::Result<FileSnapshotStore> {
    let config = match root {
        Some(root) => Config::at(root)?,
        None => Config::discover()?,
    };
    log::debug!("snapshot dir: {}", config.snapshot_dir().display());
    Ok(FileSnapshotStore::from_config(&config))
}
