//! Centralized path definitions for shutter
//!
//! ## Storage Layout
//!
//! ```text
//! project/                  # first ancestor holding the marker (Cargo.toml)
//! ├── Cargo.toml
//! ├── .shutter.toml         # optional project config
//! └── __snapshots__/        # snapshot directory (configurable)
//!     ├── test_login.snap
//!     └── test_login.snap.new
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Result, SnapshotError};

// =============================================================================
// Project-level paths
// =============================================================================

/// Default snapshot directory name, relative to the project root
pub const SNAPSHOT_DIR: &str = "__snapshots__";

/// Project configuration filename
pub const CONFIG_FILE: &str = ".shutter.toml";

/// File whose presence marks a project root
pub const PROJECT_MARKER: &str = "Cargo.toml";

/// Environment variable cargo sets to the package directory
const MANIFEST_DIR_ENV: &str = "CARGO_MANIFEST_DIR";

/// Directory the project-root search starts from.
///
/// Under `cargo test` / `cargo run` this is the package directory, so tests
/// find the same store regardless of the working directory they run in.
/// Otherwise the current working directory.
pub fn search_start() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(MANIFEST_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    Ok(std::env::current_dir()?)
}

/// Walk up from `start` to the first directory containing `marker`.
pub fn find_project_root(start: &Path, marker: &str) -> Result<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| SnapshotError::ProjectRootNotFound {
            start: start.to_path_buf(),
            marker: marker.to_string(),
        })
}

/// Get path to `.shutter.toml` under `root`.
#[must_use]
pub fn config_file(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
