//! Project configuration
//!
//! Settings live in an optional `.shutter.toml` at the project root:
//!
//! ```toml
//! # Where snapshots are stored, relative to the project root
//! snapshot_dir = "tests/__snapshots__"
//! # Version tag written into new snapshots
//! version = "2"
//! ```
//!
//! Configuration is resolved once and passed to the store explicitly; nothing
//! here is global.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnapshotError};
use crate::paths;

/// Contents of `.shutter.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Snapshot directory, relative to the project root
    pub snapshot_dir: String,
    /// Version tag written into snapshots (defaults to the crate version)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: paths::SNAPSHOT_DIR.to_string(),
            version: None,
        }
    }
}

/// Resolved configuration for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    project_root: PathBuf,
    snapshot_dir: PathBuf,
    version: String,
}

impl Config {
    /// Configuration for an explicit project root
    ///
    /// Reads `.shutter.toml` under `root` when present.
    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let file = load_file_config(&paths::config_file(&root))?;

        Ok(Self {
            snapshot_dir: root.join(&file.snapshot_dir),
            version: file.version.unwrap_or_else(|| crate::VERSION.to_string()),
            project_root: root,
        })
    }

    /// Locate the project root from [`paths::search_start`] and load its config
    pub fn discover() -> Result<Self> {
        Self::discover_from(&paths::search_start()?)
    }

    /// Locate the project root walking up from `start` and load its config
    pub fn discover_from(start: &Path) -> Result<Self> {
        let root = paths::find_project_root(start, paths::PROJECT_MARKER)?;
        log::debug!("project root: {}", root.display());
        Self::at(root)
    }

    /// Project root directory
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Absolute snapshot directory
    #[must_use]
    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    /// Version tag for new snapshots
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| SnapshotError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
