//! Directory-backed snapshot store
//!
//! Layout, for a test named `TestLoginPage`:
//!
//! ```text
//! __snapshots__/
//! ├── test_login_page.snap        # baseline
//! └── test_login_page.snap.new    # pending
//! ```

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::format;
use crate::config::Config;
use crate::core::models::{Slot, Snapshot, normalize_identifier};
use crate::core::ports::SnapshotStore;
use crate::error::{Result, SnapshotError};

/// Snapshot store rooted at one directory
///
/// The directory is created on first use and never removed.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Store snapshots in `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store snapshots in the directory named by `config`
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.snapshot_dir())
    }

    /// The snapshot directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a test's slot
    pub fn path_for(&self, test_name: &str, slot: Slot) -> Result<PathBuf> {
        let id = identifier(test_name)?;
        Ok(self.dir.join(format!("{id}{}", slot.suffix())))
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    fn not_found(test_name: &str, slot: Slot) -> SnapshotError {
        SnapshotError::NotFound {
            id: normalize_identifier(test_name),
            slot,
        }
    }
}

fn identifier(test_name: &str) -> Result<String> {
    let id = normalize_identifier(test_name);
    if id.is_empty() {
        return Err(SnapshotError::EmptyIdentifier(test_name.to_string()));
    }
    Ok(id)
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, snapshot: &Snapshot, slot: Slot) -> Result<()> {
        let path = self.path_for(&snapshot.test_name, slot)?;
        if let Some(field) = format::unwritable_header(snapshot) {
            return Err(SnapshotError::HeaderLineBreak {
                id: normalize_identifier(&snapshot.test_name),
                field,
            });
        }
        self.ensure_dir()?;

        // Write beside the target, then rename over it, so a failure never
        // leaves a truncated slot behind.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(format::serialize(snapshot).as_bytes())?;

        // Temp files start out owner-only; snapshots are ordinary project files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = tmp.as_file().metadata()?.permissions();
            perms.set_mode(0o644);
            tmp.as_file().set_permissions(perms)?;
        }

        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        log::debug!("wrote {slot} snapshot {}", path.display());
        Ok(())
    }

    fn read(&self, test_name: &str, slot: Slot) -> Result<Snapshot> {
        let path = self.path_for(test_name, slot)?;

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Self::not_found(test_name, slot));
            },
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(SnapshotError::format(&path, "file is not valid UTF-8"));
            },
            Err(e) => return Err(e.into()),
        };

        format::deserialize(&raw).map_err(|e| SnapshotError::format(&path, e.to_string()))
    }

    fn list_pending(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let suffix = Slot::Pending.suffix();
        let mut pending = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(id) = name.strip_suffix(suffix)
                && !id.is_empty()
            {
                pending.push(id.to_string());
            }
        }

        pending.sort();
        Ok(pending)
    }

    fn accept(&self, test_name: &str) -> Result<()> {
        let pending = self.path_for(test_name, Slot::Pending)?;
        let baseline = self.path_for(test_name, Slot::Baseline)?;

        // Refuse to promote something that would not read back.
        self.read(test_name, Slot::Pending)?;

        // A single rename: either the baseline is replaced and the pending
        // file is gone, or nothing changed.
        fs::rename(&pending, &baseline).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Self::not_found(test_name, Slot::Pending)
            } else {
                e.into()
            }
        })?;

        log::info!("accepted snapshot {}", baseline.display());
        Ok(())
    }

    fn reject(&self, test_name: &str) -> Result<()> {
        let pending = self.path_for(test_name, Slot::Pending)?;

        fs::remove_file(&pending).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Self::not_found(test_name, Slot::Pending)
            } else {
                SnapshotError::from(e)
            }
        })?;

        log::info!("rejected snapshot {}", pending.display());
        Ok(())
    }
}
