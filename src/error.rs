//! Error types for snapshot capture, storage and transforms
//!
//! Every fallible library operation returns [`SnapshotError`]. The store
//! surfaces errors to its caller as-is: nothing in the crate retries.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::models::Slot;

/// Convenience alias used throughout the library
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Errors produced by the snapshot engine
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The requested slot has no file (no baseline yet, or nothing pending)
    #[error("no {slot} snapshot for '{id}'")]
    NotFound {
        /// Normalized test identifier
        id: String,
        /// Slot that was looked up
        slot: Slot,
    },

    /// The test name normalizes to an empty identifier
    #[error("test name '{0}' has no letters or digits to build an identifier from")]
    EmptyIdentifier(String),

    /// A header value has a line break, so the file would not read back
    #[error("{field} of snapshot '{id}' contains a line break")]
    HeaderLineBreak {
        /// Normalized test identifier
        id: String,
        /// Header key holding the line break
        field: &'static str,
    },

    /// A snapshot file exists but does not parse
    #[error("malformed snapshot file {}: {reason}", path.display())]
    Format {
        /// File that failed to parse
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Structured-mode content is not well-formed JSON
    #[error("content is not valid JSON: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// A regex-based rule was given a pattern that does not compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// No project marker file was found walking up from the start directory
    #[error("no {marker} found in {} or any parent directory", start.display())]
    ProjectRootNotFound {
        /// Directory the search started from
        start: PathBuf,
        /// Marker file name that was searched for
        marker: String,
    },

    /// The project configuration file could not be parsed
    #[error("invalid config {}: {reason}", path.display())]
    Config {
        /// Config file path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SnapshotError {
    /// Whether this is the recoverable "slot absent" case
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
