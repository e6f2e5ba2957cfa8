//! Snapshot model
//!
//! A snapshot is the unit of comparison: one test's captured output plus the
//! metadata needed to find and display it again.

use serde::{Deserialize, Serialize};

use super::identifier::normalize_identifier;

/// A captured test output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Producer identity / schema tag (the crate version that wrote it)
    pub version: String,

    /// Human-readable test name; its normalized form keys the store
    pub test_name: String,

    /// Optional display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Function that produced the snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub func_name: Option<String>,

    /// Source file that produced the snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Captured content, verbatim
    pub content: String,
}

impl Snapshot {
    /// Create a snapshot with no optional metadata
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        test_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            test_name: test_name.into(),
            title: None,
            func_name: None,
            file_name: None,
            content: content.into(),
        }
    }

    /// Set the display title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the producing function name
    #[must_use]
    pub fn with_func_name(mut self, func_name: impl Into<String>) -> Self {
        self.func_name = Some(func_name.into());
        self
    }

    /// Set the producing source file
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Identifier this snapshot is stored under
    #[must_use]
    pub fn identifier(&self) -> String {
        normalize_identifier(&self.test_name)
    }

    /// Title if set, else the test name
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.test_name)
    }
}
