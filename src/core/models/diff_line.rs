//! Diff result lines

use serde::{Deserialize, Serialize};

/// Classification of a line in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present on both sides
    Shared,
    /// Only in the old content
    Removed,
    /// Only in the new content
    Added,
}

impl std::fmt::Display for DiffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shared => write!(f, "shared"),
            Self::Removed => write!(f, "removed"),
            Self::Added => write!(f, "added"),
        }
    }
}

/// One line of a comparison result
///
/// Line numbers are 1-based. `old_line` is set for shared and removed lines,
/// `new_line` for shared and added lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// How the line differs
    pub kind: DiffKind,
    /// Line text without its trailing newline
    pub text: String,
    /// Position in the old content
    pub old_line: Option<usize>,
    /// Position in the new content
    pub new_line: Option<usize>,
}

impl DiffLine {
    /// A line present on both sides
    #[must_use]
    pub fn shared(text: impl Into<String>, old_line: usize, new_line: usize) -> Self {
        Self {
            kind: DiffKind::Shared,
            text: text.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// A line only in the old content
    #[must_use]
    pub fn removed(text: impl Into<String>, old_line: usize) -> Self {
        Self {
            kind: DiffKind::Removed,
            text: text.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// A line only in the new content
    #[must_use]
    pub fn added(text: impl Into<String>, new_line: usize) -> Self {
        Self {
            kind: DiffKind::Added,
            text: text.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Whether the line is unchanged
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.kind == DiffKind::Shared
    }
}
