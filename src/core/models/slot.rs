//! Storage slots
//!
//! Each test owns at most one file per slot.

use serde::{Deserialize, Serialize};

/// Where a snapshot is stored for a given test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Captured output awaiting review
    Pending,
    /// The accepted, trusted output
    Baseline,
}

impl Slot {
    /// File suffix used for this slot
    ///
    /// The pending suffix extends the baseline one so a pending file sorts
    /// right after its baseline in a directory listing.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Pending => ".snap.new",
            Self::Baseline => ".snap",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Baseline => write!(f, "baseline"),
        }
    }
}

impl std::str::FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" | "new" => Ok(Self::Pending),
            "baseline" | "accepted" | "snap" => Ok(Self::Baseline),
            _ => Err(format!("Invalid slot: {s}. Use: pending, baseline")),
        }
    }
}
