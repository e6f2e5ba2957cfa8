//! Business logic services
//!
//! - [`histogram`] - Line diff between two texts
//! - [`capture`] - Record content against the baseline
//! - [`review`] - Accept or reject pending snapshots
//!
//! Services reach storage only through the
//! [`SnapshotStore`](crate::core::ports::SnapshotStore) port.

pub mod capture;
pub mod histogram;
pub mod review;

pub use capture::{Capture, CaptureOutcome, Snapshotter};
pub use histogram::{histogram_diff, split_lines};
pub use review::{ReviewChoice, ReviewSummary, Reviewer, accept_all, reject_all, review};
