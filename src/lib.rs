//! shutter - snapshot testing with histogram diffs and interactive review
//!
//! A test captures its output with [`Snapshotter`] (or [`assert_snapshot!`]).
//! The first capture, and any capture that differs from the accepted
//! baseline, is written as a pending snapshot. `shutter review` then shows a
//! line diff against the baseline and accepts or rejects each change.
//!
//! Volatile values are normalized before comparison by a
//! [`Transform`](crate::core::transform::Transform): scrubbers rewrite text and
//! ignore rules redact or drop JSON entries.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod paths;

pub use adapters::file::FileSnapshotStore;
pub use config::Config;
pub use crate::core::models::{DiffKind, DiffLine, Slot, Snapshot};
pub use crate::core::services::{CaptureOutcome, Snapshotter, histogram_diff};
pub use crate::core::transform::{IgnoreRule, Scrubber, Transform};
pub use error::{Result, SnapshotError};
