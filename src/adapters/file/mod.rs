//! File-based snapshot storage
//!
//! Implements `SnapshotStore` with one text file per test per slot inside a
//! single snapshot directory.

pub mod format;
mod store;

pub use format::{ParseError, deserialize, serialize, unwritable_header};
pub use store::FileSnapshotStore;
