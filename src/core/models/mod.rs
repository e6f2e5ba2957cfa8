//! Domain models for shutter
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Snapshot`] - a captured test output plus its metadata
//! - [`DiffLine`] - one classified line of a comparison
//! - [`Slot`] - which file of a test a snapshot lives in (pending or baseline)
//! - [`normalize_identifier`] - test name to filesystem-safe identifier

mod diff_line;
mod identifier;
mod slot;
mod snapshot;

pub use diff_line::{DiffKind, DiffLine};
pub use identifier::normalize_identifier;
pub use slot::Slot;
pub use snapshot::Snapshot;
