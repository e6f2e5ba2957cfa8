//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundary between the core services and the
//! filesystem. Implementations live in the `adapters` module; tests use an
//! in-memory implementation.

mod snapshot_store;

pub use snapshot_store::SnapshotStore;
