//! Core snapshot engine
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Snapshot, DiffLine, Slot)
//! - `transform/` - Scrubbers and ignore rules applied before capture
//! - `services/` - Diff, capture and review logic
//! - `ports/` - Trait definitions for storage

pub mod models;
pub mod ports;
pub mod services;
pub mod transform;
