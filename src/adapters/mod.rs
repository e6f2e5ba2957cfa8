//! Adapter implementations for port traits
//!
//! - `file/` - Directory-backed snapshot store and the `.snap` text format

pub mod file;
