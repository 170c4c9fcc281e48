//! IO modules - file-backed storage interfaces
//!
//! This module contains the persistence layer:
//! - `directory` - vehicle → flat lookup table loaded from a CSV file
//! - `gate_log` - per-gate append-only text logs

pub mod directory;
pub mod gate_log;

// Re-export commonly used types
pub use directory::Directory;
pub use gate_log::GateLogStore;
