//! Domain models - core business types and the log entry model
//!
//! This module contains the canonical data types used throughout the system:
//! - `LogEntry` - one recorded vehicle movement at a gate
//! - `GateId` - identifies a physical gate
//! - `VehicleType` / `Action` - classification of movements
//! - the stable log line format shared by the writer and the summary reducer

pub mod entry;
pub mod types;
