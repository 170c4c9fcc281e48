//! Services - business logic and state management
//!
//! This module contains the core business logic services:
//! - `ledger` - Orchestrates normalize → lookup → append for one movement
//! - `normalizer` - Canonicalization of vehicle and flat identifiers
//! - `summary` - Per-gate IN/OUT tallies by vehicle type
//! - `session` - Entry wizard state as immutable snapshots
//! - `auth` - Login verification and the active-user roster
//! - `voice` - Transcript parsing into loggable commands

pub mod auth;
pub mod ledger;
pub mod normalizer;
pub mod session;
pub mod summary;
pub mod voice;

// Re-export commonly used types
pub use auth::{Authenticator, ConfigAuthenticator, LoginRoster};
pub use ledger::{Ledger, Submission};
pub use session::{EntryRequest, Session, Step};
pub use summary::{GateSummary, TypeTally};
pub use voice::VoiceCommand;
