//! Ledger service - wires normalization, directory lookup and the log
//!
//! One submission runs the whole flow synchronously: normalize the typed
//! number, look up the flat (falling back to the unknown sentinel),
//! stamp the local time and append to the gate's log.

use crate::domain::entry::{self, EntryDraft, LogEntry, UNKNOWN_FLAT};
use crate::domain::types::{Action, GateId, VehicleType};
use crate::infra::config::Config;
use crate::io::{Directory, GateLogStore};
use crate::services::normalizer::{normalize_flat, normalize_vehicle};
use crate::services::summary::{self, GateSummary};
use anyhow::bail;
use tracing::warn;

/// Outcome of one logged movement
#[derive(Debug, Clone)]
pub struct Submission {
    pub entry: LogEntry,
    pub line: String,
    /// False when the flat fell back to the unknown sentinel; surfaced
    /// to the guard as a warning
    pub flat_known: bool,
}

pub struct Ledger {
    directory: Directory,
    store: GateLogStore,
}

impl Ledger {
    pub fn new(directory: Directory, store: GateLogStore) -> Self {
        Self { directory, store }
    }

    /// Build a ledger from config. A missing directory table is fatal
    /// here; the process halts rather than running with an empty
    /// directory.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let directory = Directory::load(config.directory_file())?;
        let store = GateLogStore::new(config.log_dir());
        Ok(Self::new(directory, store))
    }

    /// Record one movement. The raw number is normalized here; an input
    /// that normalizes to empty is rejected.
    pub fn submit(
        &self,
        gate: GateId,
        actor: Option<&str>,
        vehicle_type: VehicleType,
        raw_number: &str,
        action: Action,
    ) -> anyhow::Result<Submission> {
        let vehicle_id = normalize_vehicle(raw_number);
        if vehicle_id.is_empty() {
            bail!("vehicle number is required");
        }

        let flat = self.directory.lookup(&vehicle_id);
        let flat_known = flat.is_some();
        if !flat_known {
            warn!(gate = %gate, vehicle = %vehicle_id, "vehicle_not_in_directory");
        }

        let draft = EntryDraft {
            gate,
            actor: actor.map(str::to_string),
            vehicle_type,
            vehicle_id,
            flat_id: flat.unwrap_or(UNKNOWN_FLAT).to_string(),
            action,
            timestamp: entry::local_time_string(),
        };

        let entry = self.store.append_entry(draft)?;
        let line = entry.format_line();
        Ok(Submission { entry, line, flat_known })
    }

    /// Normalize a raw number and look up its flat for display
    pub fn lookup_flat(&self, raw_number: &str) -> (String, Option<&str>) {
        let vehicle_id = normalize_vehicle(raw_number);
        let flat = self.directory.lookup(&vehicle_id);
        (vehicle_id, flat)
    }

    /// Reverse lookup: normalize a raw flat and find its vehicle
    pub fn lookup_vehicle(&self, raw_flat: &str) -> (String, Option<&str>) {
        let flat_id = normalize_flat(raw_flat);
        let vehicle = self.directory.lookup_vehicle(&flat_id);
        (flat_id, vehicle)
    }

    /// Tally a gate's log by vehicle type
    pub fn summarize(&self, gate: GateId) -> anyhow::Result<GateSummary> {
        let lines = self.store.read(gate)?;
        Ok(summary::summarize_lines(lines.iter().map(String::as_str)))
    }

    pub fn store(&self) -> &GateLogStore {
        &self.store
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }
}
