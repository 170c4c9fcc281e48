//! Log entry model and the stable line format
//!
//! Each entry is persisted as one delimited text line with tagged fields.
//! The format is shared by the writer and the summary reducer: both sides
//! split on '|' and address fields by position, so it must stay stable.

use crate::domain::types::{Action, GateId, VehicleType};
use chrono::Local;

/// Marker carried by every entry line; sequence numbers are derived by
/// counting lines containing it.
pub const ENTRY_MARKER: &str = "Entry No.";

/// Flat shown when the vehicle is not in the directory
pub const UNKNOWN_FLAT: &str = "Unknown Flat";

/// Field delimiter in the persisted line format
pub const FIELD_DELIMITER: char = '|';

/// Minimum field count for a line to be considered well-formed
const MIN_FIELDS: usize = 7;

/// Current local wall-clock time in the entry timestamp format
pub fn local_time_string() -> String {
    Local::now().format("%I:%M:%S %p").to_string()
}

/// An entry awaiting its sequence number
///
/// Drafts are built by the ledger; the log store assigns the sequence
/// number at append time so numbering and writing happen together.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub gate: GateId,
    pub actor: Option<String>,
    pub vehicle_type: VehicleType,
    pub vehicle_id: String,
    pub flat_id: String,
    pub action: Action,
    pub timestamp: String,
}

impl EntryDraft {
    pub fn into_entry(self, sequence_no: u64) -> LogEntry {
        LogEntry {
            sequence_no,
            gate: self.gate,
            actor: self.actor,
            vehicle_type: self.vehicle_type,
            vehicle_id: self.vehicle_id,
            flat_id: self.flat_id,
            action: self.action,
            timestamp: self.timestamp,
        }
    }
}

/// One recorded vehicle movement at a gate. Never mutated after append;
/// only whole-log clear exists.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub sequence_no: u64,
    pub gate: GateId,
    pub actor: Option<String>,
    pub vehicle_type: VehicleType,
    pub vehicle_id: String,
    pub flat_id: String,
    pub action: Action,
    pub timestamp: String,
}

impl LogEntry {
    /// Format as one persisted line (no trailing newline).
    pub fn format_line(&self) -> String {
        format!(
            "{}{} | Gate {} | User: {} | Vehicle: {} | Number: {} | Flat: {} | Action: {} | Time: {}",
            ENTRY_MARKER,
            self.sequence_no,
            self.gate,
            self.actor.as_deref().unwrap_or("-"),
            self.vehicle_type,
            self.vehicle_id,
            self.flat_id,
            self.action,
            self.timestamp,
        )
    }
}

/// Fields recovered from a persisted line by the positional split rule
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFields {
    pub gate: Option<GateId>,
    pub vehicle_type: String,
    pub vehicle_id: Option<String>,
    pub action: String,
}

/// Split a persisted line into its tagged fields.
///
/// Returns `None` for malformed lines (fewer than 7 fields, or a missing
/// tag where one is required); callers treat those as skippable, not as
/// errors.
pub fn parse_line(line: &str) -> Option<ParsedFields> {
    let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if parts.len() < MIN_FIELDS {
        return None;
    }

    let gate = parts[1].trim().strip_prefix("Gate ").and_then(|g| g.trim().parse().ok());
    let vehicle_type = tag_value(parts[3])?.to_string();
    let vehicle_id = parts.get(4).and_then(|f| tag_value(f)).map(str::to_string);
    let action = tag_value(parts[6])?.to_string();

    Some(ParsedFields { gate, vehicle_type, vehicle_id, action })
}

/// Text after the first ':' in a tagged field, trimmed
fn tag_value(field: &str) -> Option<&str> {
    field.splitn(2, ':').nth(1).map(str::trim)
}
