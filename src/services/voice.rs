//! Voice command parsing over a speech-to-text transcript
//!
//! The transcription itself happens upstream; this module only turns the
//! transcript text into a loggable command. A command needs all three of
//! a vehicle type keyword, an action keyword, and a plate-shaped token.

use crate::domain::types::{Action, VehicleType};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Indian plate shape: state code, district digits, optional series
/// letters, running number
const PLATE_PATTERN: &str = r"[A-Z]{2}[0-9]{1,2}[A-Z]{0,2}[0-9]{1,4}";

static PLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLATE_PATTERN).expect("plate pattern is valid"));

/// A fully parsed voice command. The vehicle number is the raw matched
/// token; the ledger normalizes it like any typed input.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceCommand {
    pub vehicle_type: VehicleType,
    pub action: Action,
    pub vehicle_number: String,
}

/// Parse a transcript into a command, or `None` when any of the three
/// parts is missing.
pub fn parse_transcript(transcript: &str) -> Option<VoiceCommand> {
    let text = transcript.to_uppercase();

    // OUT is checked first so it is not shadowed by its IN substring
    let action = if text.contains("OUT") {
        Action::Out
    } else if text.contains("IN") {
        Action::In
    } else {
        debug!(transcript = %transcript, "voice_missing_action");
        return None;
    };

    let mut vehicle_type = None;
    for candidate in VehicleType::ALL {
        if text.contains(&candidate.as_str().to_uppercase()) {
            vehicle_type = Some(candidate);
        }
    }
    let Some(vehicle_type) = vehicle_type else {
        debug!(transcript = %transcript, "voice_missing_vehicle_type");
        return None;
    };

    let Some(plate) = PLATE_RE.find(&text) else {
        debug!(transcript = %transcript, "voice_missing_plate");
        return None;
    };

    Some(VoiceCommand {
        vehicle_type,
        action,
        vehicle_number: plate.as_str().to_string(),
    })
}
