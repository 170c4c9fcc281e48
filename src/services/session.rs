//! Entry wizard session - immutable snapshots, no ambient state
//!
//! The wizard is strictly linear: gate → action → vehicle type → number →
//! submit. Each step consumes a snapshot and returns a new one; submit
//! hands back the completed request together with a freshly reset
//! snapshot, so the caller never mutates shared session state.

use crate::domain::types::{Action, GateId, VehicleType};
use crate::services::normalizer::normalize_vehicle;
use tracing::debug;

/// Where the wizard currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    SelectGate,
    SelectAction,
    SelectVehicleType,
    EnterNumber,
    Ready,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::SelectGate => "select_gate",
            Step::SelectAction => "select_action",
            Step::SelectVehicleType => "select_vehicle_type",
            Step::EnterNumber => "enter_number",
            Step::Ready => "ready",
        }
    }
}

/// A completed wizard pass, ready for the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRequest {
    pub gate: GateId,
    pub action: Action,
    pub vehicle_type: VehicleType,
    pub vehicle_number: String,
}

/// One guard's wizard state. Cheap to clone; every transition returns a
/// new snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    gate: Option<GateId>,
    action: Option<Action>,
    vehicle_type: Option<VehicleType>,
    vehicle_number: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        if self.gate.is_none() {
            Step::SelectGate
        } else if self.action.is_none() {
            Step::SelectAction
        } else if self.vehicle_type.is_none() {
            Step::SelectVehicleType
        } else if self.vehicle_number.is_none() {
            Step::EnterNumber
        } else {
            Step::Ready
        }
    }

    pub fn with_gate(mut self, gate: GateId) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_vehicle_type(mut self, vehicle_type: VehicleType) -> Self {
        self.vehicle_type = Some(vehicle_type);
        self
    }

    /// Record the typed vehicle number, normalized on entry
    pub fn with_number(mut self, raw: &str) -> Self {
        self.vehicle_number = Some(normalize_vehicle(raw));
        self
    }

    /// Submit the wizard.
    ///
    /// When all four steps are set, returns the completed request and a
    /// reset snapshot. An incomplete session is returned unchanged with
    /// no request.
    pub fn submit(self) -> (Option<EntryRequest>, Session) {
        match (self.gate, self.action, self.vehicle_type, self.vehicle_number.clone()) {
            (Some(gate), Some(action), Some(vehicle_type), Some(vehicle_number)) => {
                let request = EntryRequest { gate, action, vehicle_type, vehicle_number };
                (Some(request), Session::new())
            }
            _ => {
                debug!(step = self.step().as_str(), "wizard_submit_incomplete");
                (None, self)
            }
        }
    }
}
