//! Shared types for the gate ledger

use serde::{Deserialize, Serialize};

/// Newtype wrapper for gate identifiers to provide type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct GateId(pub u8);

impl std::fmt::Display for GateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map(GateId)
            .map_err(|_| format!("invalid gate id: {s}"))
    }
}

/// Vehicle classification used in log entries and summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Car,
    Bike,
    Scooty,
    Taxi,
    Ev,
}

impl VehicleType {
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Car,
        VehicleType::Bike,
        VehicleType::Scooty,
        VehicleType::Taxi,
        VehicleType::Ev,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "Car",
            VehicleType::Bike => "Bike",
            VehicleType::Scooty => "Scooty",
            VehicleType::Taxi => "Taxi",
            VehicleType::Ev => "EV",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAR" => Ok(VehicleType::Car),
            "BIKE" => Ok(VehicleType::Bike),
            "SCOOTY" => Ok(VehicleType::Scooty),
            "TAXI" => Ok(VehicleType::Taxi),
            "EV" => Ok(VehicleType::Ev),
            other => Err(format!("unknown vehicle type: {other}")),
        }
    }
}

/// Movement direction at a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    In,
    Out,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::In => "IN",
            Action::Out => "OUT",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN" => Ok(Action::In),
            "OUT" => Ok(Action::Out),
            other => Err(format!("unknown action: {other}")),
        }
    }
}

/// User role for login and clear authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guard,
    Supervisor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guard => "guard",
            Role::Supervisor => "supervisor",
        }
    }
}
