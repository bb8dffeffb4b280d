//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Simulation logic lives in systems, not components.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{SimTime, VehicleId};

/// Fleet slot a vehicle occupies. A replacement inherits the slot of the
/// vehicle it replaces, so each slot holds exactly one live identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot(pub usize);

/// Attributes fixed at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleIdentity {
    pub id: VehicleId,
    /// Plate in `AB-1234` form.
    pub plate: String,
    pub color: VehicleColor,
    pub direction: Direction,
    pub lane: Lane,
    /// Tick at which this vehicle entered the segment.
    pub spawned_tick: u64,
}

/// Current speed in km/h, kept within [MIN_SPEED, MAX_SPEED].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed(pub f64);

/// Recent speed samples, oldest first, bounded by the history window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeedHistory {
    pub samples: VecDeque<f64>,
}

/// Whether an alert has been raised for this vehicle. Only ever goes false -> true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertState {
    pub alerted: bool,
}

/// Time of the last movement update.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LastUpdated(pub SimTime);

// Position is defined in types.rs and also used as a component.
