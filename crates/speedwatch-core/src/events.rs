//! Alert records emitted by the simulation.

use serde::{Deserialize, Serialize};

use crate::types::{AlertId, SimTime, VehicleId};

/// A sustained-overspeed alert. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub vehicle_id: VehicleId,
    /// Plate as it read when the alert fired.
    pub plate: String,
    /// Speed (km/h) at emission.
    pub speed: f64,
    /// Human-readable dwell duration, e.g. "5+ minutes".
    pub duration: String,
    pub timestamp: SimTime,
    pub location: String,
}
