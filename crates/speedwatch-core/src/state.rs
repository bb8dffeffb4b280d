//! Fleet snapshot: the complete visible state published after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::Alert;
use crate::types::{Position, SimTime, VehicleId};

/// Complete state handed to consumers after each tick.
/// Owned data: consumers never see engine internals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    /// Limit the `speeding` flags and stats were computed against.
    pub speed_limit: f64,
    /// Vehicles ordered by slot.
    pub vehicles: Vec<VehicleView>,
    /// Alerts emitted during this tick, most recent first.
    pub new_alerts: Vec<Alert>,
    pub stats: StatsView,
}

/// A vehicle as seen by the monitor table and the road view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleView {
    pub id: VehicleId,
    pub slot: usize,
    pub position: Position,
    pub direction: Direction,
    pub lane: Lane,
    /// Speed (km/h).
    pub speed: f64,
    pub color: VehicleColor,
    pub plate: String,
    pub alerted: bool,
    /// Above the active limit on this tick.
    pub speeding: bool,
    /// Oldest sample first.
    pub speed_history: Vec<f64>,
    pub last_updated: SimTime,
}

/// Fleet-wide aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsView {
    pub total_vehicles: u32,
    pub current_violations: u32,
    /// Rounded mean speed (km/h); 0 for an empty fleet.
    pub average_speed: u32,
    /// Fastest current speed (km/h); 0 for an empty fleet.
    pub max_speed: f64,
    /// Alerts emitted since the engine was created.
    pub alerts_generated: u64,
}

impl FleetSnapshot {
    /// Vehicles ordered fastest first, as the speed monitor lists them.
    pub fn ranked_by_speed(&self) -> Vec<&VehicleView> {
        let mut ranked: Vec<&VehicleView> = self.vehicles.iter().collect();
        ranked.sort_by(|a, b| b.speed.total_cmp(&a.speed));
        ranked
    }

    /// Look up a vehicle by identity.
    pub fn vehicle(&self, id: VehicleId) -> Option<&VehicleView> {
        self.vehicles.iter().find(|v| v.id == id)
    }
}
