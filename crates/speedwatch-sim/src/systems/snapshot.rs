//! Snapshot system: queries the ECS world and builds a complete FleetSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use speedwatch_core::components::*;
use speedwatch_core::enums::SimPhase;
use speedwatch_core::events::Alert;
use speedwatch_core::state::*;
use speedwatch_core::types::{Position, SimTime};

/// Build a complete FleetSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: SimPhase,
    speed_limit: f64,
    new_alerts: Vec<Alert>,
    stats: StatsView,
) -> FleetSnapshot {
    FleetSnapshot {
        time: *time,
        phase,
        speed_limit,
        vehicles: build_vehicles(world, speed_limit),
        new_alerts,
        stats,
    }
}

/// Build VehicleView list from every vehicle, ordered by slot.
fn build_vehicles(world: &World, speed_limit: f64) -> Vec<VehicleView> {
    let mut vehicles: Vec<VehicleView> = world
        .query::<(
            &Slot,
            &VehicleIdentity,
            &Position,
            &Speed,
            &SpeedHistory,
            &AlertState,
            &LastUpdated,
        )>()
        .iter()
        .map(
            |(_, (slot, identity, pos, speed, history, alert_state, updated))| VehicleView {
                id: identity.id,
                slot: slot.0,
                position: *pos,
                direction: identity.direction,
                lane: identity.lane,
                speed: speed.0,
                color: identity.color,
                plate: identity.plate.clone(),
                alerted: alert_state.alerted,
                speeding: speed.0 > speed_limit,
                speed_history: history.samples.iter().copied().collect(),
                last_updated: updated.0,
            },
        )
        .collect();

    vehicles.sort_by_key(|v| v.slot);
    vehicles
}
