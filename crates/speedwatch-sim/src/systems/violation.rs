//! Sustained-overspeed tracking.
//!
//! Each vehicle walks a small state machine:
//! clean -> accumulating(1) -> ... -> accumulating(threshold) -> alerted.
//! Any tick at or below the limit drops an accumulating vehicle straight back
//! to clean. `alerted` is terminal for the identity; only a replacement
//! vehicle can raise another alert for the same slot.

use std::collections::{HashMap, HashSet};

use hecs::World;

use speedwatch_core::components::{AlertState, Speed, VehicleIdentity};
use speedwatch_core::types::VehicleId;

/// Consecutive-overspeed tick counts keyed by vehicle. Absent means zero.
#[derive(Debug, Clone, Default)]
pub struct OverspeedCounters {
    counts: HashMap<VehicleId, u32>,
}

/// Where a vehicle stands in the violation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakState {
    Clean,
    Accumulating(u32),
    Alerted,
}

/// A vehicle that just completed a full overspeed streak.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolationEvent {
    pub vehicle_id: VehicleId,
    pub plate: String,
    pub speed: f64,
}

impl OverspeedCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current streak for a vehicle (0 when absent).
    pub fn get(&self, id: VehicleId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Record one tick. Overspeed extends the streak; anything else removes it.
    /// Returns the streak after this tick.
    pub fn observe(&mut self, id: VehicleId, overspeed: bool) -> u32 {
        if overspeed {
            let count = self.counts.entry(id).or_insert(0);
            *count += 1;
            *count
        } else {
            self.counts.remove(&id);
            0
        }
    }

    /// Drop counters for vehicles no longer on the segment.
    pub fn retain_live(&mut self, live: &HashSet<VehicleId>) {
        self.counts.retain(|id, _| live.contains(id));
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Classify a vehicle from its streak and alerted flag.
pub(crate) fn streak_state(count: u32, alerted: bool) -> StreakState {
    if alerted {
        StreakState::Alerted
    } else if count == 0 {
        StreakState::Clean
    } else {
        StreakState::Accumulating(count)
    }
}

/// Evaluate every live vehicle against the active limit. Vehicles whose
/// streak reaches `threshold` for the first time are flagged alerted and
/// returned ordered by vehicle id.
pub fn run(
    world: &mut World,
    counters: &mut OverspeedCounters,
    speed_limit: f64,
    threshold: u32,
) -> Vec<ViolationEvent> {
    let mut events = Vec::new();
    let mut live = HashSet::new();

    for (_entity, (identity, speed, alert_state)) in
        world.query_mut::<(&VehicleIdentity, &Speed, &mut AlertState)>()
    {
        live.insert(identity.id);
        let streak = counters.observe(identity.id, speed.0 > speed_limit);

        if streak >= threshold && !alert_state.alerted {
            alert_state.alerted = true;
            events.push(ViolationEvent {
                vehicle_id: identity.id,
                plate: identity.plate.clone(),
                speed: speed.0,
            });
        }
    }

    counters.retain_live(&live);
    events.sort_by_key(|e| e.vehicle_id);
    events
}
