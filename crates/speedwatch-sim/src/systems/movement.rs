//! Position and speed update system.
//!
//! Each tick every vehicle advances by `speed / 50` segment units in its
//! direction of travel, then its speed drifts by a uniform jitter and is
//! clamped. The new speed is appended to the bounded history.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use speedwatch_core::components::*;
use speedwatch_core::config::SimConfig;
use speedwatch_core::constants::{MAX_SPEED, MIN_SPEED, SPEED_TO_MOVEMENT_DIVISOR};
use speedwatch_core::types::{Position, SimTime, VehicleId};

/// A vehicle that crossed its exit boundary this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    pub entity: Entity,
    pub slot: usize,
    pub vehicle_id: VehicleId,
}

/// Move every vehicle and update its speed. Returns the vehicles that exited,
/// ordered by slot.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
    time: SimTime,
) -> Vec<Exit> {
    let mut exits = Vec::new();

    for (entity, (slot, identity, pos, speed, history, updated)) in world.query_mut::<(
        &Slot,
        &VehicleIdentity,
        &mut Position,
        &mut Speed,
        &mut SpeedHistory,
        &mut LastUpdated,
    )>() {
        let speed_factor = speed.0 / SPEED_TO_MOVEMENT_DIVISOR;
        pos.x += identity.direction.sign() * speed_factor;
        if identity.direction.has_exited(pos.x) {
            exits.push(Exit {
                entity,
                slot: slot.0,
                vehicle_id: identity.id,
            });
        }

        speed.0 = next_speed(speed.0, jitter(rng, config.speed_jitter));

        history.samples.push_back(speed.0);
        while history.samples.len() > config.history_window {
            history.samples.pop_front();
        }

        updated.0 = time;
    }

    exits.sort_by_key(|e| e.slot);
    exits
}

/// Draw a uniform jitter in [-half_width, half_width]. No draw when disabled.
fn jitter(rng: &mut ChaCha8Rng, half_width: f64) -> f64 {
    if half_width > 0.0 {
        rng.gen_range(-half_width..=half_width)
    } else {
        0.0
    }
}

/// Apply jitter and clamp into the legal speed range.
pub fn next_speed(current: f64, jitter: f64) -> f64 {
    (current + jitter).clamp(MIN_SPEED, MAX_SPEED)
}
