//! Cleanup system: removes vehicles that left the segment and refills their slots.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use speedwatch_core::components::Slot;
use speedwatch_core::types::SimTime;

use super::movement::Exit;
use crate::world_setup;

/// Despawn every exited vehicle, then generate one replacement per vacated
/// slot. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_vehicle_id: &mut u64,
    exits: &[Exit],
    despawn_buffer: &mut Vec<Entity>,
    time: SimTime,
) {
    if exits.is_empty() {
        return;
    }

    despawn_buffer.clear();
    despawn_buffer.extend(exits.iter().map(|e| e.entity));

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    for exit in exits {
        debug!(vehicle = %exit.vehicle_id, slot = exit.slot, tick = time.tick, "vehicle left segment");
    }

    world_setup::fill_slots(world, rng, next_vehicle_id, exits.iter().map(|e| e.slot), time);
}

/// Bring the fleet to `fleet_size` slots: drop vehicles in slots past the end,
/// generate vehicles for missing slots.
pub fn resize_fleet(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_vehicle_id: &mut u64,
    fleet_size: usize,
    despawn_buffer: &mut Vec<Entity>,
    time: SimTime,
) {
    despawn_buffer.clear();
    let mut occupied = vec![false; fleet_size];

    for (entity, slot) in world.query_mut::<&Slot>() {
        if slot.0 >= fleet_size {
            despawn_buffer.push(entity);
        } else {
            occupied[slot.0] = true;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    let missing: Vec<usize> = (0..fleet_size).filter(|&s| !occupied[s]).collect();
    world_setup::fill_slots(world, rng, next_vehicle_id, missing.into_iter(), time);
}
