//! Vehicle generation and spawn factories.
//!
//! Generated vehicles get a random plate, color, direction, lane and initial
//! speed. Identities come from a monotonic serial owned by the engine, so they
//! never collide for the lifetime of a run.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use speedwatch_core::components::*;
use speedwatch_core::constants::*;
use speedwatch_core::enums::*;
use speedwatch_core::types::{Position, SimTime, VehicleId};

/// A freshly generated vehicle, not yet placed in a slot.
#[derive(Debug, Clone)]
pub struct GeneratedVehicle {
    pub identity: VehicleIdentity,
    pub position: Position,
    pub speed: Speed,
}

/// Generate `count` vehicles in order, drawing identities from `next_vehicle_id`.
pub fn generate(
    rng: &mut ChaCha8Rng,
    next_vehicle_id: &mut u64,
    count: usize,
    tick: u64,
) -> Vec<GeneratedVehicle> {
    (0..count)
        .map(|_| generate_one(rng, next_vehicle_id, tick))
        .collect()
}

fn generate_one(rng: &mut ChaCha8Rng, next_vehicle_id: &mut u64, tick: u64) -> GeneratedVehicle {
    let id = VehicleId(*next_vehicle_id);
    *next_vehicle_id += 1;

    let direction = if rng.gen_bool(0.5) {
        Direction::Forward
    } else {
        Direction::Reverse
    };
    let lane = if rng.gen_bool(0.5) {
        Lane::Upper
    } else {
        Lane::Lower
    };
    let color = VehicleColor::PALETTE[rng.gen_range(0..VehicleColor::PALETTE.len())];
    let speed = rng.gen_range(SPAWN_SPEED_MIN..=SPAWN_SPEED_MAX) as f64;

    GeneratedVehicle {
        identity: VehicleIdentity {
            id,
            plate: generate_plate(rng),
            color,
            direction,
            lane,
            spawned_tick: tick,
        },
        position: Position::new(direction.entry_x(), lane.y()),
        speed: Speed(speed),
    }
}

/// Two letters, a dash, four digits: `KX-4821`.
pub fn generate_plate(rng: &mut ChaCha8Rng) -> String {
    let first = PLATE_LETTERS[rng.gen_range(0..PLATE_LETTERS.len())] as char;
    let second = PLATE_LETTERS[rng.gen_range(0..PLATE_LETTERS.len())] as char;
    let number: u32 = rng.gen_range(1000..=9999);
    format!("{first}{second}-{number}")
}

/// Spawn a generated vehicle into `slot` with an empty history.
pub fn spawn_vehicle(
    world: &mut World,
    vehicle: GeneratedVehicle,
    slot: usize,
    time: SimTime,
) -> hecs::Entity {
    world.spawn((
        Slot(slot),
        vehicle.identity,
        vehicle.position,
        vehicle.speed,
        SpeedHistory::default(),
        AlertState::default(),
        LastUpdated(time),
    ))
}

/// Fill slots `0..fleet_size` with new vehicles.
pub fn populate_fleet(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_vehicle_id: &mut u64,
    fleet_size: usize,
    time: SimTime,
) {
    fill_slots(world, rng, next_vehicle_id, 0..fleet_size, time);
}

/// Generate one vehicle per slot, in slot order.
pub fn fill_slots(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_vehicle_id: &mut u64,
    slots: impl ExactSizeIterator<Item = usize>,
    time: SimTime,
) {
    let vehicles = generate(rng, next_vehicle_id, slots.len(), time.tick);
    for (slot, vehicle) in slots.zip(vehicles) {
        spawn_vehicle(world, vehicle, slot, time);
    }
}
