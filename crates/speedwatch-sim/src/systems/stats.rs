//! Fleet-wide statistics, recomputed after every tick.

use hecs::World;

use speedwatch_core::components::Speed;
use speedwatch_core::state::StatsView;

/// Aggregate the current fleet. `alerts_generated` is the engine's running total.
pub fn compute(world: &World, speed_limit: f64, alerts_generated: u64) -> StatsView {
    let speeds: Vec<f64> = world
        .query::<&Speed>()
        .iter()
        .map(|(_, speed)| speed.0)
        .collect();

    StatsView {
        total_vehicles: speeds.len() as u32,
        current_violations: speeds.iter().filter(|&&s| s > speed_limit).count() as u32,
        average_speed: average_speed(&speeds),
        max_speed: speeds.iter().copied().fold(0.0, f64::max),
        alerts_generated,
    }
}

/// Arithmetic mean rounded to the nearest integer; 0 for no samples.
pub fn average_speed(speeds: &[f64]) -> u32 {
    if speeds.is_empty() {
        return 0;
    }
    let total: f64 = speeds.iter().sum();
    (total / speeds.len() as f64).round() as u32
}
