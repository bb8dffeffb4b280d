//! Simulation engine for Speedwatch.
//!
//! Owns the hecs ECS world, runs systems once per tick,
//! and produces FleetSnapshots for consumers.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::{EngineOptions, SimulationEngine};
pub use systems::violation::StreakState;
pub use speedwatch_core as core;
