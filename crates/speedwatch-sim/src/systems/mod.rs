//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! Per-tick bookkeeping that is not a component (overspeed counters, the alert
//! log) is owned by the engine and passed in explicitly.

pub mod alerts;
pub mod cleanup;
pub mod movement;
pub mod snapshot;
pub mod stats;
pub mod violation;
