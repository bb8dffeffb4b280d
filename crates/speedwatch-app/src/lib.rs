//! Speedwatch runtime.
//!
//! Wraps the headless simulation engine in a fixed-period tick scheduler
//! and exposes it to the command-line runner.

pub mod scheduler;
pub mod state;

pub use scheduler::TickScheduler;
pub use speedwatch_core as core;
