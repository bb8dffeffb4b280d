//! State shared between the scheduler handle and the tick loop thread.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use speedwatch_core::commands::SimCommand;
use speedwatch_core::config::ConfigError;
use speedwatch_core::state::FleetSnapshot;

/// Commands sent from the scheduler handle to the tick loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A command to forward to the simulation engine.
    Sim(SimCommand),
    /// Shut down the tick loop thread at the next step boundary.
    Shutdown,
}

/// Latest published snapshot, written by the loop thread after every step.
/// `None` until the first step completes.
pub type SharedSnapshot = Arc<Mutex<Option<FleetSnapshot>>>;

/// Scheduler lifecycle and control errors.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler already running")]
    AlreadyRunning,

    #[error("scheduler not running")]
    NotRunning,

    #[error("engine was lost when the tick loop failed to start")]
    EngineUnavailable,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to spawn tick loop thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("tick loop thread has exited")]
    ChannelClosed,

    #[error("tick loop thread panicked")]
    LoopPanicked,
}
