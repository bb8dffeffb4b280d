//! Commands sent from collaborators to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;

/// All possible control actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Replace the active configuration. Already validated by the sender.
    Configure { config: SimConfig },
    /// Freeze the fleet; snapshots keep flowing.
    Pause,
    /// Resume advancing the fleet.
    Resume,
}
