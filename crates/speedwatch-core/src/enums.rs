//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Travel direction along the segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Travels toward increasing x (enters at 0).
    #[default]
    Forward,
    /// Travels toward decreasing x (enters at 100).
    Reverse,
}

/// Lane a vehicle is driving in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    #[default]
    Upper,
    Lower,
}

/// Body color tag from the fixed display palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleColor {
    #[default]
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    Pink,
    Gray,
    White,
    Black,
}

/// Whether the engine is advancing time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    /// Snapshots are still published but the fleet is frozen.
    Paused,
}

impl Direction {
    /// Sign applied to the per-tick displacement.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }

    /// Lateral coordinate at which a vehicle travelling this way enters.
    pub fn entry_x(self) -> f64 {
        match self {
            Direction::Forward => crate::constants::SEGMENT_START_X,
            Direction::Reverse => crate::constants::SEGMENT_END_X,
        }
    }

    /// True once `x` lies past the exit boundary for this direction.
    pub fn has_exited(self, x: f64) -> bool {
        match self {
            Direction::Forward => x > crate::constants::FORWARD_EXIT_X,
            Direction::Reverse => x < crate::constants::REVERSE_EXIT_X,
        }
    }
}

impl Lane {
    /// Lane center as a y coordinate (percent of segment height).
    pub fn y(self) -> f64 {
        match self {
            Lane::Upper => 25.0,
            Lane::Lower => 75.0,
        }
    }
}

impl VehicleColor {
    pub const PALETTE: [VehicleColor; 9] = [
        VehicleColor::Blue,
        VehicleColor::Red,
        VehicleColor::Green,
        VehicleColor::Yellow,
        VehicleColor::Purple,
        VehicleColor::Pink,
        VehicleColor::Gray,
        VehicleColor::White,
        VehicleColor::Black,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            VehicleColor::Blue => "#3B82F6",
            VehicleColor::Red => "#EF4444",
            VehicleColor::Green => "#10B981",
            VehicleColor::Yellow => "#F59E0B",
            VehicleColor::Purple => "#8B5CF6",
            VehicleColor::Pink => "#EC4899",
            VehicleColor::Gray => "#6B7280",
            VehicleColor::White => "#FFFFFF",
            VehicleColor::Black => "#000000",
        }
    }
}
