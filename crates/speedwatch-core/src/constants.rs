//! Simulation constants and tuning parameters.

// --- Scheduling ---

/// Default wall-clock interval between ticks (milliseconds).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Default simulated seconds represented by one tick.
/// The simulation clock runs compressed: one 100ms tick stands for one second.
pub const DEFAULT_SIM_TICK_SECS: f64 = 1.0;

// --- Fleet ---

/// Default number of vehicles on the segment.
pub const DEFAULT_FLEET_SIZE: usize = 6;

/// Lateral coordinate where forward vehicles enter (percent of segment).
pub const SEGMENT_START_X: f64 = 0.0;

/// Lateral coordinate where reverse vehicles enter (percent of segment).
pub const SEGMENT_END_X: f64 = 100.0;

/// Forward vehicles exit once past this coordinate.
pub const FORWARD_EXIT_X: f64 = 110.0;

/// Reverse vehicles exit once below this coordinate.
pub const REVERSE_EXIT_X: f64 = -10.0;

/// Divisor converting km/h into segment units per tick.
pub const SPEED_TO_MOVEMENT_DIVISOR: f64 = 50.0;

// --- Speeds (km/h) ---

/// Lower clamp for every vehicle speed.
pub const MIN_SPEED: f64 = 30.0;

/// Upper clamp for every vehicle speed.
pub const MAX_SPEED: f64 = 130.0;

/// Lowest initial speed of a generated vehicle.
pub const SPAWN_SPEED_MIN: u32 = 40;

/// Highest initial speed of a generated vehicle.
pub const SPAWN_SPEED_MAX: u32 = 120;

/// Default per-tick speed jitter half-width.
pub const DEFAULT_SPEED_JITTER: f64 = 5.0;

// --- Violations ---

/// Default active speed limit.
pub const DEFAULT_SPEED_LIMIT: f64 = 80.0;

/// Default number of consecutive overspeed ticks before an alert (5 simulated minutes).
pub const DEFAULT_VIOLATION_THRESHOLD_TICKS: u32 = 300;

/// Default speed history length (one sample per tick).
pub const DEFAULT_HISTORY_WINDOW: usize = 300;

/// Default camera/location label stamped on alerts.
pub const DEFAULT_LOCATION: &str = "Main Highway - Camera #1";

// --- Configuration bounds ---

/// Lowest accepted speed limit.
pub const SPEED_LIMIT_FLOOR: f64 = 1.0;

/// Highest accepted speed limit.
pub const SPEED_LIMIT_CEILING: f64 = 250.0;

/// Longest accepted dwell threshold / history window (one simulated day at 1 s ticks).
pub const MAX_WINDOW_TICKS: u32 = 86_400;

/// Largest accepted fleet.
pub const MAX_FLEET_SIZE: usize = 1_000;

/// Longest accepted tick interval (milliseconds).
pub const MAX_TICK_INTERVAL_MS: u64 = 60_000;

/// Largest accepted jitter half-width.
pub const MAX_SPEED_JITTER: f64 = 50.0;

/// Longest accepted simulated tick length (seconds).
pub const MAX_SIM_TICK_SECS: f64 = 3_600.0;

// --- Plates ---

/// Letters used on generated plates (no I or O).
pub const PLATE_LETTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
