//! Runtime configuration and its validation.
//!
//! A `SimConfig` is validated synchronously by whoever submits it; the engine
//! only ever applies configs that passed `validate()`, at a tick boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Tunable parameters of a running simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Active speed limit (km/h).
    pub speed_limit: f64,
    /// Consecutive overspeed ticks before an alert fires.
    pub violation_threshold_ticks: u32,
    /// Number of vehicles kept on the segment.
    pub fleet_size: usize,
    /// Wall-clock interval between ticks (milliseconds).
    pub tick_interval_ms: u64,
    /// Maximum number of speed samples kept per vehicle.
    pub history_window: usize,
    /// Half-width of the uniform per-tick speed jitter. 0 disables jitter.
    pub speed_jitter: f64,
    /// Simulated seconds one tick stands for. Only this, together with the
    /// threshold, sets the alert duration label; `tick_interval_ms` paces the
    /// wall clock and never changes the label.
    pub sim_tick_secs: f64,
    /// Camera/location label stamped on alerts.
    pub location: String,
}

/// Reasons a configuration is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("speed limit {0} km/h is outside [{}, {}]", SPEED_LIMIT_FLOOR, SPEED_LIMIT_CEILING)]
    SpeedLimit(f64),

    #[error("violation threshold must be between 1 and {} ticks, got {0}", MAX_WINDOW_TICKS)]
    ViolationThreshold(u32),

    #[error("fleet size must be between 1 and {}, got {0}", MAX_FLEET_SIZE)]
    FleetSize(usize),

    #[error("tick interval must be between 1 and {} ms, got {0}", MAX_TICK_INTERVAL_MS)]
    TickInterval(u64),

    #[error("history window must be between 1 and {} samples, got {0}", MAX_WINDOW_TICKS)]
    HistoryWindow(usize),

    #[error("speed jitter {0} is outside [0, {}]", MAX_SPEED_JITTER)]
    SpeedJitter(f64),

    #[error("simulated tick length {0} s is outside (0, {}]", MAX_SIM_TICK_SECS)]
    SimTickSecs(f64),

    #[error("location label must not be empty")]
    EmptyLocation,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed_limit: DEFAULT_SPEED_LIMIT,
            violation_threshold_ticks: DEFAULT_VIOLATION_THRESHOLD_TICKS,
            fleet_size: DEFAULT_FLEET_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            history_window: DEFAULT_HISTORY_WINDOW,
            speed_jitter: DEFAULT_SPEED_JITTER,
            sim_tick_secs: DEFAULT_SIM_TICK_SECS,
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl SimConfig {
    /// Check every bound. Non-finite floats are rejected along with out-of-range ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(SPEED_LIMIT_FLOOR..=SPEED_LIMIT_CEILING).contains(&self.speed_limit) {
            return Err(ConfigError::SpeedLimit(self.speed_limit));
        }
        if !(1..=MAX_WINDOW_TICKS).contains(&self.violation_threshold_ticks) {
            return Err(ConfigError::ViolationThreshold(
                self.violation_threshold_ticks,
            ));
        }
        if !(1..=MAX_FLEET_SIZE).contains(&self.fleet_size) {
            return Err(ConfigError::FleetSize(self.fleet_size));
        }
        if !(1..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(ConfigError::TickInterval(self.tick_interval_ms));
        }
        if !(1..=MAX_WINDOW_TICKS as usize).contains(&self.history_window) {
            return Err(ConfigError::HistoryWindow(self.history_window));
        }
        if !(0.0..=MAX_SPEED_JITTER).contains(&self.speed_jitter) {
            return Err(ConfigError::SpeedJitter(self.speed_jitter));
        }
        if !(self.sim_tick_secs > 0.0 && self.sim_tick_secs <= MAX_SIM_TICK_SECS) {
            return Err(ConfigError::SimTickSecs(self.sim_tick_secs));
        }
        if self.location.trim().is_empty() {
            return Err(ConfigError::EmptyLocation);
        }
        Ok(())
    }

    /// Simulated duration of one full dwell threshold, in seconds.
    pub fn dwell_secs(&self) -> f64 {
        self.violation_threshold_ticks as f64 * self.sim_tick_secs
    }

    /// Alert duration label derived from the dwell threshold, e.g. "5+ minutes".
    pub fn duration_label(&self) -> String {
        duration_label(self.dwell_secs())
    }
}

/// Render a dwell time as the coarsest whole unit it covers.
/// Rounds to whole milliseconds before bucketing.
pub fn duration_label(secs: f64) -> String {
    let millis = (secs.max(0.0) * 1000.0).round() as u64;
    let (count, unit) = if millis >= 3_600_000 {
        (millis / 3_600_000, "hour")
    } else if millis >= 60_000 {
        (millis / 60_000, "minute")
    } else if millis >= 1000 {
        (millis / 1000, "second")
    } else {
        (millis, "millisecond")
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count}+ {unit}{plural}")
}
