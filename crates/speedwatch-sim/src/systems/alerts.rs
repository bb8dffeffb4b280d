//! Alert emission and the in-memory alert log.

use std::collections::VecDeque;

use tracing::info;

use speedwatch_core::config::SimConfig;
use speedwatch_core::events::Alert;
use speedwatch_core::types::{AlertId, SimTime};

use super::violation::ViolationEvent;

/// Append-only alert log, most recent first. Never trimmed by the engine.
#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    entries: VecDeque<Alert>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn prepend(&mut self, alert: Alert) {
        self.entries.push_front(alert);
    }

    /// Most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Alert> {
        self.entries.iter().cloned().collect()
    }
}

/// Turn violation events into alerts, prepend them to the log and return the
/// alerts created this tick (most recent first).
pub fn emit(
    events: Vec<ViolationEvent>,
    config: &SimConfig,
    time: SimTime,
    next_alert_id: &mut u64,
    log: &mut AlertLog,
) -> Vec<Alert> {
    if events.is_empty() {
        return Vec::new();
    }

    let duration = config.duration_label();
    let mut created = Vec::with_capacity(events.len());

    for event in events {
        let alert = Alert {
            id: AlertId(*next_alert_id),
            vehicle_id: event.vehicle_id,
            plate: event.plate,
            speed: event.speed,
            duration: duration.clone(),
            timestamp: time,
            location: config.location.clone(),
        };
        *next_alert_id += 1;

        info!(
            alert = %alert.id,
            vehicle = %alert.vehicle_id,
            plate = %alert.plate,
            speed = alert.speed,
            duration = %alert.duration,
            tick = time.tick,
            "sustained overspeed alert"
        );

        log.prepend(alert.clone());
        created.push(alert);
    }

    created.reverse();
    created
}
