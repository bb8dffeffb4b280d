//! Simulation engine, the core of the monitor.
//!
//! `SimulationEngine` owns the hecs ECS world, processes queued commands,
//! runs all systems, and produces `FleetSnapshot`s. Completely headless
//! (no threads, no timers), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use speedwatch_core::commands::SimCommand;
use speedwatch_core::components::{AlertState, Speed, SpeedHistory, VehicleIdentity};
use speedwatch_core::config::{ConfigError, SimConfig};
use speedwatch_core::constants::{MAX_SPEED, MIN_SPEED};
use speedwatch_core::enums::SimPhase;
use speedwatch_core::events::Alert;
use speedwatch_core::state::FleetSnapshot;
use speedwatch_core::types::{SimTime, VehicleId};

use crate::systems;
use crate::systems::alerts::AlertLog;
use crate::systems::violation::{self, OverspeedCounters, StreakState};
use crate::world_setup;

/// Options fixed for the lifetime of an engine.
pub struct EngineOptions {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: SimPhase,
    config: SimConfig,
    rng: ChaCha8Rng,
    next_vehicle_id: u64,
    next_alert_id: u64,
    counters: OverspeedCounters,
    alert_log: AlertLog,
    alerts_generated: u64,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<hecs::Entity>,
}

impl SimulationEngine {
    /// Create an engine with a full fleet. The config is validated first.
    pub fn new(config: SimConfig, options: EngineOptions) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            phase: SimPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(options.seed),
            next_vehicle_id: 0,
            next_alert_id: 0,
            counters: OverspeedCounters::new(),
            alert_log: AlertLog::new(),
            alerts_generated: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            config,
        };

        world_setup::populate_fleet(
            &mut engine.world,
            &mut engine.rng,
            &mut engine.next_vehicle_id,
            engine.config.fleet_size,
            engine.time,
        );

        Ok(engine)
    }

    /// Validate a new configuration and queue it for the next tick boundary.
    pub fn configure(&mut self, config: SimConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.queue_command(SimCommand::Configure { config });
        Ok(())
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> FleetSnapshot {
        self.process_commands();

        let new_alerts = if self.phase == SimPhase::Running {
            self.time.advance(self.config.sim_tick_secs);
            let alerts = self.run_systems();
            self.check_invariants();
            alerts
        } else {
            Vec::new()
        };

        self.build_snapshot(new_alerts)
    }

    /// Current state without advancing. `new_alerts` is always empty.
    pub fn snapshot(&self) -> FleetSnapshot {
        self.build_snapshot(Vec::new())
    }

    /// Get the current phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// The configuration applied at the most recent tick boundary.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Every alert emitted so far, most recent first.
    pub fn alerts(&self) -> &AlertLog {
        &self.alert_log
    }

    /// Overspeed streaks as of the last tick.
    pub fn counters(&self) -> &OverspeedCounters {
        &self.counters
    }

    /// Violation state of a live vehicle. `None` once it has left the segment.
    pub fn streak_state(&self, id: VehicleId) -> Option<StreakState> {
        let mut query = self.world.query::<(&VehicleIdentity, &AlertState)>();
        query
            .iter()
            .find(|(_, (identity, _))| identity.id == id)
            .map(|(_, (_, alert_state))| {
                violation::streak_state(self.counters.get(id), alert_state.alerted)
            })
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Overwrite the position and speed of the vehicle in `slot` (for tests).
    #[cfg(test)]
    pub fn pin_vehicle(&mut self, slot: usize, x: f64, speed: f64) {
        use speedwatch_core::components::Slot;
        use speedwatch_core::types::Position;

        for (_entity, (s, pos, sp)) in self
            .world
            .query_mut::<(&Slot, &mut Position, &mut Speed)>()
        {
            if s.0 == slot {
                pos.x = x;
                sp.0 = speed;
            }
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::Configure { config } => self.apply_config(config),
            SimCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.phase = SimPhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Running;
                }
            }
        }
    }

    /// Swap in a validated config. A changed fleet size takes effect immediately
    /// so the coming tick already runs on the new fleet.
    fn apply_config(&mut self, config: SimConfig) {
        if config.fleet_size != self.config.fleet_size {
            systems::cleanup::resize_fleet(
                &mut self.world,
                &mut self.rng,
                &mut self.next_vehicle_id,
                config.fleet_size,
                &mut self.despawn_buffer,
                self.time,
            );
        }

        info!(
            speed_limit = config.speed_limit,
            threshold_ticks = config.violation_threshold_ticks,
            fleet_size = config.fleet_size,
            tick_interval_ms = config.tick_interval_ms,
            tick = self.time.tick,
            "configuration applied"
        );

        self.config = config;
    }

    /// Run all systems in order. Returns the alerts emitted this tick.
    fn run_systems(&mut self) -> Vec<Alert> {
        // 1. Movement, speed jitter, history
        let exits = systems::movement::run(&mut self.world, &mut self.rng, &self.config, self.time);
        // 2. Exit and replacement
        systems::cleanup::run(
            &mut self.world,
            &mut self.rng,
            &mut self.next_vehicle_id,
            &exits,
            &mut self.despawn_buffer,
            self.time,
        );
        // 3. Overspeed streaks
        let violations = systems::violation::run(
            &mut self.world,
            &mut self.counters,
            self.config.speed_limit,
            self.config.violation_threshold_ticks,
        );
        // 4. Alerts
        let alerts = systems::alerts::emit(
            violations,
            &self.config,
            self.time,
            &mut self.next_alert_id,
            &mut self.alert_log,
        );
        self.alerts_generated += alerts.len() as u64;
        alerts
    }

    /// Internal consistency checks. A failure here is a bug in a system.
    fn check_invariants(&self) {
        assert_eq!(
            self.world.len() as usize,
            self.config.fleet_size,
            "fleet size drifted from configuration"
        );
        for (_entity, (speed, history)) in self.world.query::<(&Speed, &SpeedHistory)>().iter() {
            assert!(
                (MIN_SPEED..=MAX_SPEED).contains(&speed.0),
                "speed {} outside clamp range",
                speed.0
            );
            assert!(
                history.samples.len() <= self.config.history_window,
                "speed history exceeds window"
            );
        }
    }

    fn build_snapshot(&self, new_alerts: Vec<Alert>) -> FleetSnapshot {
        let stats = systems::stats::compute(
            &self.world,
            self.config.speed_limit,
            self.alerts_generated,
        );
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.config.speed_limit,
            new_alerts,
            stats,
        )
    }
}
