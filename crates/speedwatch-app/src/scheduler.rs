//! Tick scheduler: runs the simulation engine on a dedicated thread at the
//! configured interval and publishes one snapshot per step.
//!
//! The engine moves into the loop thread on `start` and comes back out on
//! `stop`, so only one thread ever mutates it and steps cannot overlap.
//! Commands arrive via `mpsc` channel and are applied at the next step.

use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use speedwatch_core::commands::SimCommand;
use speedwatch_core::config::SimConfig;
use speedwatch_core::state::FleetSnapshot;
use speedwatch_sim::engine::SimulationEngine;

use crate::state::{LoopCommand, SchedulerError, SharedSnapshot};

/// Wall-clock duration of one tick under `config`.
pub fn tick_duration(config: &SimConfig) -> Duration {
    Duration::from_millis(config.tick_interval_ms)
}

struct RunningLoop {
    command_tx: mpsc::Sender<LoopCommand>,
    handle: JoinHandle<SimulationEngine>,
}

/// Owns an engine and drives it at a fixed period while started.
pub struct TickScheduler {
    engine: Option<SimulationEngine>,
    running: Option<RunningLoop>,
    latest_snapshot: SharedSnapshot,
}

impl TickScheduler {
    pub fn new(engine: SimulationEngine) -> Self {
        Self {
            engine: Some(engine),
            running: None,
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Spawn the tick loop. `on_step` is called once per completed step, on
    /// the loop thread, before the snapshot is stored for polling.
    pub fn start<F>(&mut self, on_step: F) -> Result<(), SchedulerError>
    where
        F: FnMut(&FleetSnapshot) + Send + 'static,
    {
        if self.running.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }
        let engine = self.engine.take().ok_or(SchedulerError::EngineUnavailable)?;

        let (command_tx, command_rx) = mpsc::channel::<LoopCommand>();
        let latest_snapshot = Arc::clone(&self.latest_snapshot);

        let handle = std::thread::Builder::new()
            .name("speedwatch-tick-loop".into())
            .spawn(move || run_tick_loop(engine, command_rx, &latest_snapshot, on_step))?;

        self.running = Some(RunningLoop { command_tx, handle });
        debug!("tick loop started");
        Ok(())
    }

    /// Stop the loop after the step in progress (if any) and take the engine
    /// back. No further steps run once this returns.
    pub fn stop(&mut self) -> Result<(), SchedulerError> {
        let running = self.running.take().ok_or(SchedulerError::NotRunning)?;

        // The thread may already be gone if the callback panicked.
        let _ = running.command_tx.send(LoopCommand::Shutdown);

        let engine = running
            .handle
            .join()
            .map_err(|_| SchedulerError::LoopPanicked)?;
        debug!(tick = engine.time().tick, "tick loop stopped");
        self.engine = Some(engine);
        Ok(())
    }

    /// Validate `config` now and apply it before the next step.
    pub fn configure(&mut self, config: SimConfig) -> Result<(), SchedulerError> {
        config.validate()?;
        self.send(SimCommand::Configure { config })
    }

    /// Forward a command to the engine, applied before the next step.
    pub fn send(&mut self, command: SimCommand) -> Result<(), SchedulerError> {
        match (&self.running, self.engine.as_mut()) {
            (Some(running), _) => running
                .command_tx
                .send(LoopCommand::Sim(command))
                .map_err(|_| SchedulerError::ChannelClosed),
            (None, Some(engine)) => {
                engine.queue_command(command);
                Ok(())
            }
            (None, None) => Err(SchedulerError::EngineUnavailable),
        }
    }

    /// Latest published snapshot. Before the first step, the engine's current
    /// state if the scheduler is stopped.
    pub fn snapshot(&self) -> Option<FleetSnapshot> {
        let published = self
            .latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone());
        published.or_else(|| self.engine.as_ref().map(SimulationEngine::snapshot))
    }

    /// The engine, available only while stopped.
    pub fn engine(&self) -> Option<&SimulationEngine> {
        self.engine.as_ref()
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        if self.running.is_some() {
            let _ = self.stop();
        }
    }
}

/// The tick loop. Runs until Shutdown or channel disconnect, then hands the
/// engine back.
fn run_tick_loop<F>(
    mut engine: SimulationEngine,
    command_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<FleetSnapshot>>,
    mut on_step: F,
) -> SimulationEngine
where
    F: FnMut(&FleetSnapshot),
{
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Wait for the deadline; commands arriving meanwhile are queued.
        loop {
            let now = Instant::now();
            if now >= next_tick_time {
                break;
            }
            match command_rx.recv_timeout(next_tick_time - now) {
                Ok(LoopCommand::Sim(command)) => engine.queue_command(command),
                Ok(LoopCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => return engine,
                Err(RecvTimeoutError::Timeout) => break,
            }
        }

        // 2. Drain anything that raced the deadline
        loop {
            match command_rx.try_recv() {
                Ok(LoopCommand::Sim(command)) => engine.queue_command(command),
                Ok(LoopCommand::Shutdown) => return engine,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return engine,
            }
        }

        // 3. One full step
        let snapshot = engine.tick();

        // 4. Publish
        on_step(&snapshot);
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Schedule the next step using the interval now in force
        let interval = tick_duration(engine.config());
        next_tick_time += interval;
        let now = Instant::now();
        if now > next_tick_time && now - next_tick_time > interval * 2 {
            // Too far behind, drop the missed ticks instead of bursting
            warn!(
                behind_ms = (now - next_tick_time).as_millis() as u64,
                tick = engine.time().tick,
                "tick loop fell behind, dropping missed ticks"
            );
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speedwatch_core::config::ConfigError;
    use speedwatch_core::enums::SimPhase;
    use speedwatch_sim::engine::EngineOptions;

    fn fast_engine() -> SimulationEngine {
        let config = SimConfig {
            tick_interval_ms: 2,
            ..Default::default()
        };
        SimulationEngine::new(config, EngineOptions::default()).unwrap()
    }

    fn recv_until<F>(rx: &mpsc::Receiver<FleetSnapshot>, mut pred: F) -> Option<FleetSnapshot>
    where
        F: FnMut(&FleetSnapshot) -> bool,
    {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Ok(snap) = rx.recv_timeout(Duration::from_millis(100)) {
                if pred(&snap) {
                    return Some(snap);
                }
            }
        }
        None
    }

    #[test]
    fn test_tick_duration_from_config() {
        assert_eq!(
            tick_duration(&SimConfig::default()),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_start_stop_lifecycle() {
        let mut scheduler = TickScheduler::new(fast_engine());
        let (tx, rx) = mpsc::channel();

        scheduler
            .start(move |snap| {
                let _ = tx.send(snap.clone());
            })
            .unwrap();
        assert!(scheduler.is_running());
        assert!(scheduler.engine().is_none());

        let snap = recv_until(&rx, |s| s.time.tick >= 5).expect("loop should tick");
        assert_eq!(snap.vehicles.len(), 6);

        scheduler.stop().unwrap();
        assert!(!scheduler.is_running());

        // The callback (and its sender) is gone once stopped: no further steps.
        while rx.try_recv().is_ok() {}
        assert!(matches!(
            rx.recv_timeout(Duration::from_millis(50)),
            Err(RecvTimeoutError::Disconnected)
        ));

        let engine = scheduler.engine().expect("engine returned on stop");
        let last = scheduler.snapshot().unwrap();
        assert_eq!(last.time.tick, engine.time().tick);
    }

    #[test]
    fn test_steps_are_sequential() {
        let mut scheduler = TickScheduler::new(fast_engine());
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&ticks);

        scheduler
            .start(move |snap| recorded.lock().unwrap().push(snap.time.tick))
            .unwrap();
        std::thread::sleep(Duration::from_millis(100));
        scheduler.stop().unwrap();

        let ticks = ticks.lock().unwrap();
        assert!(!ticks.is_empty());
        for (i, tick) in ticks.iter().enumerate() {
            assert_eq!(*tick, i as u64 + 1, "steps must run once each, in order");
        }
    }

    #[test]
    fn test_lifecycle_misuse() {
        let mut scheduler = TickScheduler::new(fast_engine());
        assert!(matches!(scheduler.stop(), Err(SchedulerError::NotRunning)));

        scheduler.start(|_| {}).unwrap();
        assert!(matches!(
            scheduler.start(|_| {}),
            Err(SchedulerError::AlreadyRunning)
        ));
        scheduler.stop().unwrap();
    }

    #[test]
    fn test_restart_continues_from_same_engine() {
        let mut scheduler = TickScheduler::new(fast_engine());
        scheduler.start(|_| {}).unwrap();
        std::thread::sleep(Duration::from_millis(30));
        scheduler.stop().unwrap();
        let paused_at = scheduler.engine().unwrap().time().tick;

        let (tx, rx) = mpsc::channel();
        scheduler
            .start(move |snap| {
                let _ = tx.send(snap.time.tick);
            })
            .unwrap();
        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        scheduler.stop().unwrap();
        assert_eq!(first, paused_at + 1);
    }

    #[test]
    fn test_configure_rejects_invalid_config() {
        let mut scheduler = TickScheduler::new(fast_engine());
        let bad = SimConfig {
            speed_limit: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            scheduler.configure(bad.clone()),
            Err(SchedulerError::Config(ConfigError::SpeedLimit(_)))
        ));

        scheduler.start(|_| {}).unwrap();
        assert!(matches!(
            scheduler.configure(bad),
            Err(SchedulerError::Config(_))
        ));
        scheduler.stop().unwrap();
    }

    #[test]
    fn test_configure_while_running_applies_next_step() {
        let mut scheduler = TickScheduler::new(fast_engine());
        let (tx, rx) = mpsc::channel();
        scheduler
            .start(move |snap| {
                let _ = tx.send(snap.clone());
            })
            .unwrap();

        scheduler
            .configure(SimConfig {
                speed_limit: 100.0,
                fleet_size: 9,
                tick_interval_ms: 2,
                ..Default::default()
            })
            .unwrap();

        let snap = recv_until(&rx, |s| s.speed_limit == 100.0).expect("config applied");
        assert_eq!(snap.vehicles.len(), 9);
        scheduler.stop().unwrap();
    }

    #[test]
    fn test_pause_via_commands() {
        let mut scheduler = TickScheduler::new(fast_engine());
        let (tx, rx) = mpsc::channel();
        scheduler
            .start(move |snap| {
                let _ = tx.send(snap.clone());
            })
            .unwrap();

        scheduler.send(SimCommand::Pause).unwrap();
        let paused = recv_until(&rx, |s| s.phase == SimPhase::Paused).expect("paused");
        let next = recv_until(&rx, |_| true).unwrap();
        assert_eq!(next.time.tick, paused.time.tick);

        scheduler.send(SimCommand::Resume).unwrap();
        let resumed = recv_until(&rx, |s| s.phase == SimPhase::Running).expect("resumed");
        assert!(resumed.time.tick > paused.time.tick);
        scheduler.stop().unwrap();
    }

    #[test]
    fn test_commands_queue_while_stopped() {
        let mut scheduler = TickScheduler::new(fast_engine());
        scheduler.send(SimCommand::Pause).unwrap();
        let (tx, rx) = mpsc::channel();
        scheduler
            .start(move |snap| {
                let _ = tx.send(snap.phase);
            })
            .unwrap();
        let phase = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        scheduler.stop().unwrap();
        assert_eq!(phase, SimPhase::Paused);
    }

    #[test]
    fn test_drop_stops_loop() {
        let (tx, rx) = mpsc::channel();
        {
            let mut scheduler = TickScheduler::new(fast_engine());
            scheduler
                .start(move |snap| {
                    let _ = tx.send(snap.time.tick);
                })
                .unwrap();
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
        while rx.try_recv().is_ok() {}
        assert!(matches!(
            rx.recv_timeout(Duration::from_millis(50)),
            Err(RecvTimeoutError::Disconnected)
        ));
    }
}
