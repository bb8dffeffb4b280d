//! Speedwatch CLI
//!
//! Runs the overspeed monitor for a fixed wall-clock duration, printing every
//! alert as a JSON line on stdout. Logs go to stderr.
//!
//! # Example
//!
//! ```bash
//! # Default settings for 60 seconds, reproducible seed
//! speedwatch --seed 42 --duration-secs 60
//!
//! # Stricter limit, shorter dwell, full snapshots
//! speedwatch --speed-limit 70 --threshold-ticks 50 --emit-snapshots
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use speedwatch_app::TickScheduler;
use speedwatch_core::config::SimConfig;
use speedwatch_core::state::FleetSnapshot;
use speedwatch_sim::engine::{EngineOptions, SimulationEngine};

/// Speedwatch sustained-overspeed monitor
///
/// Simulates traffic on a monitored segment and raises an alert for every
/// vehicle that stays above the limit for the full dwell threshold.
#[derive(Parser, Debug)]
#[command(name = "speedwatch")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON config file; flags below override its fields
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Speed limit in km/h
    #[arg(short = 'l', long)]
    speed_limit: Option<f64>,

    /// Consecutive overspeed ticks before an alert
    #[arg(short = 't', long)]
    threshold_ticks: Option<u32>,

    /// Number of vehicles on the segment
    #[arg(short = 'f', long)]
    fleet_size: Option<usize>,

    /// Wall-clock milliseconds between ticks
    #[arg(short = 'i', long)]
    tick_interval_ms: Option<u64>,

    /// Half-width of the per-tick speed jitter (0 disables)
    #[arg(long)]
    jitter: Option<f64>,

    /// Run time in seconds
    #[arg(short = 'd', long, default_value = "30")]
    duration_secs: u64,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Print every snapshot instead of only new alerts
    #[arg(long)]
    emit_snapshots: bool,
}

impl Args {
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SimConfig::default(),
        };

        if let Some(limit) = self.speed_limit {
            config.speed_limit = limit;
        }
        if let Some(ticks) = self.threshold_ticks {
            config.violation_threshold_ticks = ticks;
        }
        if let Some(size) = self.fleet_size {
            config.fleet_size = size;
        }
        if let Some(ms) = self.tick_interval_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(jitter) = self.jitter {
            config.speed_jitter = jitter;
        }

        config.validate()?;
        Ok(config)
    }
}

fn emit(snapshot: &FleetSnapshot, full: bool) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    if full {
        serde_json::to_writer(&mut out, snapshot)?;
        writeln!(out)?;
    } else {
        for alert in &snapshot.new_alerts {
            serde_json::to_writer(&mut out, alert)?;
            writeln!(out)?;
        }
    }
    out.flush()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("warn,speedwatch_sim=info,speedwatch_app=info")
            }),
        )
        .init();

    let args = Args::parse();
    let config = args.sim_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);

    info!(
        speed_limit = config.speed_limit,
        threshold_ticks = config.violation_threshold_ticks,
        dwell = %config.duration_label(),
        fleet_size = config.fleet_size,
        tick_interval_ms = config.tick_interval_ms,
        seed,
        duration_secs = args.duration_secs,
        "Starting monitor"
    );

    let engine = SimulationEngine::new(config, EngineOptions { seed })?;
    let mut scheduler = TickScheduler::new(engine);

    let full = args.emit_snapshots;
    scheduler.start(move |snapshot| {
        if let Err(e) = emit(snapshot, full) {
            warn!(error = %e, "failed to write output");
        }
    })?;

    std::thread::sleep(Duration::from_secs(args.duration_secs));
    scheduler.stop()?;

    let engine = scheduler
        .engine()
        .context("engine not returned by scheduler")?;
    let stats = engine.snapshot().stats;
    info!(
        ticks = engine.time().tick,
        simulated_secs = engine.time().elapsed_secs,
        alerts = stats.alerts_generated,
        average_speed = stats.average_speed,
        current_violations = stats.current_violations,
        "Monitor stopped"
    );

    let summary = serde_json::json!({
        "summary": {
            "time": engine.time(),
            "stats": stats,
            "alerts": engine.alerts().to_vec(),
        }
    });
    println!("{summary}");

    Ok(())
}
