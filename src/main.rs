//! Chat Patrol headless driver
//!
//! Runs a full session at a fixed frame rate with the autopilot standing in
//! for the player, then prints the run summary as JSON.

use std::path::PathBuf;

use clap::Parser;

use chat_patrol::sim::{Autopilot, AutopilotConfig, Engine, EventKind};
use chat_patrol::{EngineConfig, RunSummary};

#[derive(Parser, Debug)]
#[command(name = "chat-patrol", about = "Headless Chat Patrol run with the autopilot")]
struct Args {
    /// Run seed (defaults to the wall clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Engine config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0, value_parser = parse_fps)]
    fps: f64,

    /// Autopilot reaction delay (ms)
    #[arg(long, default_value_t = 250.0)]
    reaction_ms: f64,

    /// Autopilot chance of picking a random sanction
    #[arg(long, default_value_t = 0.05)]
    mistake_rate: f64,

    /// Stop after this much simulated time even if the run is still going
    #[arg(long, default_value_t = 180.0)]
    max_seconds: f64,
}

fn parse_fps(s: &str) -> Result<f64, String> {
    let fps: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if fps.is_finite() && fps >= 1.0 {
        Ok(fps)
    } else {
        Err(format!("fps must be a finite number of at least 1, got {s}"))
    }
}

fn load_config(path: Option<&PathBuf>) -> EngineConfig {
    let Some(path) = path else {
        return EngineConfig::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => EngineConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Invalid config {}: {e}, using defaults", path.display());
            EngineConfig::default()
        }),
        Err(e) => {
            log::warn!("Cannot read config {}: {e}, using defaults", path.display());
            EngineConfig::default()
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_ref());
    let mut engine = Engine::new(config, args.seed);
    let mut pilot = Autopilot::new(
        engine.seed() as u64,
        AutopilotConfig {
            reaction_ms: args.reaction_ms,
            mistake_rate: args.mistake_rate,
        },
    );

    let frame_ms = engine.config().clamp_delta(1000.0 / args.fps);
    let max_frames = (args.max_seconds * 1000.0 / frame_ms).ceil() as u64;
    log::info!(
        "Chat Patrol (headless) seed={} frame={:.2}ms",
        engine.seed(),
        frame_ms
    );

    engine.start();
    let mut frames = 0u64;
    let mut event = EventKind::None;
    let mut stage_id = engine.snapshot().stage.id;
    while frames < max_frames && !engine.snapshot().is_game_over() {
        engine.update(frame_ms);
        let snap = engine.snapshot();
        if snap.event != event {
            event = snap.event;
            if event.is_active() {
                log::debug!("Event: {}", event.label());
            }
        }
        if snap.stage.id != stage_id {
            stage_id = snap.stage.id;
            log::info!(
                "Stage {} (mental {:.0}, {})",
                stage_id,
                snap.mental,
                snap.mood().label()
            );
        }
        if let Some(action) = pilot.decide(&snap) {
            engine.act(action.id, Some(action.sanction));
        }
        frames += 1;
    }

    let snap = engine.snapshot();
    if !snap.is_game_over() {
        log::warn!("Stopped after {:.1}s without finishing", snap.clock_ms / 1000.0);
    }
    let summary = RunSummary::from_snapshot(&snap);
    log::info!(
        "{} - {} (streamer {})",
        summary.headline(),
        summary.title_label,
        snap.mood().label()
    );

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize summary: {e}"),
    }
}
