use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use engine::HeadlessRunner;
use engine::profiling::StepStats;
use tracing_subscriber::EnvFilter;

use teahouse::demo::{DEMO_SCRIPT, tea_making};
use teahouse::script::{ScriptStep, parse_script};
use teahouse::services::ServiceLog;
use teahouse::settings::SettingsStore;
use teahouse::state::{GameInput, GameState};

/// Runs a scripted tea-making session without a window and prints the final state as JSON.
#[derive(Debug, Parser)]
#[command(name = "teahouse", version)]
struct Args {
    /// Settings file; defaults to TEAHOUSE_SETTINGS_PATH or the user config dir.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Session script; the built-in demo runs when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Time every frame and log a summary at the end.
    #[arg(long)]
    profile: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let store = match &args.settings {
        Some(path) => SettingsStore::at(path.clone()),
        None => SettingsStore::from_env(),
    };
    tracing::info!(path = %store.path().display(), "loading settings");
    let settings = store.load();

    let script = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed reading script {}", path.display()))?,
        None => DEMO_SCRIPT.to_string(),
    };
    let steps = parse_script(&script).context("failed parsing session script")?;

    let services = ServiceLog::new();
    let frame_step = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));
    let mut runner = HeadlessRunner::with_frame_step(tea_making(&settings, &services), frame_step);
    let mut stats = StepStats::default();

    for step in steps {
        match step {
            ScriptStep::Input(input) => step_once(&mut runner, input, args.profile, &mut stats),
            ScriptStep::Wait(duration) => {
                let target = runner.elapsed().saturating_add(duration);
                while runner.elapsed() < target {
                    step_once(&mut runner, GameInput::Idle, args.profile, &mut stats);
                }
            }
        }
    }

    let snapshot = runner.behaviour().snapshot();
    let frames = runner.frame();
    runner.finish();

    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("failed encoding final snapshot")?
    );
    tracing::info!(frames, service_calls = services.len(), "session finished");
    if args.profile {
        tracing::info!(
            steps = stats.steps,
            mean_us = stats.mean().as_micros() as u64,
            worst_us = stats.worst.as_micros() as u64,
            "frame timings"
        );
    }
    Ok(())
}

fn step_once(runner: &mut HeadlessRunner<GameState>, input: GameInput, profile: bool, stats: &mut StepStats) {
    if profile {
        runner.step_profiled(input, stats);
    } else {
        runner.step(input);
    }
}
