//! `corridor` binary: load the level and deterrent configs, then either run
//! the real-time game loop bridged over stdin/stdout or a headless batch run.
//!
//! Real-time mode reads one JSON `PlayerCommand` per stdin line and writes
//! one JSON snapshot per tick to stdout. Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use corridor_app::game_loop::LoopOptions;
use corridor_app::state::AppState;
use corridor_app::{headless, session};
use corridor_core::commands::PlayerCommand;
use corridor_core::config::{DeterrentCatalog, LevelsConfig};
use corridor_core::state::GameStateSnapshot;
use corridor_sim::SimConfig;

/// Command-line arguments for the elephant corridor runner.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Level definitions.
    #[arg(long, value_name = "PATH", default_value = "config/levels.json")]
    levels: PathBuf,
    /// Deterrent catalog.
    #[arg(long, value_name = "PATH", default_value = "config/deterrents.json")]
    deterrents: PathBuf,
    /// RNG seed. Same seed and commands give the same run.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Initial time scale for the real-time loop.
    #[arg(long, value_name = "SCALE", default_value_t = 1.0)]
    time_scale: f64,
    /// Tick as fast as possible and print a JSON summary.
    #[arg(long)]
    headless: bool,
    /// Tick limit for headless runs.
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = 200_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    ticks: u64,
    /// JSON array of commands queued at the start of a headless run.
    #[arg(long, value_name = "PATH", requires = "headless")]
    script: Option<PathBuf>,
    /// Leave level-transition screens without waiting for a continue command.
    #[arg(long)]
    auto_continue: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();

    let levels = LevelsConfig::load_or_default(&args.levels);
    let catalog = DeterrentCatalog::load_or_default(&args.deterrents);
    info!(
        levels = levels.level_count(),
        deterrent_types = catalog.deterrents.len(),
        seed = args.seed,
        "configuration loaded"
    );

    let config = SimConfig {
        seed: args.seed,
        time_scale: args.time_scale.clamp(0.0, 4.0),
        levels,
        catalog,
    };

    if args.headless {
        let script = match &args.script {
            Some(path) => load_script(path)?,
            None => Vec::new(),
        };
        let summary = headless::run(config, script, args.ticks);
        info!(
            state = ?summary.game_state,
            ticks = summary.ticks,
            saved = summary.saved,
            lost = summary.lost,
            "headless run finished"
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    run_realtime(config, args.auto_continue)
}

fn load_script(path: &Path) -> Result<Vec<PlayerCommand>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading command script {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing command script {}", path.display()))
}

fn run_realtime(config: SimConfig, auto_continue: bool) -> Result<()> {
    let state = AppState::new();
    let emit = |snapshot: &GameStateSnapshot| {
        let mut out = io::stdout().lock();
        let written = serde_json::to_writer(&mut out, snapshot)
            .map_err(io::Error::from)
            .and_then(|()| out.write_all(b"\n"));
        if let Err(e) = written {
            tracing::debug!(error = %e, "snapshot not written");
        }
    };
    session::start_simulation(&state, config, LoopOptions { auto_continue }, emit)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<PlayerCommand>(line) {
            Ok(command) => session::send_command(&state, command)?,
            Err(e) => tracing::warn!(error = %e, input = line, "ignoring malformed command"),
        }
    }

    info!("stdin closed, stopping");
    session::stop_simulation(&state)?;
    Ok(())
}
