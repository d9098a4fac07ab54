//! Game loop thread: runs the simulation engine at 62.5 Hz and emits snapshots.
//!
//! The engine is created inside the thread and never leaves it. Commands
//! arrive via an `mpsc` channel; every snapshot goes to the caller's sink and
//! is stored in shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use corridor_core::commands::PlayerCommand;
use corridor_core::constants::TICK_MS;
use corridor_core::enums::GameState;
use corridor_core::state::GameStateSnapshot;
use corridor_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_millis(TICK_MS);

/// Below this scale the loop keeps the nominal pace.
const MIN_TIME_SCALE: f64 = 0.001;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    /// Leave level-transition screens without waiting for the player.
    pub auto_continue: bool,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the bridge to use and the thread handle.
pub fn spawn_game_loop<F>(
    config: SimConfig,
    options: LoopOptions,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    emit: F,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)>
where
    F: FnMut(&GameStateSnapshot) + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("corridor-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(config);
            run_game_loop(engine, options, cmd_rx, &latest_snapshot, emit);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop<F>(
    mut engine: SimulationEngine,
    options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    mut emit: F,
) where
    F: FnMut(&GameStateSnapshot),
{
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    tracing::info!(tick = engine.time().tick, "game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        if options.auto_continue && engine.game_state() == GameState::LevelTransition {
            engine.queue_command(PlayerCommand::Continue);
        }

        // 2. Advance one tick (engine handles pause and end states internally)
        let snapshot = engine.tick();

        // 3. Hand the snapshot to the front end
        emit(&snapshot);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick, adjusting for time_scale
        let effective_tick_duration = tick_duration(engine.time_scale());

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind: reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

fn tick_duration(time_scale: f64) -> Duration {
    if time_scale > MIN_TIME_SCALE {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}
