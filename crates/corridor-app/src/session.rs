//! Front-end bridge: start a game loop, forward commands, poll snapshots.

use corridor_core::commands::PlayerCommand;
use corridor_core::state::GameStateSnapshot;
use corridor_sim::SimConfig;

use crate::game_loop::{self, LoopOptions};
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop is gone")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation<F>(
    state: &AppState,
    config: SimConfig,
    options: LoopOptions,
    emit: F,
) -> Result<(), SessionError>
where
    F: FnMut(&GameStateSnapshot) + Send + 'static,
{
    let mut tx_lock = state.command_tx.lock().map_err(|_| SessionError::Poisoned)?;
    if tx_lock.is_some() {
        return Err(SessionError::AlreadyRunning);
    }

    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(config, options, state.latest_snapshot.clone(), emit)?;

    *tx_lock = Some(cmd_tx);
    *state.loop_thread.lock().map_err(|_| SessionError::Poisoned)? = Some(handle);
    tracing::info!("game loop started");
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), SessionError> {
    let tx_lock = state.command_tx.lock().map_err(|_| SessionError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| SessionError::Disconnected),
        None => Err(SessionError::NotStarted),
    }
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, SessionError> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|_| SessionError::Poisoned)?;
    Ok(lock.clone())
}

/// Ask the game loop to stop and wait for its thread.
pub fn stop_simulation(state: &AppState) -> Result<(), SessionError> {
    let tx = state
        .command_tx
        .lock()
        .map_err(|_| SessionError::Poisoned)?
        .take()
        .ok_or(SessionError::NotStarted)?;
    // A loop that already exited has dropped its receiver
    let _ = tx.send(GameLoopCommand::Shutdown);

    let handle = state
        .loop_thread
        .lock()
        .map_err(|_| SessionError::Poisoned)?
        .take();
    if let Some(handle) = handle {
        handle.join().map_err(|_| SessionError::Disconnected)?;
    }
    Ok(())
}
