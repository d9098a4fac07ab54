//! Headless runs: tick as fast as possible and summarize the outcome.

use serde::Serialize;

use corridor_core::commands::PlayerCommand;
use corridor_core::enums::{GameState, LossReason};
use corridor_core::events::GameEvent;
use corridor_sim::{SimConfig, SimulationEngine};

/// Outcome of a headless run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_ms: u64,
    pub game_state: GameState,
    pub loss_reason: Option<LossReason>,
    /// 1-based level reached.
    pub level: u32,
    pub saved: u32,
    pub lost: u32,
    pub budget: u32,
    pub success_rate_pct: u32,
}

/// Run until the campaign ends or `max_ticks` ticks have been issued.
///
/// Transition screens are continued automatically. `script` commands are
/// queued right behind the first continue, so placements land on level 1.
pub fn run(config: SimConfig, script: Vec<PlayerCommand>, max_ticks: u64) -> RunSummary {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::Continue);
    engine.queue_commands(script);

    let mut issued = 0;
    let mut last = None;
    while issued < max_ticks {
        if engine.game_state() == GameState::LevelTransition {
            engine.queue_command(PlayerCommand::Continue);
        }
        let snapshot = engine.tick();
        issued += 1;
        for event in &snapshot.events {
            log_event(event);
        }
        let done = snapshot.game_state.is_terminal();
        last = Some(snapshot);
        if done {
            break;
        }
    }

    let time = engine.time();
    let campaign = engine.campaign();
    let summary = RunSummary {
        ticks: time.tick,
        elapsed_ms: time.elapsed_ms,
        game_state: campaign.game_state,
        loss_reason: campaign.loss_reason,
        level: campaign.level_number(),
        saved: campaign.saved_total,
        lost: campaign.lost_total,
        budget: campaign.budget,
        success_rate_pct: last.map_or(0, |s| s.hud.success_rate_pct),
    };
    if !summary.game_state.is_terminal() {
        tracing::warn!(max_ticks, "tick limit reached before the campaign ended");
    }
    summary
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LevelStarted { .. }
        | GameEvent::LevelCompleted { .. }
        | GameEvent::HerdFinished { .. }
        | GameEvent::CampaignWon { .. }
        | GameEvent::CampaignLost { .. } => tracing::info!(?event, "campaign"),
        _ => tracing::debug!(?event, "sim"),
    }
}
