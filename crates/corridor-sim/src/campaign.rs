//! Campaign state machine: levels, herds, budget, and win/loss.
//!
//! Stored on the `SimulationEngine`, not as ECS entities. Systems report
//! what happened as `GameEvent`s; `resolve` folds each event into the
//! counters and `evaluate` runs the herd/level/end-of-campaign transitions.

use corridor_core::config::{LevelConfig, LevelsConfig};
use corridor_core::constants::*;
use corridor_core::enums::{GameState, LossReason};
use corridor_core::events::{AudioCue, GameEvent};

/// What `evaluate` did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    Steady,
    /// The finished herd was followed by the next herd of the same level.
    NextHerd,
    /// The level is over; its entities must be cleared.
    NextLevel,
    /// The campaign reached `Won` or `Lost` through the end condition.
    Ended,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignState {
    pub budget: u32,
    /// 0-based.
    pub current_level: u32,
    /// 0-based, within the current level.
    pub current_herd: u32,
    pub herd_size: u32,
    pub elephants_spawned_in_herd: u32,
    pub elephants_finished_in_herd: u32,
    pub elephants_lost_this_herd: u32,
    pub saved_total: u32,
    pub lost_total: u32,
    pub damaged_farms_count: u32,
    pub game_state: GameState,
    pub loss_reason: Option<LossReason>,
    /// Every elephant of the current herd has been spawned.
    pub herd_complete: bool,
    /// Time until the next spawn attempt (ms).
    pub spawn_countdown_ms: i64,
    /// The last herd of the last level is done; waiting for the field to empty.
    pub awaiting_final_resolution: bool,
}

impl Default for CampaignState {
    fn default() -> Self {
        Self {
            budget: STARTING_BUDGET,
            current_level: 0,
            current_herd: 0,
            herd_size: 0,
            elephants_spawned_in_herd: 0,
            elephants_finished_in_herd: 0,
            elephants_lost_this_herd: 0,
            saved_total: 0,
            lost_total: 0,
            damaged_farms_count: 0,
            game_state: GameState::LevelTransition,
            loss_reason: None,
            herd_complete: false,
            spawn_countdown_ms: FIRST_SPAWN_DELAY_MS as i64,
            awaiting_final_resolution: false,
        }
    }
}

impl CampaignState {
    pub fn new() -> Self {
        Self::default()
    }

    /// saved / (saved + lost), or `None` before any elephant has an outcome.
    pub fn success_rate(&self) -> Option<f64> {
        let finished = self.saved_total + self.lost_total;
        (finished > 0).then(|| f64::from(self.saved_total) / f64::from(finished))
    }

    /// 1-based level number, as shown to the player and used for unlocks.
    pub fn level_number(&self) -> u32 {
        self.current_level + 1
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.budget >= cost
    }

    /// Deduct a placement cost. Callers check `can_afford` first.
    pub fn spend(&mut self, cost: u32) {
        self.budget = self.budget.saturating_sub(cost);
    }

    /// Leave the transition screen: reset per-level counters and start the first herd.
    pub fn start_level(&mut self, levels: &LevelsConfig, cues: &mut Vec<AudioCue>) -> GameEvent {
        self.game_state = GameState::Playing;
        self.current_herd = 0;
        self.damaged_farms_count = 0;
        self.awaiting_final_resolution = false;
        self.spawn_countdown_ms = FIRST_SPAWN_DELAY_MS as i64;
        self.start_herd(levels);
        cues.push(AudioCue::LevelStart);
        tracing::info!(level = self.level_number(), herd_size = self.herd_size, "level started");
        GameEvent::LevelStarted {
            level: self.current_level,
        }
    }

    fn start_herd(&mut self, levels: &LevelsConfig) {
        self.herd_size = herd_size(levels, self.current_level, self.current_herd);
        self.elephants_spawned_in_herd = 0;
        self.elephants_finished_in_herd = 0;
        self.elephants_lost_this_herd = 0;
        // An empty herd has nothing left to spawn
        self.herd_complete = self.herd_size == 0;
    }

    /// Count one spawned elephant of the current herd.
    pub fn record_spawn(&mut self) {
        self.elephants_spawned_in_herd += 1;
        if self.elephants_spawned_in_herd >= self.herd_size {
            self.herd_complete = true;
        }
    }

    /// Whether the spawner may spawn another elephant now.
    pub fn spawn_due(&self) -> bool {
        self.spawn_countdown_ms <= 0
            && !self.herd_complete
            && self.elephants_spawned_in_herd < self.herd_size
    }

    /// Fold one gameplay event into the counters. Returns a follow-up event
    /// when the event crossed a loss threshold.
    pub fn resolve(&mut self, event: &GameEvent, cues: &mut Vec<AudioCue>) -> Option<GameEvent> {
        match *event {
            GameEvent::ReachedSafety { herd, .. } => {
                self.saved_total += 1;
                self.budget += SAFETY_REWARD;
                if herd == self.current_herd {
                    self.elephants_finished_in_herd += 1;
                }
                cues.push(AudioCue::ElephantSafe);
                None
            }
            GameEvent::ElephantIntercepted { herd, .. } => {
                self.lost_total += 1;
                self.elephants_lost_this_herd += 1;
                if herd == self.current_herd {
                    self.elephants_finished_in_herd += 1;
                }
                cues.push(AudioCue::VillagerIntercept);
                (self.elephants_lost_this_herd >= HERD_LOSS_THRESHOLD)
                    .then(|| self.lose(LossReason::Elephants, cues))
                    .flatten()
            }
            GameEvent::FarmDamaged { level, .. } => {
                cues.push(AudioCue::FarmDamaged);
                if level < FARM_MAX_DAMAGE {
                    return None;
                }
                self.damaged_farms_count += 1;
                (self.damaged_farms_count >= FARM_LOSS_THRESHOLD)
                    .then(|| self.lose(LossReason::Farms, cues))
                    .flatten()
            }
            _ => None,
        }
    }

    /// Run herd completion, level advance, and the end condition.
    /// `active_elephants` counts every elephant still on the field, abandoned ones included.
    pub fn evaluate(
        &mut self,
        levels: &LevelsConfig,
        active_elephants: usize,
        events: &mut Vec<GameEvent>,
        cues: &mut Vec<AudioCue>,
    ) -> Progression {
        if self.game_state != GameState::Playing {
            return Progression::Steady;
        }

        let mut progression = Progression::Steady;
        if !self.awaiting_final_resolution
            && self.herd_complete
            && self.elephants_finished_in_herd >= self.herd_size
        {
            progression = self.finish_herd(levels, events, cues);
        }

        if self.awaiting_final_resolution && active_elephants == 0 {
            self.finish_campaign(events, cues);
            return Progression::Ended;
        }
        progression
    }

    fn finish_herd(
        &mut self,
        levels: &LevelsConfig,
        events: &mut Vec<GameEvent>,
        cues: &mut Vec<AudioCue>,
    ) -> Progression {
        events.push(GameEvent::HerdFinished {
            level: self.current_level,
            herd: self.current_herd,
        });
        tracing::info!(
            level = self.level_number(),
            herd = self.current_herd + 1,
            saved = self.saved_total,
            lost = self.lost_total,
            "herd finished"
        );

        self.current_herd += 1;
        let herds = levels
            .level(self.current_level)
            .map_or(0, |level| level.herds.len() as u32);

        if self.current_herd < herds {
            self.start_herd(levels);
            return Progression::NextHerd;
        }

        if self.current_level + 1 < levels.level_count() {
            events.push(GameEvent::LevelCompleted {
                level: self.current_level,
            });
            cues.push(AudioCue::LevelEnd);
            self.current_level += 1;
            self.current_herd = 0;
            self.damaged_farms_count = 0;
            self.start_herd(levels);
            self.game_state = GameState::LevelTransition;
            tracing::info!(next_level = self.level_number(), "level complete");
            return Progression::NextLevel;
        }

        self.awaiting_final_resolution = true;
        Progression::Steady
    }

    fn finish_campaign(&mut self, events: &mut Vec<GameEvent>, cues: &mut Vec<AudioCue>) {
        // Only empty herds were played: no elephant was lost, so this is a win
        // rather than 0/0 falling below the threshold
        let rate = self.success_rate().unwrap_or(1.0);
        if rate >= WIN_SUCCESS_RATE {
            self.game_state = GameState::Won;
            cues.push(AudioCue::GameWon);
            events.push(GameEvent::CampaignWon { success_rate: rate });
            tracing::info!(success_rate = rate, "campaign won");
        } else if let Some(event) = self.lose(LossReason::LowSuccess, cues) {
            events.push(event);
        }
    }

    /// Enter `Lost`. No-op once the campaign is already over.
    fn lose(&mut self, reason: LossReason, cues: &mut Vec<AudioCue>) -> Option<GameEvent> {
        if self.game_state.is_terminal() {
            return None;
        }
        self.game_state = GameState::Lost;
        self.loss_reason = Some(reason);
        cues.push(AudioCue::GameLost);
        tracing::info!(?reason, saved = self.saved_total, lost = self.lost_total, "campaign lost");
        Some(GameEvent::CampaignLost { reason })
    }
}

/// Config for the campaign's current level, if the index is in range.
pub fn current_level_config<'a>(
    levels: &'a LevelsConfig,
    campaign: &CampaignState,
) -> Option<&'a LevelConfig> {
    levels.level(campaign.current_level)
}

fn herd_size(levels: &LevelsConfig, level: u32, herd: u32) -> u32 {
    levels
        .level(level)
        .and_then(|l| l.herds.get(herd as usize))
        .map_or(0, |h| h.elephants)
}
