//! Game state snapshot: the complete visible state handed to the
//! rendering/UI/audio collaborators after each tick.

use serde::{Deserialize, Serialize};

use crate::components::ElephantId;
use crate::enums::*;
use crate::events::{AudioCue, GameEvent};
use crate::types::{Position, SimTime, Velocity};

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub game_state: GameState,
    pub loss_reason: Option<LossReason>,
    pub paused: bool,
    pub hud: HudView,
    /// Present while in `LevelTransition`.
    pub transition: Option<TransitionView>,
    pub elephants: Vec<ElephantView>,
    pub farms: Vec<FarmView>,
    pub houses: Vec<Position>,
    pub villagers: Vec<VillagerView>,
    pub deterrents: Vec<DeterrentView>,
    pub deterrent_options: Vec<DeterrentOption>,
    pub selected_deterrent: Option<String>,
    pub audio_cues: Vec<AudioCue>,
    pub events: Vec<GameEvent>,
}

/// Scalar HUD fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub budget: u32,
    /// 1-based.
    pub level: u32,
    /// 1-based.
    pub herd: u32,
    pub herd_finished: u32,
    pub herd_size: u32,
    pub saved: u32,
    pub lost: u32,
    pub lost_this_herd: u32,
    pub damaged_farms: u32,
    /// Campaign success rate, rounded percent (0 before any outcome).
    pub success_rate_pct: u32,
    pub status: String,
}

/// Level-transition screen contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionView {
    /// 1-based.
    pub level: u32,
    pub name: String,
    pub farms: u32,
    pub houses: u32,
    pub herds: u32,
    /// Deterrent types first placeable in this level.
    pub unlocked: Vec<DeterrentOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElephantView {
    pub id: ElephantId,
    pub position: Position,
    pub velocity: Velocity,
    pub herd: u32,
    pub abandoned: bool,
    pub influence: SteeringInfluence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmView {
    pub position: Position,
    pub damage_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillagerView {
    pub position: Position,
    pub state: VillagerState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterrentView {
    pub kind: String,
    pub position: Position,
    pub range: f64,
    pub size: f64,
    pub blocking: bool,
    pub remaining_ms: i64,
    /// Under ten seconds left; renderers flash it.
    pub expiring: bool,
}

/// A deterrent type offered in the build menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterrentOption {
    pub kind: String,
    pub name: String,
    pub cost: u32,
    pub effectiveness: u8,
    pub duration_ms: u64,
    pub range: f64,
    pub blocking: bool,
    pub description: String,
    pub affordable: bool,
}
