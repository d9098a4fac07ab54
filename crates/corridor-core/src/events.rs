//! Events emitted by the simulation for audio and UI feedback, and the
//! gameplay event log the campaign state machine consumes.

use serde::{Deserialize, Serialize};

use crate::components::ElephantId;
use crate::enums::LossReason;
use crate::types::Position;

/// Fire-and-forget cues for the audio/UI collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AudioCue {
    GameStart,
    LevelStart,
    LevelEnd,
    DeterrentPicked,
    DeterrentPlaced,
    FarmDamaged,
    VillagerIntercept,
    ElephantSafe,
    GameWon,
    GameLost,
}

/// Gameplay events raised by systems during a tick.
///
/// Systems only report what happened; counters, budget and state
/// transitions are applied when the engine resolves these into the campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    ElephantSpawned { elephant: ElephantId, herd: u32 },
    /// Crossed the safety boundary. Raised once per elephant.
    ReachedSafety { elephant: ElephantId, herd: u32 },
    /// Confronted by a villager and turned back.
    ElephantIntercepted { elephant: ElephantId, herd: u32 },
    /// An abandoned elephant left through the spawn edge.
    AbandonedExited { elephant: ElephantId },
    /// A farm reached a new damage level.
    FarmDamaged {
        position: Position,
        level: u8,
        elephant: ElephantId,
    },
    VillagerSpawned { home: Position },
    DeterrentPlaced {
        kind: String,
        position: Position,
        cost: u32,
    },
    DeterrentExpired { kind: String, position: Position },
    HerdFinished { level: u32, herd: u32 },
    LevelStarted { level: u32 },
    LevelCompleted { level: u32 },
    CampaignWon { success_rate: f64 },
    CampaignLost { reason: LossReason },
}
