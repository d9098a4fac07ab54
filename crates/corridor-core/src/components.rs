//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Behavior lives in `corridor-herd-ai` and in the sim systems.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::VillagerState;
use crate::types::Position;

/// Stable elephant identity, assigned in spawn order.
/// Ordering by id is the deterministic agent ordering used for tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElephantId(pub u32);

/// A migrating elephant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElephantAgent {
    pub id: ElephantId,
    /// Herd index within the level at spawn time.
    pub herd_id: u32,
    /// Base speed (units/s).
    pub speed: f64,
    /// Intercepted by a villager and retreating.
    pub is_abandoned: bool,
    /// Simulation time at spawn (ms).
    pub spawn_time_ms: u64,
    /// Unit random-walk direction (x, y).
    pub walk_direction: (f64, f64),
    /// How long the current walk direction is held (ms).
    pub walk_change_interval_ms: u64,
    /// Time spent on the current walk direction (ms).
    pub walk_timer_ms: u64,
    /// Cleared when the elephant leaves play; despawned at end of tick.
    pub active: bool,
}

/// A placed deterrent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deterrent {
    /// Catalog key.
    pub kind: String,
    pub cost: u32,
    /// 0-100.
    pub effectiveness: u8,
    pub range: f64,
    pub size: f64,
    pub blocking: bool,
    pub duration_remaining_ms: i64,
    pub active: bool,
}

/// A farm that elephants are drawn to and can trample.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Farm {
    /// 0 = intact, 1 = half damaged, 2 = destroyed.
    pub damage_level: u8,
    /// Continuous contact time accumulated toward the next damage level (ms).
    pub damage_timer_ms: u64,
    /// Elephants that already damaged this farm.
    pub damaged_by: BTreeSet<ElephantId>,
}

/// A house; villagers emerge from the one nearest a destroyed farm.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct House;

/// A villager responding to a destroyed farm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VillagerAgent {
    pub state: VillagerState,
    /// Elephant being chased, looked up by id every tick.
    pub target: Option<ElephantId>,
    pub home: Position,
    /// Time spent in the current state (ms).
    pub state_timer_ms: u64,
    pub active: bool,
}
