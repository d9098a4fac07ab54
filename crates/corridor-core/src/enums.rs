//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level campaign state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Between levels, waiting for the continue signal.
    #[default]
    LevelTransition,
    Playing,
    Won,
    Lost,
}

impl GameState {
    /// Won and Lost are terminal: nothing ticks afterwards.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

/// Why the campaign was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossReason {
    /// Too many farms fully damaged in one level.
    Farms,
    /// Too many elephants intercepted in one herd.
    Elephants,
    /// Final success rate under the win threshold.
    LowSuccess,
}

/// Villager behavior phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VillagerState {
    /// Stepping out of the house; not moving yet.
    #[default]
    Emerging,
    /// Pursuing the target elephant.
    Chasing,
    /// Walking back to the house.
    Returning,
}

/// The steering force that dominated an elephant's last update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringInfluence {
    #[default]
    RandomWalk,
    DeterrentAvoidance,
    Migration,
    FarmAttraction,
    Herd,
    /// Abandoned and retreating to the spawn edge.
    Retreat,
}
