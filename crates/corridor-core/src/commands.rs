//! Player commands sent from the front end to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerCommand {
    /// Leave the level-transition screen and start the level.
    Continue,
    /// Select a deterrent type for pointer placement.
    SelectDeterrent { kind: String },
    /// Drop the current selection.
    ClearSelection,
    /// Pointer press in arena coordinates; places the selected deterrent.
    Click { x: f64, y: f64 },
    /// Place a deterrent of an explicit type, bypassing the selection.
    PlaceDeterrent { kind: String, x: f64, y: f64 },
    /// Set time scale for the real-time runner (1.0 = normal).
    SetTimeScale { scale: f64 },
    Pause,
    Resume,
}
