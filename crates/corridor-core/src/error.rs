//! Error types for configuration loading and deterrent placement.
//!
//! Neither is fatal to the tick loop: configuration errors fall back to
//! built-in defaults, placement errors are rejected no-ops.

use std::path::PathBuf;

use thiserror::Error;

/// A level or deterrent configuration could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Why a deterrent placement was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("unknown deterrent type `{0}`")]
    UnknownType(String),
    #[error("deterrent `{kind}` unlocks at level {unlock_level}")]
    Locked { kind: String, unlock_level: u32 },
    #[error("deterrent costs {cost} but budget is {budget}")]
    InsufficientBudget { cost: u32, budget: u32 },
    #[error("too close to a building ({distance:.1} < {clearance})")]
    TooCloseToBuilding { distance: f64, clearance: f64 },
    #[error("deterrents can only be placed while a level is playing")]
    NotPlaying,
    #[error("no deterrent selected")]
    NothingSelected,
}
