//! Simulation engine for the corridor migration game.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the front end.

pub mod campaign;
pub mod contact;
pub mod engine;
pub mod placement;
pub mod systems;
pub mod world_setup;

pub use corridor_core as core;
pub use engine::{SimConfig, SimulationEngine};
