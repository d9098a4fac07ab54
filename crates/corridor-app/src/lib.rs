//! Elephant corridor runner.
//!
//! Drives the simulation engine either on a fixed-rate game loop thread fed
//! by a command channel, or headless as fast as possible.

pub mod game_loop;
pub mod headless;
pub mod session;
pub mod state;

pub use corridor_core as core;
