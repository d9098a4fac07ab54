//! Herd behavior for the corridor simulation.
//!
//! Steering forces, the random walk, and the villager interception state
//! machine. Everything here is plain math over plain data; the sim crate
//! gathers the inputs from its world and applies the outputs.

pub mod steering;
pub mod villager;
pub mod wander;

pub use corridor_core as core;

#[cfg(test)]
mod tests;
