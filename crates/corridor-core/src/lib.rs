//! Core types and definitions for the corridor migration simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, commands, snapshots, events, configuration
//! schemas and constants. It has no dependency on the ECS or any runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
