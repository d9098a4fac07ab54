//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They report what happened as `GameEvent`s and leave counters and state
//! transitions to the campaign.

pub mod boundary;
pub mod cleanup;
pub mod deterrents;
pub mod farm_damage;
pub mod herd_spawner;
pub mod movement;
pub mod snapshot;
pub mod steering;
pub mod villagers;
