//! Cleanup system: the end-of-tick sweep that despawns inactive entities.

use hecs::{Entity, World};

use corridor_core::components::{Deterrent, ElephantAgent, VillagerAgent};

/// Despawn elephants, villagers, and deterrents whose active flag is cleared.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, agent) in world.query_mut::<&ElephantAgent>() {
        if !agent.active {
            despawn_buffer.push(entity);
        }
    }

    for (entity, villager) in world.query_mut::<&VillagerAgent>() {
        if !villager.active {
            despawn_buffer.push(entity);
        }
    }

    for (entity, deterrent) in world.query_mut::<&Deterrent>() {
        if !deterrent.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
