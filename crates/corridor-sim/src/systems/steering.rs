//! Steering system: runs the herd-ai steering model for every elephant.
//!
//! Deterrents, farms, and herd-mates are sampled once before any elephant is
//! updated, so flocking reads start-of-tick state and the result does not
//! depend on iteration order. Elephants are updated in id order, which fixes
//! the order of random-walk draws.

use std::collections::BTreeSet;

use hecs::World;
use rand_chacha::ChaCha8Rng;

use corridor_core::components::{Deterrent, ElephantAgent, ElephantId, Farm};
use corridor_core::enums::SteeringInfluence;
use corridor_core::types::{Position, Velocity};

use corridor_herd_ai::steering::{
    retreat_velocity, steer, DeterrentInfluence, FarmLure, Neighbor, SteeringContext,
};
use corridor_herd_ai::wander::{advance_walk, walk_vector};

struct FarmSample {
    position: Position,
    damage_level: u8,
    damaged_by: BTreeSet<ElephantId>,
}

pub fn run(world: &mut World, rng: &mut ChaCha8Rng, now_ms: u64, dt_ms: u64) {
    let deterrents: Vec<DeterrentInfluence> = world
        .query::<(&Deterrent, &Position)>()
        .iter()
        .filter(|(_, (d, _))| d.active)
        .map(|(_, (d, position))| DeterrentInfluence {
            position: *position,
            range: d.range,
            effectiveness: d.effectiveness,
            blocking: d.blocking,
        })
        .collect();

    let farms: Vec<FarmSample> = world
        .query::<(&Farm, &Position)>()
        .iter()
        .map(|(_, (farm, position))| FarmSample {
            position: *position,
            damage_level: farm.damage_level,
            damaged_by: farm.damaged_by.clone(),
        })
        .collect();

    let herd: Vec<(ElephantId, Neighbor)> = world
        .query::<(&ElephantAgent, &Position, &Velocity)>()
        .iter()
        .filter(|(_, (agent, _, _))| agent.active && !agent.is_abandoned)
        .map(|(_, (agent, position, velocity))| {
            (
                agent.id,
                Neighbor {
                    position: *position,
                    velocity: *velocity,
                },
            )
        })
        .collect();

    let mut elephants: Vec<_> = world
        .query_mut::<(&mut ElephantAgent, &Position, &mut Velocity, &mut SteeringInfluence)>()
        .into_iter()
        .map(|(_, components)| components)
        .filter(|(agent, _, _, _)| agent.active)
        .collect();
    elephants.sort_by_key(|(agent, _, _, _)| agent.id);

    let mut neighbors = Vec::with_capacity(herd.len());
    let mut lures = Vec::with_capacity(farms.len());

    for (agent, position, velocity, influence) in elephants {
        if agent.is_abandoned {
            *velocity = retreat_velocity(agent.speed);
            *influence = SteeringInfluence::Retreat;
            continue;
        }

        advance_walk(agent, dt_ms, rng);

        neighbors.clear();
        neighbors.extend(
            herd.iter()
                .filter(|(id, _)| *id != agent.id)
                .map(|(_, neighbor)| *neighbor),
        );
        lures.clear();
        lures.extend(farms.iter().map(|farm| FarmLure {
            position: farm.position,
            damage_level: farm.damage_level,
            damaged_by_self: farm.damaged_by.contains(&agent.id),
        }));

        let output = steer(&SteeringContext {
            position: *position,
            velocity: *velocity,
            speed: agent.speed,
            age_ms: now_ms.saturating_sub(agent.spawn_time_ms),
            walk_direction: walk_vector(agent),
            deterrents: &deterrents,
            farms: &lures,
            neighbors: &neighbors,
        });
        *velocity = output.velocity;
        *influence = output.influence;
    }
}
