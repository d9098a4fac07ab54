//! Villager system: runs the interception FSM for every villager.
//!
//! Targets are elephant ids resolved against the live elephant set each
//! tick. A confrontation abandons the elephant immediately, so a second
//! villager chasing the same elephant in the same tick gives up on it.

use std::collections::BTreeMap;

use hecs::World;

use corridor_core::components::{ElephantAgent, ElephantId, VillagerAgent};
use corridor_core::enums::SteeringInfluence;
use corridor_core::events::GameEvent;
use corridor_core::types::{Position, Velocity};

use corridor_herd_ai::steering::retreat_velocity;
use corridor_herd_ai::villager::{evaluate, Quarry, VillagerContext};

pub fn run(world: &mut World, dt_ms: u64, events: &mut Vec<GameEvent>) {
    // Chaseable elephants: active and not abandoned, keyed (and so ordered) by id
    let mut quarry: BTreeMap<ElephantId, Position> = world
        .query::<(&ElephantAgent, &Position)>()
        .iter()
        .filter(|(_, (agent, _))| agent.active && !agent.is_abandoned)
        .map(|(_, (agent, position))| (agent.id, *position))
        .collect();

    let mut confronted: Vec<ElephantId> = Vec::new();

    for (_entity, (villager, position, velocity)) in
        world.query_mut::<(&mut VillagerAgent, &Position, &mut Velocity)>()
    {
        if !villager.active {
            continue;
        }
        villager.state_timer_ms += dt_ms;

        let candidates: Vec<Quarry> = quarry
            .iter()
            .map(|(&id, &position)| Quarry { id, position })
            .collect();
        let target = villager
            .target
            .and_then(|id| quarry.get(&id).map(|&position| Quarry { id, position }));

        let update = evaluate(&VillagerContext {
            state: villager.state,
            position: *position,
            home: villager.home,
            state_timer_ms: villager.state_timer_ms,
            target,
            candidates: &candidates,
        });

        *velocity = update.velocity;
        villager.target = update.target;
        if update.phase_changed {
            tracing::debug!(from = ?villager.state, to = ?update.new_state, "villager state change");
            villager.state = update.new_state;
            villager.state_timer_ms = 0;
        }
        if let Some(id) = update.confront {
            quarry.remove(&id);
            confronted.push(id);
        }
        if update.despawn {
            villager.active = false;
            *velocity = Velocity::default();
        }
    }

    if confronted.is_empty() {
        return;
    }
    let mut herds = BTreeMap::new();
    for (_entity, (agent, velocity, influence)) in
        world.query_mut::<(&mut ElephantAgent, &mut Velocity, &mut SteeringInfluence)>()
    {
        if confronted.contains(&agent.id) {
            agent.is_abandoned = true;
            *velocity = retreat_velocity(agent.speed);
            *influence = SteeringInfluence::Retreat;
            herds.insert(agent.id, agent.herd_id);
        }
    }
    // Report in confrontation order
    for id in confronted {
        if let Some(&herd) = herds.get(&id) {
            tracing::debug!(elephant = id.0, herd, "elephant intercepted");
            events.push(GameEvent::ElephantIntercepted { elephant: id, herd });
        }
    }
}
