//! Boundary checks: elephants past the safety line are saved, abandoned
//! elephants past the spawn edge leave. Either way the elephant is
//! deactivated, so each crossing is reported exactly once.

use hecs::World;

use corridor_core::components::ElephantAgent;
use corridor_core::constants::{RETREAT_EXIT_X, SAFETY_X};
use corridor_core::events::GameEvent;
use corridor_core::types::Position;

pub fn run(world: &mut World, events: &mut Vec<GameEvent>) {
    let mut crossings = Vec::new();
    for (_entity, (agent, position)) in world.query_mut::<(&mut ElephantAgent, &Position)>() {
        if !agent.active {
            continue;
        }
        if agent.is_abandoned {
            if position.x < RETREAT_EXIT_X {
                agent.active = false;
                crossings.push((
                    agent.id,
                    GameEvent::AbandonedExited { elephant: agent.id },
                ));
            }
        } else if position.x > SAFETY_X {
            agent.active = false;
            tracing::debug!(elephant = agent.id.0, herd = agent.herd_id, "elephant reached safety");
            crossings.push((
                agent.id,
                GameEvent::ReachedSafety {
                    elephant: agent.id,
                    herd: agent.herd_id,
                },
            ));
        }
    }
    crossings.sort_by_key(|(id, _)| *id);
    events.extend(crossings.into_iter().map(|(_, event)| event));
}
