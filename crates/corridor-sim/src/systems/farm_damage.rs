//! Farm damage tracker.
//!
//! Each tick the contact resolver reports which elephants stand on which
//! farms. Pairs are deduplicated and processed in ascending elephant id, so
//! repeated reports within one tick are harmless. Every eligible pair adds
//! the tick's elapsed time to the farm's dwell timer; crossing the dwell
//! threshold damages the farm once per elephant. Farms without an eligible
//! elephant on them lose their accumulated dwell time.

use std::collections::{BTreeSet, HashMap};

use hecs::{Entity, World};

use corridor_core::components::{ElephantAgent, ElephantId, Farm};
use corridor_core::constants::{FARM_CONTACT_RADIUS, FARM_DAMAGE_DWELL_MS, FARM_MAX_DAMAGE};
use corridor_core::events::GameEvent;
use corridor_core::types::Position;

use crate::contact::{Body, ContactResolver};
use crate::world_setup;

pub fn run(
    world: &mut World,
    contacts: &dyn ContactResolver,
    dt_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    // Abandoned elephants never damage farms
    let mut ids: HashMap<Entity, ElephantId> = HashMap::new();
    let agents: Vec<Body> = world
        .query::<(&ElephantAgent, &Position)>()
        .iter()
        .filter(|(_, (agent, _))| agent.active && !agent.is_abandoned)
        .map(|(entity, (agent, position))| {
            ids.insert(entity, agent.id);
            Body {
                entity,
                position: *position,
                radius: 0.0,
            }
        })
        .collect();
    let zones: Vec<Body> = world
        .query::<(&Farm, &Position)>()
        .iter()
        .map(|(entity, (_, position))| Body {
            entity,
            position: *position,
            radius: FARM_CONTACT_RADIUS,
        })
        .collect();

    let pairs: BTreeSet<(ElephantId, Entity)> = contacts
        .overlaps(&agents, &zones)
        .into_iter()
        .filter_map(|(elephant, farm)| ids.get(&elephant).map(|&id| (id, farm)))
        .collect();

    let mut touched: BTreeSet<Entity> = BTreeSet::new();
    let mut destroyed: Vec<Position> = Vec::new();

    for (id, farm_entity) in pairs {
        let Ok((farm, position)) = world.query_one_mut::<(&mut Farm, &Position)>(farm_entity)
        else {
            continue;
        };
        if farm.damage_level >= FARM_MAX_DAMAGE || farm.damaged_by.contains(&id) {
            continue;
        }
        touched.insert(farm_entity);
        farm.damage_timer_ms += dt_ms;
        if farm.damage_timer_ms <= FARM_DAMAGE_DWELL_MS {
            continue;
        }

        farm.damaged_by.insert(id);
        farm.damage_timer_ms = 0;
        farm.damage_level += 1;
        tracing::debug!(elephant = id.0, level = farm.damage_level, "farm damaged");
        events.push(GameEvent::FarmDamaged {
            position: *position,
            level: farm.damage_level,
            elephant: id,
        });
        if farm.damage_level >= FARM_MAX_DAMAGE {
            destroyed.push(*position);
        }
    }

    // No cross-gap memory
    for (entity, farm) in world.query_mut::<&mut Farm>() {
        if farm.damage_level < FARM_MAX_DAMAGE && !touched.contains(&entity) {
            farm.damage_timer_ms = 0;
        }
    }

    for farm_position in destroyed {
        match world_setup::nearest_house(world, farm_position) {
            Some(home) => {
                world_setup::spawn_villager(world, home);
                tracing::debug!(x = home.x, y = home.y, "villager dispatched");
                events.push(GameEvent::VillagerSpawned { home });
            }
            None => tracing::debug!("farm destroyed but the level has no houses"),
        }
    }
}
