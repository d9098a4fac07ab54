//! Entity spawn factories for setting up the simulation world.
//!
//! Creates farms, houses, elephants, villagers, and deterrents with
//! their component bundles, and lays out a level from its config.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use corridor_core::components::*;
use corridor_core::config::{DeterrentSpec, LevelConfig};
use corridor_core::constants::*;
use corridor_core::enums::{SteeringInfluence, VillagerState};
use corridor_core::types::{Position, Velocity};

use corridor_herd_ai::wander::next_walk_interval;

/// Lay out a level's farms, then its houses.
pub fn setup_level(world: &mut World, rng: &mut ChaCha8Rng, level: &LevelConfig) {
    let farms = layout_farms(rng, level.farms);
    for &position in &farms {
        spawn_farm(world, position);
    }
    for position in layout_houses(rng, level.houses, &farms) {
        spawn_house(world, position);
    }
}

/// Random farm positions at least `FARM_SPACING` apart. A farm that finds no
/// free spot within `LAYOUT_ATTEMPTS` draws is skipped.
pub fn layout_farms(rng: &mut ChaCha8Rng, count: u32) -> Vec<Position> {
    let mut placed: Vec<Position> = Vec::with_capacity(count as usize);
    for i in 0..count {
        let found = (0..LAYOUT_ATTEMPTS).find_map(|_| {
            let candidate = Position::new(
                rng.gen_range(FARM_X_MIN..=FARM_X_MAX),
                rng.gen_range(FARM_Y_MIN..=FARM_Y_MAX),
            );
            placed
                .iter()
                .all(|farm| farm.range_to(&candidate) >= FARM_SPACING)
                .then_some(candidate)
        });
        match found {
            Some(position) => placed.push(position),
            None => tracing::debug!(farm = i, "no room for farm, skipped"),
        }
    }
    placed
}

/// Random house positions away from other houses and from `farms`.
pub fn layout_houses(rng: &mut ChaCha8Rng, count: u32, farms: &[Position]) -> Vec<Position> {
    let mut placed: Vec<Position> = Vec::with_capacity(count as usize);
    for i in 0..count {
        let found = (0..LAYOUT_ATTEMPTS).find_map(|_| {
            let candidate = Position::new(
                rng.gen_range(HOUSE_MARGIN..=ARENA_WIDTH - HOUSE_MARGIN),
                rng.gen_range(HOUSE_MARGIN..=ARENA_HEIGHT - HOUSE_MARGIN),
            );
            let clear_of_houses = placed
                .iter()
                .all(|house| house.range_to(&candidate) >= HOUSE_SPACING);
            let clear_of_farms = farms
                .iter()
                .all(|farm| farm.range_to(&candidate) >= HOUSE_FARM_CLEARANCE);
            (clear_of_houses && clear_of_farms).then_some(candidate)
        });
        match found {
            Some(position) => placed.push(position),
            None => tracing::debug!(house = i, "no room for house, skipped"),
        }
    }
    placed
}

pub fn spawn_farm(world: &mut World, position: Position) -> Entity {
    world.spawn((Farm::default(), position))
}

pub fn spawn_house(world: &mut World, position: Position) -> Entity {
    world.spawn((House, position))
}

/// Spawn an elephant just off the spawn edge at a random height, walking
/// toward safety.
pub fn spawn_elephant(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    id: ElephantId,
    herd_id: u32,
    now_ms: u64,
) -> Entity {
    let position = Position::new(SPAWN_X, rng.gen_range(SPAWN_Y_MIN..=SPAWN_Y_MAX));
    let interval = next_walk_interval(rng);
    spawn_elephant_at(world, id, herd_id, position, ELEPHANT_SPEED, now_ms, interval)
}

/// Spawn an elephant with explicit placement and speed.
pub fn spawn_elephant_at(
    world: &mut World,
    id: ElephantId,
    herd_id: u32,
    position: Position,
    speed: f64,
    now_ms: u64,
    walk_interval_ms: u64,
) -> Entity {
    let agent = ElephantAgent {
        id,
        herd_id,
        speed,
        is_abandoned: false,
        spawn_time_ms: now_ms,
        walk_direction: (1.0, 0.0),
        walk_change_interval_ms: walk_interval_ms,
        walk_timer_ms: 0,
        active: true,
    };
    world.spawn((
        agent,
        position,
        Velocity::new(speed, 0.0),
        SteeringInfluence::default(),
    ))
}

/// Spawn a villager at its house, about to step out.
pub fn spawn_villager(world: &mut World, home: Position) -> Entity {
    world.spawn((
        VillagerAgent {
            state: VillagerState::Emerging,
            target: None,
            home,
            state_timer_ms: 0,
            active: true,
        },
        home,
        Velocity::default(),
    ))
}

/// Spawn an active deterrent of a catalog type.
pub fn spawn_deterrent(
    world: &mut World,
    kind: &str,
    spec: &DeterrentSpec,
    position: Position,
) -> Entity {
    world.spawn((
        Deterrent {
            kind: kind.to_string(),
            cost: spec.cost,
            effectiveness: spec.effectiveness,
            range: spec.range,
            size: spec.size,
            blocking: spec.blocking,
            duration_remaining_ms: i64::try_from(spec.duration_ms).unwrap_or(i64::MAX),
            active: true,
        },
        position,
    ))
}

/// Nearest house to `position`, if the level has any.
pub fn nearest_house(world: &World, position: Position) -> Option<Position> {
    world
        .query::<(&House, &Position)>()
        .iter()
        .map(|(_, (_, house))| *house)
        .min_by(|a, b| a.range_to(&position).total_cmp(&b.range_to(&position)))
}

/// Despawn every level entity: farms, houses, elephants, villagers, deterrents.
pub fn clear_level(world: &mut World) {
    let doomed: Vec<Entity> = world
        .iter()
        .filter(|entity| {
            entity.has::<Farm>()
                || entity.has::<House>()
                || entity.has::<ElephantAgent>()
                || entity.has::<VillagerAgent>()
                || entity.has::<Deterrent>()
        })
        .map(|entity| entity.entity())
        .collect();
    for entity in doomed {
        let _ = world.despawn(entity);
    }
}
