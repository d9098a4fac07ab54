//! Elephant steering model.
//!
//! Pure functions that blend the random walk with deterrent avoidance, farm
//! attraction, herd flocking, and the age-based migration push into one
//! velocity. No ECS dependency: the caller supplies snapshots of the
//! surrounding entities.

use glam::DVec2;

use corridor_core::constants::*;
use corridor_core::enums::SteeringInfluence;
use corridor_core::types::{Position, Velocity};

/// An active deterrent as seen by a steering elephant.
#[derive(Debug, Clone, Copy)]
pub struct DeterrentInfluence {
    pub position: Position,
    pub range: f64,
    /// 0-100. Ignored for blocking deterrents, which always repel fully.
    pub effectiveness: u8,
    pub blocking: bool,
}

/// A farm as seen by a steering elephant.
#[derive(Debug, Clone, Copy)]
pub struct FarmLure {
    pub position: Position,
    pub damage_level: u8,
    /// This elephant already damaged the farm once.
    pub damaged_by_self: bool,
}

/// Another active, non-abandoned elephant, sampled at the start of the tick.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor {
    pub position: Position,
    pub velocity: Velocity,
}

/// Input to the steering model for a single elephant.
pub struct SteeringContext<'a> {
    pub position: Position,
    pub velocity: Velocity,
    /// Base speed (units/s).
    pub speed: f64,
    /// Time since spawn (ms).
    pub age_ms: u64,
    /// Current unit random-walk direction.
    pub walk_direction: DVec2,
    pub deterrents: &'a [DeterrentInfluence],
    pub farms: &'a [FarmLure],
    /// Every other elephant eligible for flocking; distance filtering is done here.
    pub neighbors: &'a [Neighbor],
}

/// The unweighted forces behind one steering result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringForces {
    pub random_walk: DVec2,
    pub deterrent: DVec2,
    pub farm: DVec2,
    pub herd: DVec2,
    pub migration: DVec2,
}

/// Output from the steering model.
#[derive(Debug, Clone, Copy)]
pub struct SteeringOutput {
    pub velocity: Velocity,
    pub forces: SteeringForces,
    pub influence: SteeringInfluence,
}

/// Compute the new velocity for one non-abandoned elephant.
pub fn steer(ctx: &SteeringContext) -> SteeringOutput {
    let forces = SteeringForces {
        random_walk: ctx.walk_direction * ctx.speed,
        deterrent: deterrent_avoidance(ctx.position, ctx.speed, ctx.deterrents),
        farm: farm_attraction(ctx.position, ctx.speed, ctx.farms),
        herd: herd_flocking(ctx.position, ctx.velocity, ctx.speed, ctx.neighbors),
        migration: migration_force(ctx.age_ms, ctx.speed),
    };

    let blended = forces.random_walk
        + forces.deterrent
        + forces.farm * FARM_BLEND_WEIGHT
        + forces.herd * HERD_BLEND_WEIGHT
        + forces.migration;
    let mut velocity = clamp_speed(blended, ctx.speed * MAX_SPEED_FACTOR);

    // Soft vertical bounds
    if ctx.position.y < ARENA_MARGIN_TOP {
        velocity.y = velocity.y.max(0.0);
    }
    if ctx.position.y > ARENA_MARGIN_BOTTOM {
        velocity.y = velocity.y.min(0.0);
    }

    SteeringOutput {
        velocity: velocity.into(),
        forces,
        influence: dominant_influence(&forces),
    }
}

/// Velocity of an abandoned elephant heading back to the spawn edge.
pub fn retreat_velocity(speed: f64) -> Velocity {
    Velocity::new(-speed * MAX_SPEED_FACTOR, 0.0)
}

/// Summed repulsion from every deterrent whose range covers `position`.
pub fn deterrent_avoidance(
    position: Position,
    speed: f64,
    deterrents: &[DeterrentInfluence],
) -> DVec2 {
    deterrents
        .iter()
        .filter(|d| position.range_to(&d.position) <= d.range)
        .map(|d| {
            let magnitude = if d.blocking {
                speed
            } else {
                f64::from(d.effectiveness) / 100.0 * speed * AREA_REPULSION_FACTOR
            };
            d.position.direction_to(&position) * magnitude
        })
        .sum()
}

/// Pull toward nearby farms that are still worth trampling.
pub fn farm_attraction(position: Position, speed: f64, farms: &[FarmLure]) -> DVec2 {
    farms
        .iter()
        .filter(|f| f.damage_level < FARM_MAX_DAMAGE && !f.damaged_by_self)
        .filter_map(|f| {
            let distance = position.range_to(&f.position);
            (distance < FARM_ATTRACTION_RADIUS).then(|| {
                let magnitude =
                    speed * FARM_ATTRACTION_FACTOR / distance.max(FARM_ATTRACTION_MIN_DISTANCE);
                position.direction_to(&f.position) * magnitude
            })
        })
        .sum()
}

/// Cohesion, separation, and alignment over neighbors within the herd radius.
pub fn herd_flocking(
    position: Position,
    velocity: Velocity,
    speed: f64,
    neighbors: &[Neighbor],
) -> DVec2 {
    let mut position_sum = DVec2::ZERO;
    let mut velocity_sum = DVec2::ZERO;
    let mut separation = DVec2::ZERO;
    let mut count = 0usize;

    for other in neighbors {
        let distance = position.range_to(&other.position);
        if distance >= HERD_RADIUS {
            continue;
        }
        count += 1;
        position_sum += other.position.as_dvec2();
        velocity_sum += other.velocity.as_dvec2();

        if distance < HERD_SEPARATION_RADIUS {
            let push = (HERD_SEPARATION_RADIUS - distance) / HERD_SEPARATION_RADIUS;
            separation += other.position.direction_to(&position) * push * speed * HERD_SEPARATION_FACTOR;
        }
    }

    if count == 0 {
        return DVec2::ZERO;
    }

    let n = count as f64;
    let cohesion = (position_sum / n - position.as_dvec2()) * HERD_COHESION_GAIN;
    let alignment = (velocity_sum / n - velocity.as_dvec2()) * HERD_ALIGNMENT_GAIN;
    cohesion + separation + alignment
}

/// Rightward push that grows with age so no elephant lingers forever.
pub fn migration_force(age_ms: u64, speed: f64) -> DVec2 {
    if age_ms < MIGRATION_ONSET_MS {
        return DVec2::ZERO;
    }
    let steps = (age_ms - MIGRATION_ONSET_MS) / MIGRATION_STEP_MS;
    let magnitude = MIGRATION_BASE_FORCE + steps as f64 * MIGRATION_FORCE_INCREMENT;
    DVec2::new(magnitude.min(speed * MAX_SPEED_FACTOR), 0.0)
}

/// Highest-priority force whose magnitude exceeds the influence threshold.
pub fn dominant_influence(forces: &SteeringForces) -> SteeringInfluence {
    [
        (forces.deterrent, SteeringInfluence::DeterrentAvoidance),
        (forces.migration, SteeringInfluence::Migration),
        (forces.farm, SteeringInfluence::FarmAttraction),
        (forces.herd, SteeringInfluence::Herd),
    ]
    .into_iter()
    .find(|(force, _)| force.length() > INFLUENCE_THRESHOLD)
    .map_or(SteeringInfluence::RandomWalk, |(_, influence)| influence)
}

fn clamp_speed(v: DVec2, max_speed: f64) -> DVec2 {
    let speed = v.length();
    if speed > max_speed {
        v * (max_speed / speed)
    } else {
        v
    }
}
