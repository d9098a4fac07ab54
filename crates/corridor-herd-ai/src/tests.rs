use std::f64::consts::TAU;

use glam::DVec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use corridor_core::components::{ElephantAgent, ElephantId};
use corridor_core::constants::*;
use corridor_core::enums::{SteeringInfluence, VillagerState};
use corridor_core::types::{Position, Velocity};

use crate::steering::*;
use crate::villager::{evaluate, select_target, Quarry, VillagerContext};
use crate::wander::{advance_walk, choose_walk_direction, next_walk_interval};

fn quiet_context(position: Position) -> SteeringContext<'static> {
    SteeringContext {
        position,
        velocity: Velocity::new(ELEPHANT_SPEED, 0.0),
        speed: ELEPHANT_SPEED,
        age_ms: 0,
        walk_direction: DVec2::X,
        deterrents: &[],
        farms: &[],
        neighbors: &[],
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---- Steering ----

#[test]
fn test_pure_random_walk() {
    let out = steer(&quiet_context(Position::new(300.0, 300.0)));
    assert!(approx(out.velocity.x, ELEPHANT_SPEED));
    assert!(approx(out.velocity.y, 0.0));
    assert_eq!(out.influence, SteeringInfluence::RandomWalk);
}

#[test]
fn test_blocking_deterrent_repels_at_full_speed() {
    let me = Position::new(300.0, 300.0);
    let fence = [DeterrentInfluence {
        position: Position::new(270.0, 300.0),
        range: 60.0,
        effectiveness: 10,
        blocking: true,
    }];
    let force = deterrent_avoidance(me, ELEPHANT_SPEED, &fence);
    assert!(approx(force.x, ELEPHANT_SPEED), "blocking ignores effectiveness");
    assert!(approx(force.y, 0.0));
}

#[test]
fn test_area_deterrent_scales_with_effectiveness() {
    let me = Position::new(0.0, 0.0);
    let hive = [DeterrentInfluence {
        position: Position::new(0.0, 50.0),
        range: 50.0,
        effectiveness: 50,
        blocking: false,
    }];
    // Exactly at range still counts
    let force = deterrent_avoidance(me, ELEPHANT_SPEED, &hive);
    assert!(approx(force.y, -0.5 * ELEPHANT_SPEED * AREA_REPULSION_FACTOR));

    let far = [DeterrentInfluence { range: 49.9, ..hive[0] }];
    assert_eq!(deterrent_avoidance(me, ELEPHANT_SPEED, &far), DVec2::ZERO);
}

#[test]
fn test_deterrent_contributions_sum() {
    let me = Position::new(100.0, 100.0);
    let bush = DeterrentInfluence {
        position: Position::new(80.0, 100.0),
        range: 50.0,
        effectiveness: 100,
        blocking: false,
    };
    let one = deterrent_avoidance(me, ELEPHANT_SPEED, &[bush]);
    let two = deterrent_avoidance(me, ELEPHANT_SPEED, &[bush, bush]);
    assert!(approx(two.x, one.x * 2.0));
}

#[test]
fn test_farm_attraction_falloff() {
    let me = Position::new(0.0, 0.0);
    let lure = |x: f64| FarmLure {
        position: Position::new(x, 0.0),
        damage_level: 0,
        damaged_by_self: false,
    };
    // Distance floor of 20
    let close = farm_attraction(me, ELEPHANT_SPEED, &[lure(10.0)]);
    assert!(approx(close.x, ELEPHANT_SPEED * 0.5 / 20.0));
    let mid = farm_attraction(me, ELEPHANT_SPEED, &[lure(100.0)]);
    assert!(approx(mid.x, ELEPHANT_SPEED * 0.5 / 100.0));
    assert_eq!(farm_attraction(me, ELEPHANT_SPEED, &[lure(120.0)]), DVec2::ZERO);
}

#[test]
fn test_farm_attraction_skips_spent_farms() {
    let me = Position::new(0.0, 0.0);
    let destroyed = FarmLure {
        position: Position::new(50.0, 0.0),
        damage_level: FARM_MAX_DAMAGE,
        damaged_by_self: false,
    };
    let already_hit = FarmLure {
        position: Position::new(50.0, 0.0),
        damage_level: 1,
        damaged_by_self: true,
    };
    assert_eq!(
        farm_attraction(me, ELEPHANT_SPEED, &[destroyed, already_hit]),
        DVec2::ZERO
    );
}

#[test]
fn test_herd_cohesion_and_separation_balance() {
    // At 20 units cohesion (0.1 * 20) equals separation ((40-20)/40 * 0.2 * 20)
    let me = Position::new(200.0, 200.0);
    let v = Velocity::new(ELEPHANT_SPEED, 0.0);
    let mate = [Neighbor {
        position: Position::new(220.0, 200.0),
        velocity: v,
    }];
    let force = herd_flocking(me, v, ELEPHANT_SPEED, &mate);
    assert!(force.length() < 1e-9, "got {force:?}");
}

#[test]
fn test_herd_ignores_distant_neighbors() {
    let me = Position::new(200.0, 200.0);
    let v = Velocity::new(ELEPHANT_SPEED, 0.0);
    let far = [Neighbor {
        position: Position::new(300.0, 200.0),
        velocity: Velocity::new(0.0, 40.0),
    }];
    assert_eq!(herd_flocking(me, v, ELEPHANT_SPEED, &far), DVec2::ZERO);
}

#[test]
fn test_herd_alignment() {
    let me = Position::new(200.0, 200.0);
    let mate = [Neighbor {
        position: Position::new(260.0, 200.0),
        velocity: Velocity::new(0.0, 10.0),
    }];
    let force = herd_flocking(me, Velocity::new(0.0, 0.0), ELEPHANT_SPEED, &mate);
    // Cohesion 6 along x, alignment 1 along y, no separation at 60 units
    assert!(approx(force.x, 6.0));
    assert!(approx(force.y, 1.0));
}

#[test]
fn test_migration_schedule() {
    assert_eq!(migration_force(29_999, ELEPHANT_SPEED), DVec2::ZERO);
    assert!(approx(migration_force(30_000, ELEPHANT_SPEED).x, 5.0));
    assert!(approx(migration_force(44_999, ELEPHANT_SPEED).x, 5.0));
    assert!(approx(migration_force(45_000, ELEPHANT_SPEED).x, 8.0));
    assert!(approx(migration_force(75_000, ELEPHANT_SPEED).x, 14.0));
    assert!(approx(
        migration_force(3_600_000, ELEPHANT_SPEED).x,
        ELEPHANT_SPEED * MAX_SPEED_FACTOR
    ));
    assert_eq!(migration_force(3_600_000, ELEPHANT_SPEED).y, 0.0);
}

#[test]
fn test_speed_clamped() {
    let me = Position::new(300.0, 300.0);
    let fence = DeterrentInfluence {
        position: Position::new(290.0, 300.0),
        range: 100.0,
        effectiveness: 100,
        blocking: true,
    };
    let fences = [fence; 5];
    let ctx = SteeringContext {
        deterrents: &fences,
        ..quiet_context(me)
    };
    let out = steer(&ctx);
    assert!(approx(out.velocity.speed(), ELEPHANT_SPEED * MAX_SPEED_FACTOR));
    assert_eq!(out.influence, SteeringInfluence::DeterrentAvoidance);
    assert!(approx(out.forces.deterrent.x, 5.0 * ELEPHANT_SPEED), "breakdown is unclamped");
}

#[test]
fn test_vertical_bounds() {
    let top = SteeringContext {
        walk_direction: DVec2::NEG_Y,
        ..quiet_context(Position::new(300.0, 40.0))
    };
    assert_eq!(steer(&top).velocity.y, 0.0);

    let bottom = SteeringContext {
        walk_direction: DVec2::Y,
        ..quiet_context(Position::new(300.0, 560.0))
    };
    assert_eq!(steer(&bottom).velocity.y, 0.0);

    let inside = SteeringContext {
        walk_direction: DVec2::Y,
        ..quiet_context(Position::new(300.0, 300.0))
    };
    assert!(steer(&inside).velocity.y > 0.0);
}

#[test]
fn test_influence_priority() {
    let forces = SteeringForces {
        random_walk: DVec2::X * 20.0,
        deterrent: DVec2::ZERO,
        farm: DVec2::X * 3.0,
        herd: DVec2::X * 3.0,
        migration: DVec2::X * 5.0,
    };
    assert_eq!(dominant_influence(&forces), SteeringInfluence::Migration);

    let weak = SteeringForces {
        deterrent: DVec2::X * 0.5,
        migration: DVec2::ZERO,
        ..forces
    };
    assert_eq!(dominant_influence(&weak), SteeringInfluence::FarmAttraction);
}

#[test]
fn test_retreat_velocity() {
    let v = retreat_velocity(ELEPHANT_SPEED);
    assert_eq!(v, Velocity::new(-40.0, 0.0));
}

proptest! {
    #[test]
    fn prop_blended_speed_within_bound(
        x in -50.0..1300.0f64,
        y in 0.0..600.0f64,
        heading in 0.0..TAU,
        age_ms in 0u64..600_000,
        deterrents in prop::collection::vec(
            (-50.0..1300.0f64, 0.0..600.0f64, 10.0..300.0f64, 0u8..=100, any::<bool>()),
            0..10,
        ),
        farms in prop::collection::vec((0.0..1200.0f64, 0.0..600.0f64, 0u8..=2, any::<bool>()), 0..6),
        neighbors in prop::collection::vec(
            (-50.0..1300.0f64, 0.0..600.0f64, -40.0..40.0f64, -40.0..40.0f64),
            0..12,
        ),
    ) {
        let deterrents: Vec<_> = deterrents
            .into_iter()
            .map(|(dx, dy, range, effectiveness, blocking)| DeterrentInfluence {
                position: Position::new(dx, dy),
                range,
                effectiveness,
                blocking,
            })
            .collect();
        let farms: Vec<_> = farms
            .into_iter()
            .map(|(fx, fy, damage_level, damaged_by_self)| FarmLure {
                position: Position::new(fx, fy),
                damage_level,
                damaged_by_self,
            })
            .collect();
        let neighbors: Vec<_> = neighbors
            .into_iter()
            .map(|(nx, ny, vx, vy)| Neighbor {
                position: Position::new(nx, ny),
                velocity: Velocity::new(vx, vy),
            })
            .collect();
        let ctx = SteeringContext {
            position: Position::new(x, y),
            velocity: Velocity::new(ELEPHANT_SPEED, 0.0),
            speed: ELEPHANT_SPEED,
            age_ms,
            walk_direction: DVec2::new(heading.cos(), heading.sin()),
            deterrents: &deterrents,
            farms: &farms,
            neighbors: &neighbors,
        };
        let out = steer(&ctx);
        prop_assert!(out.velocity.speed() <= ELEPHANT_SPEED * MAX_SPEED_FACTOR + 1e-9);
    }
}

// ---- Random walk ----

fn walker() -> ElephantAgent {
    ElephantAgent {
        id: ElephantId(1),
        herd_id: 0,
        speed: ELEPHANT_SPEED,
        is_abandoned: false,
        spawn_time_ms: 0,
        walk_direction: (1.0, 0.0),
        walk_change_interval_ms: 1000,
        walk_timer_ms: 0,
        active: true,
    }
}

#[test]
fn test_walk_direction_is_unit() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..200 {
        let dir = choose_walk_direction(&mut rng);
        assert!((dir.length() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_walk_interval_in_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..200 {
        let interval = next_walk_interval(&mut rng);
        assert!((WALK_INTERVAL_MIN_MS..=WALK_INTERVAL_MAX_MS).contains(&interval));
    }
}

#[test]
fn test_walk_holds_until_interval() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut agent = walker();
    // 62 ticks = 992 ms, still holding
    for _ in 0..62 {
        assert!(!advance_walk(&mut agent, TICK_MS, &mut rng));
    }
    assert_eq!(agent.walk_direction, (1.0, 0.0));
    assert!(advance_walk(&mut agent, TICK_MS, &mut rng));
    assert_eq!(agent.walk_timer_ms, 0);
    assert!(agent.walk_change_interval_ms >= WALK_INTERVAL_MIN_MS);
}

#[test]
fn test_walk_biased_toward_target() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mean_x: f64 = (0..5000)
        .map(|_| choose_walk_direction(&mut rng).x)
        .sum::<f64>()
        / 5000.0;
    // 0.3 * E[cos] over ±45° ≈ 0.27; uniform part averages to zero
    assert!(mean_x > 0.15, "mean x = {mean_x}");
}

// ---- Villagers ----

fn villager_ctx<'a>(
    state: VillagerState,
    timer: u64,
    target: Option<Quarry>,
    candidates: &'a [Quarry],
) -> VillagerContext<'a> {
    VillagerContext {
        state,
        position: Position::new(500.0, 300.0),
        home: Position::new(500.0, 300.0),
        state_timer_ms: timer,
        target,
        candidates,
    }
}

#[test]
fn test_villager_emerges_after_delay() {
    let herd = [Quarry {
        id: ElephantId(4),
        position: Position::new(600.0, 300.0),
    }];
    let waiting = evaluate(&villager_ctx(VillagerState::Emerging, 496, None, &herd));
    assert!(!waiting.phase_changed);
    assert_eq!(waiting.velocity, Velocity::default());

    let waiting = evaluate(&villager_ctx(VillagerState::Emerging, 500, None, &herd));
    assert!(!waiting.phase_changed, "emerging lasts while timer <= 500");

    let out = evaluate(&villager_ctx(VillagerState::Emerging, 512, None, &herd));
    assert!(out.phase_changed);
    assert_eq!(out.new_state, VillagerState::Chasing);
    assert_eq!(out.target, Some(ElephantId(4)));
}

#[test]
fn test_villager_without_candidates_returns() {
    let out = evaluate(&villager_ctx(VillagerState::Emerging, 512, None, &[]));
    assert_eq!(out.new_state, VillagerState::Returning);
    assert_eq!(out.target, None);
    assert_eq!(out.confront, None);
}

#[test]
fn test_target_selection_nearest_then_lowest_id() {
    let me = Position::new(0.0, 0.0);
    let herd = [
        Quarry { id: ElephantId(9), position: Position::new(30.0, 40.0) },
        Quarry { id: ElephantId(5), position: Position::new(-50.0, 0.0) },
        Quarry { id: ElephantId(7), position: Position::new(100.0, 0.0) },
    ];
    assert_eq!(select_target(me, &herd), Some(ElephantId(5)));

    let nearer = [Quarry { id: ElephantId(2), position: Position::new(10.0, 0.0) }];
    let mut all = herd.to_vec();
    all.extend_from_slice(&nearer);
    assert_eq!(select_target(me, &all), Some(ElephantId(2)));
    assert_eq!(select_target(me, &[]), None);
}

#[test]
fn test_villager_chases_then_confronts() {
    let far = Quarry {
        id: ElephantId(3),
        position: Position::new(600.0, 300.0),
    };
    let chase = evaluate(&villager_ctx(VillagerState::Chasing, 100, Some(far), &[]));
    assert_eq!(chase.new_state, VillagerState::Chasing);
    assert!(approx(chase.velocity.x, VILLAGER_SPEED));
    assert_eq!(chase.confront, None);

    let near = Quarry {
        position: Position::new(539.0, 300.0),
        ..far
    };
    let hit = evaluate(&villager_ctx(VillagerState::Chasing, 100, Some(near), &[]));
    assert_eq!(hit.new_state, VillagerState::Returning);
    assert_eq!(hit.confront, Some(ElephantId(3)));
    assert!(hit.phase_changed);
}

#[test]
fn test_villager_gives_up_on_lost_target() {
    let out = evaluate(&villager_ctx(VillagerState::Chasing, 100, None, &[]));
    assert_eq!(out.new_state, VillagerState::Returning);
    assert_eq!(out.confront, None);
}

#[test]
fn test_villager_goes_home() {
    let mut ctx = villager_ctx(VillagerState::Returning, 0, None, &[]);
    ctx.position = Position::new(400.0, 300.0);
    let walking = evaluate(&ctx);
    assert!(!walking.despawn);
    assert!(approx(walking.velocity.x, VILLAGER_SPEED));

    ctx.position = Position::new(509.0, 300.0);
    assert!(evaluate(&ctx).despawn);
}
