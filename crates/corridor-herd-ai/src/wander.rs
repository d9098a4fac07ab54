//! Random walk for elephants.
//!
//! Each elephant holds a walk direction for a randomized interval, then draws
//! a new one. A fraction of draws come from a cone around +x so herds drift
//! toward safety even when nothing else acts on them.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use corridor_core::components::ElephantAgent;
use corridor_core::constants::*;

/// Draw a new unit walk direction.
pub fn choose_walk_direction<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
    let angle = if rng.gen::<f64>() < RIGHTWARD_BIAS {
        rng.gen_range(-RIGHTWARD_CONE_HALF_ANGLE..=RIGHTWARD_CONE_HALF_ANGLE)
    } else {
        rng.gen_range(0.0..TAU)
    };
    DVec2::new(angle.cos(), angle.sin())
}

/// Draw how long the next walk direction is held (ms).
pub fn next_walk_interval<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen_range(WALK_INTERVAL_MIN_MS..=WALK_INTERVAL_MAX_MS)
}

/// Advance an elephant's walk timer by `dt_ms`, redrawing the direction and
/// interval once the current interval has run out. Returns true on a redraw.
pub fn advance_walk<R: Rng + ?Sized>(agent: &mut ElephantAgent, dt_ms: u64, rng: &mut R) -> bool {
    agent.walk_timer_ms += dt_ms;
    if agent.walk_timer_ms < agent.walk_change_interval_ms {
        return false;
    }
    let direction = choose_walk_direction(rng);
    agent.walk_direction = (direction.x, direction.y);
    agent.walk_timer_ms = 0;
    agent.walk_change_interval_ms = next_walk_interval(rng);
    true
}

/// The agent's current walk direction as a vector.
pub fn walk_vector(agent: &ElephantAgent) -> DVec2 {
    DVec2::new(agent.walk_direction.0, agent.walk_direction.1)
}
