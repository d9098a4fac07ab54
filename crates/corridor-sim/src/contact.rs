//! Contact detection collaborator.
//!
//! The simulation does not own a physics engine. Overlap queries (elephant
//! on farm) and solid-body separation (elephant against a blocking
//! deterrent) go through `ContactResolver`, so a host with its own physics
//! can plug it in. `CircleContacts` is the built-in circle-vs-circle
//! implementation used for headless runs and tests.

use glam::DVec2;
use hecs::Entity;

use corridor_core::types::Position;

/// A circular body handed to the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub entity: Entity,
    pub position: Position,
    pub radius: f64,
}

pub trait ContactResolver: Send {
    /// Every (agent, zone) pair currently overlapping. Order is unspecified
    /// and pairs may repeat; callers deduplicate.
    fn overlaps(&self, agents: &[Body], zones: &[Body]) -> Vec<(Entity, Entity)>;

    /// Where `agent` ends up once pushed out of every solid it penetrates.
    fn separate(&self, agent: &Body, solids: &[Body]) -> Position;
}

/// Circle-vs-circle contacts: two bodies touch when their centers are closer
/// than the sum of their radii.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleContacts;

impl ContactResolver for CircleContacts {
    fn overlaps(&self, agents: &[Body], zones: &[Body]) -> Vec<(Entity, Entity)> {
        agents
            .iter()
            .flat_map(|agent| {
                zones
                    .iter()
                    .filter(move |zone| {
                        agent.position.range_to(&zone.position) < agent.radius + zone.radius
                    })
                    .map(move |zone| (agent.entity, zone.entity))
            })
            .collect()
    }

    /// Moves the agent to the nearest point clear of every solid. That point
    /// is either the projection onto one expanded circle or a crossing of two,
    /// so overlapping solids cannot push the agent back into each other.
    fn separate(&self, agent: &Body, solids: &[Body]) -> Position {
        let origin = agent.position.as_dvec2();
        if is_clear(origin, agent.radius, solids) {
            return agent.position;
        }

        let expanded: Vec<(DVec2, f64)> = solids
            .iter()
            .map(|solid| (solid.position.as_dvec2(), agent.radius + solid.radius))
            .collect();

        let projections = solids.iter().zip(&expanded).map(|(solid, &(center, r))| {
            center + solid.position.direction_to(&agent.position) * r
        });
        let crossings = expanded.iter().enumerate().flat_map(|(i, &a)| {
            expanded[i + 1..]
                .iter()
                .flat_map(move |&b| circle_crossings(a, b))
        });

        projections
            .chain(crossings)
            .filter(|&candidate| is_clear(candidate, agent.radius, solids))
            .min_by(|a, b| origin.distance(*a).total_cmp(&origin.distance(*b)))
            .map_or(agent.position, Position::from)
    }
}

/// Slack for points placed exactly on a boundary.
const CONTACT_EPSILON: f64 = 1e-9;

fn is_clear(point: DVec2, radius: f64, solids: &[Body]) -> bool {
    solids.iter().all(|solid| {
        point.distance(solid.position.as_dvec2()) >= radius + solid.radius - CONTACT_EPSILON
    })
}

/// Intersection points of two circles, if they cross.
fn circle_crossings((c1, r1): (DVec2, f64), (c2, r2): (DVec2, f64)) -> Vec<DVec2> {
    let d = c1.distance(c2);
    if d <= 0.0 || d > r1 + r2 || d < (r1 - r2).abs() {
        return Vec::new();
    }
    let axis = (c2 - c1) / d;
    let along = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let half_chord = (r1 * r1 - along * along).max(0.0).sqrt();
    let mid = c1 + axis * along;
    let perp = axis.perp() * half_chord;
    vec![mid + perp, mid - perp]
}
