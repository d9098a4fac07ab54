//! Kinematic integration and solid-body resolution.
//!
//! Updates Position from Velocity each tick (position += velocity * dt),
//! then asks the contact resolver to push non-abandoned elephants out of
//! blocking deterrents.

use hecs::World;

use corridor_core::components::{Deterrent, ElephantAgent};
use corridor_core::constants::{BLOCKING_BODY_FACTOR, DT, ELEPHANT_BODY_RADIUS};
use corridor_core::types::{Position, Velocity};

use crate::contact::{Body, ContactResolver};

/// Integrate every entity with Position + Velocity, then resolve solids.
pub fn run(world: &mut World, contacts: &dyn ContactResolver) {
    integrate(world);
    resolve_solids(world, contacts);
}

pub fn integrate(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.step(vel, DT);
    }
}

/// Blocking deterrents are solid; abandoned elephants pass through them.
pub fn resolve_solids(world: &mut World, contacts: &dyn ContactResolver) {
    let solids: Vec<Body> = world
        .query::<(&Deterrent, &Position)>()
        .iter()
        .filter(|(_, (d, _))| d.active && d.blocking)
        .map(|(entity, (d, position))| Body {
            entity,
            position: *position,
            radius: d.size * BLOCKING_BODY_FACTOR,
        })
        .collect();
    if solids.is_empty() {
        return;
    }

    for (entity, (agent, position)) in world.query_mut::<(&ElephantAgent, &mut Position)>() {
        if !agent.active || agent.is_abandoned {
            continue;
        }
        let body = Body {
            entity,
            position: *position,
            radius: ELEPHANT_BODY_RADIUS,
        };
        *position = contacts.separate(&body, &solids);
    }
}
