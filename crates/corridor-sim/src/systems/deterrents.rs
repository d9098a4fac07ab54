//! Deterrent countdown: ages every active deterrent and expires it at zero.
//!
//! Runs before steering, so an expired deterrent never influences the tick
//! it expires on. The entity itself is despawned by the cleanup sweep.

use hecs::World;

use corridor_core::components::Deterrent;
use corridor_core::events::GameEvent;
use corridor_core::types::Position;

pub fn run(world: &mut World, dt_ms: u64, events: &mut Vec<GameEvent>) {
    for (_entity, (deterrent, position)) in world.query_mut::<(&mut Deterrent, &Position)>() {
        if !deterrent.active {
            continue;
        }
        deterrent.duration_remaining_ms -= dt_ms as i64;
        if deterrent.duration_remaining_ms <= 0 {
            deterrent.active = false;
            tracing::debug!(kind = %deterrent.kind, x = position.x, y = position.y, "deterrent expired");
            events.push(GameEvent::DeterrentExpired {
                kind: deterrent.kind.clone(),
                position: *position,
            });
        }
    }
}
