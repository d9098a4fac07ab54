//! Herd spawning: releases the current herd's elephants one at a time on a
//! randomized interval.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use corridor_core::components::ElephantId;
use corridor_core::constants::{SPAWN_INTERVAL_MAX_MS, SPAWN_INTERVAL_MIN_MS};
use corridor_core::events::GameEvent;

use crate::campaign::CampaignState;
use crate::world_setup;

/// Count down to the next spawn and release an elephant when due.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    campaign: &mut CampaignState,
    next_elephant_id: &mut u32,
    now_ms: u64,
    dt_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    campaign.spawn_countdown_ms -= dt_ms as i64;
    if !campaign.spawn_due() {
        return;
    }

    let id = ElephantId(*next_elephant_id);
    *next_elephant_id += 1;
    let herd = campaign.current_herd;
    world_setup::spawn_elephant(world, rng, id, herd, now_ms);
    campaign.record_spawn();
    campaign.spawn_countdown_ms = rng.gen_range(SPAWN_INTERVAL_MIN_MS..=SPAWN_INTERVAL_MAX_MS) as i64;

    tracing::debug!(
        elephant = id.0,
        herd,
        spawned = campaign.elephants_spawned_in_herd,
        of = campaign.herd_size,
        "elephant spawned"
    );
    events.push(GameEvent::ElephantSpawned { elephant: id, herd });
}
