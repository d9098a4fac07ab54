//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::World;

use corridor_core::components::*;
use corridor_core::config::{DeterrentCatalog, DeterrentSpec, LevelsConfig};
use corridor_core::enums::{GameState, LossReason, SteeringInfluence};
use corridor_core::events::{AudioCue, GameEvent};
use corridor_core::state::*;
use corridor_core::types::{Position, SimTime, Velocity};

use crate::campaign::{current_level_config, CampaignState};

/// Deterrents with less than this left are flagged as expiring.
const EXPIRING_MS: i64 = 10_000;

/// Everything the snapshot needs besides the world.
pub struct SnapshotInputs<'a> {
    pub time: &'a SimTime,
    pub campaign: &'a CampaignState,
    pub levels: &'a LevelsConfig,
    pub catalog: &'a DeterrentCatalog,
    pub paused: bool,
    pub selected_deterrent: Option<&'a str>,
    pub audio_cues: Vec<AudioCue>,
    pub events: Vec<GameEvent>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, inputs: SnapshotInputs) -> GameStateSnapshot {
    let campaign = inputs.campaign;
    GameStateSnapshot {
        time: *inputs.time,
        game_state: campaign.game_state,
        loss_reason: campaign.loss_reason,
        paused: inputs.paused,
        hud: build_hud(campaign, inputs.levels),
        transition: build_transition(campaign, inputs.levels, inputs.catalog),
        elephants: build_elephants(world),
        farms: build_farms(world),
        houses: build_houses(world),
        villagers: build_villagers(world),
        deterrents: build_deterrents(world),
        deterrent_options: inputs
            .catalog
            .available(campaign.level_number())
            .map(|(kind, spec)| deterrent_option(kind, spec, campaign.budget))
            .collect(),
        selected_deterrent: inputs.selected_deterrent.map(str::to_string),
        audio_cues: inputs.audio_cues,
        events: inputs.events,
    }
}

fn build_hud(campaign: &CampaignState, levels: &LevelsConfig) -> HudView {
    let herds = current_level_config(levels, campaign).map_or(0, |l| l.herds.len() as u32);
    // Stays on the last herd while the final one drains
    let herd_number = (campaign.current_herd + 1).min(herds.max(1));
    let success_rate_pct = campaign
        .success_rate()
        .map_or(0, |rate| (rate * 100.0).round() as u32);

    let status = match campaign.game_state {
        GameState::LevelTransition => format!("Level {} ready", campaign.level_number()),
        GameState::Playing => format!(
            "Herd {}/{}: {}/{} through",
            herd_number,
            herds,
            campaign.elephants_finished_in_herd,
            campaign.herd_size
        ),
        GameState::Won => format!("Migration complete: {success_rate_pct}% reached safety"),
        GameState::Lost => match campaign.loss_reason {
            Some(LossReason::Farms) => "Too many farms destroyed".to_string(),
            Some(LossReason::Elephants) => "Too many elephants turned back".to_string(),
            Some(LossReason::LowSuccess) | None => {
                format!("Only {success_rate_pct}% reached safety")
            }
        },
    };

    HudView {
        budget: campaign.budget,
        level: campaign.level_number(),
        herd: herd_number,
        herd_finished: campaign.elephants_finished_in_herd,
        herd_size: campaign.herd_size,
        saved: campaign.saved_total,
        lost: campaign.lost_total,
        lost_this_herd: campaign.elephants_lost_this_herd,
        damaged_farms: campaign.damaged_farms_count,
        success_rate_pct,
        status,
    }
}

fn build_transition(
    campaign: &CampaignState,
    levels: &LevelsConfig,
    catalog: &DeterrentCatalog,
) -> Option<TransitionView> {
    if campaign.game_state != GameState::LevelTransition {
        return None;
    }
    let level = current_level_config(levels, campaign)?;
    Some(TransitionView {
        level: campaign.level_number(),
        name: level.name.clone(),
        farms: level.farms,
        houses: level.houses,
        herds: level.herds.len() as u32,
        unlocked: catalog
            .unlocked_at(campaign.level_number())
            .map(|(kind, spec)| deterrent_option(kind, spec, campaign.budget))
            .collect(),
    })
}

fn deterrent_option(kind: &str, spec: &DeterrentSpec, budget: u32) -> DeterrentOption {
    DeterrentOption {
        kind: kind.to_string(),
        name: spec.name.clone(),
        cost: spec.cost,
        effectiveness: spec.effectiveness,
        duration_ms: spec.duration_ms,
        range: spec.range,
        blocking: spec.blocking,
        description: spec.description.clone(),
        affordable: budget >= spec.cost,
    }
}

/// Active elephants, in id order.
fn build_elephants(world: &World) -> Vec<ElephantView> {
    let mut views: Vec<ElephantView> = world
        .query::<(&ElephantAgent, &Position, &Velocity, &SteeringInfluence)>()
        .iter()
        .filter(|(_, (agent, _, _, _))| agent.active)
        .map(|(_, (agent, position, velocity, influence))| ElephantView {
            id: agent.id,
            position: *position,
            velocity: *velocity,
            herd: agent.herd_id,
            abandoned: agent.is_abandoned,
            influence: *influence,
        })
        .collect();
    views.sort_by_key(|view| view.id);
    views
}

fn build_farms(world: &World) -> Vec<FarmView> {
    world
        .query::<(&Farm, &Position)>()
        .iter()
        .map(|(_, (farm, position))| FarmView {
            position: *position,
            damage_level: farm.damage_level,
        })
        .collect()
}

fn build_houses(world: &World) -> Vec<Position> {
    world
        .query::<(&House, &Position)>()
        .iter()
        .map(|(_, (_, position))| *position)
        .collect()
}

fn build_villagers(world: &World) -> Vec<VillagerView> {
    world
        .query::<(&VillagerAgent, &Position)>()
        .iter()
        .filter(|(_, (villager, _))| villager.active)
        .map(|(_, (villager, position))| VillagerView {
            position: *position,
            state: villager.state,
        })
        .collect()
}

fn build_deterrents(world: &World) -> Vec<DeterrentView> {
    world
        .query::<(&Deterrent, &Position)>()
        .iter()
        .filter(|(_, (deterrent, _))| deterrent.active)
        .map(|(_, (deterrent, position))| DeterrentView {
            kind: deterrent.kind.clone(),
            position: *position,
            range: deterrent.range,
            size: deterrent.size,
            blocking: deterrent.blocking,
            remaining_ms: deterrent.duration_remaining_ms,
            expiring: deterrent.duration_remaining_ms < EXPIRING_MS,
        })
        .collect()
}
