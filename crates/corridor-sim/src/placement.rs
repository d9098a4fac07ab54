//! Deterrent placement validation.

use hecs::{Entity, World};

use corridor_core::components::{Farm, House};
use corridor_core::config::DeterrentCatalog;
use corridor_core::constants::PLACEMENT_CLEARANCE;
use corridor_core::enums::GameState;
use corridor_core::error::PlacementError;
use corridor_core::types::Position;

use crate::campaign::CampaignState;
use crate::world_setup;

/// Validate and place a deterrent of `kind` at `position`, charging its cost.
/// A rejected placement leaves the world and budget untouched.
pub fn place_deterrent(
    world: &mut World,
    campaign: &mut CampaignState,
    catalog: &DeterrentCatalog,
    kind: &str,
    position: Position,
) -> Result<Entity, PlacementError> {
    if campaign.game_state != GameState::Playing {
        return Err(PlacementError::NotPlaying);
    }
    let spec = catalog
        .get(kind)
        .ok_or_else(|| PlacementError::UnknownType(kind.to_string()))?;
    check_unlocked(catalog, kind, campaign.level_number())?;
    if !campaign.can_afford(spec.cost) {
        return Err(PlacementError::InsufficientBudget {
            cost: spec.cost,
            budget: campaign.budget,
        });
    }
    if let Some(distance) = nearest_building(world, position) {
        if distance < PLACEMENT_CLEARANCE {
            return Err(PlacementError::TooCloseToBuilding {
                distance,
                clearance: PLACEMENT_CLEARANCE,
            });
        }
    }

    campaign.spend(spec.cost);
    Ok(world_setup::spawn_deterrent(world, kind, spec, position))
}

/// Whether `kind` exists and may be placed at `level_number` (1-based).
pub fn check_unlocked(
    catalog: &DeterrentCatalog,
    kind: &str,
    level_number: u32,
) -> Result<(), PlacementError> {
    let spec = catalog
        .get(kind)
        .ok_or_else(|| PlacementError::UnknownType(kind.to_string()))?;
    if spec.unlock_level > level_number {
        return Err(PlacementError::Locked {
            kind: kind.to_string(),
            unlock_level: spec.unlock_level,
        });
    }
    Ok(())
}

/// Distance to the closest farm or house.
fn nearest_building(world: &World, position: Position) -> Option<f64> {
    let farms = world
        .query::<(&Farm, &Position)>()
        .iter()
        .map(|(_, (_, p))| p.range_to(&position))
        .collect::<Vec<_>>();
    let houses = world
        .query::<(&House, &Position)>()
        .iter()
        .map(|(_, (_, p))| p.range_to(&position))
        .collect::<Vec<_>>();
    farms.into_iter().chain(houses).min_by(f64::total_cmp)
}
