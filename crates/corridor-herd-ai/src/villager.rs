//! Villager interception state machine.
//!
//! Pure functions that compute state transitions and velocities for one
//! villager. The target is an elephant id; the caller resolves it against
//! the live elephant set every tick and passes `None` when it is gone.

use corridor_core::components::ElephantId;
use corridor_core::constants::*;
use corridor_core::enums::VillagerState;
use corridor_core::types::{Position, Velocity};

/// An elephant a villager could chase.
#[derive(Debug, Clone, Copy)]
pub struct Quarry {
    pub id: ElephantId,
    pub position: Position,
}

/// Input to the villager FSM.
pub struct VillagerContext<'a> {
    pub state: VillagerState,
    pub position: Position,
    pub home: Position,
    /// Time in the current state, including this tick (ms).
    pub state_timer_ms: u64,
    /// The current target, if it is still active and not abandoned.
    pub target: Option<Quarry>,
    /// Active, non-abandoned elephants, used when picking a target.
    pub candidates: &'a [Quarry],
}

/// Output from the villager FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VillagerUpdate {
    pub new_state: VillagerState,
    pub velocity: Velocity,
    pub target: Option<ElephantId>,
    /// Elephant confronted this tick; the caller abandons it and counts the loss.
    pub confront: Option<ElephantId>,
    /// Home reached; remove the villager.
    pub despawn: bool,
    pub phase_changed: bool,
}

/// Evaluate the FSM for one villager.
pub fn evaluate(ctx: &VillagerContext) -> VillagerUpdate {
    match ctx.state {
        VillagerState::Emerging => evaluate_emerging(ctx),
        VillagerState::Chasing => evaluate_chasing(ctx),
        VillagerState::Returning => evaluate_returning(ctx),
    }
}

fn evaluate_emerging(ctx: &VillagerContext) -> VillagerUpdate {
    let mut update = hold(ctx, VillagerState::Emerging);
    if ctx.state_timer_ms <= VILLAGER_EMERGE_MS {
        return update;
    }

    match select_target(ctx.position, ctx.candidates) {
        Some(id) => {
            update.new_state = VillagerState::Chasing;
            update.target = Some(id);
        }
        // Nobody to chase
        None => {
            update.new_state = VillagerState::Returning;
            update.velocity = head_toward(ctx.position, ctx.home);
        }
    }
    update.phase_changed = true;
    update
}

fn evaluate_chasing(ctx: &VillagerContext) -> VillagerUpdate {
    let Some(target) = ctx.target else {
        // Target removed or abandoned by someone else: give up, no penalty
        return go_home(ctx, None);
    };

    if ctx.position.range_to(&target.position) < VILLAGER_CONFRONT_RANGE {
        return go_home(ctx, Some(target.id));
    }

    VillagerUpdate {
        new_state: VillagerState::Chasing,
        velocity: head_toward(ctx.position, target.position),
        target: Some(target.id),
        confront: None,
        despawn: false,
        phase_changed: false,
    }
}

fn evaluate_returning(ctx: &VillagerContext) -> VillagerUpdate {
    let mut update = hold(ctx, VillagerState::Returning);
    if ctx.position.range_to(&ctx.home) < VILLAGER_HOME_RANGE {
        update.despawn = true;
    } else {
        update.velocity = head_toward(ctx.position, ctx.home);
    }
    update
}

/// Nearest candidate by straight-line distance, ties broken by ascending id.
pub fn select_target(position: Position, candidates: &[Quarry]) -> Option<ElephantId> {
    candidates
        .iter()
        .map(|q| (position.range_to(&q.position), q.id))
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, id)| id)
}

fn go_home(ctx: &VillagerContext, confront: Option<ElephantId>) -> VillagerUpdate {
    VillagerUpdate {
        new_state: VillagerState::Returning,
        velocity: head_toward(ctx.position, ctx.home),
        target: None,
        confront,
        despawn: false,
        phase_changed: true,
    }
}

fn hold(ctx: &VillagerContext, state: VillagerState) -> VillagerUpdate {
    VillagerUpdate {
        new_state: state,
        velocity: Velocity::default(),
        target: ctx.target.map(|t| t.id),
        confront: None,
        despawn: false,
        phase_changed: false,
    }
}

fn head_toward(from: Position, to: Position) -> Velocity {
    (from.direction_to(&to) * VILLAGER_SPEED).into()
}
