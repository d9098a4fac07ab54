//! Simulation constants and tuning parameters.

/// Fixed tick length in milliseconds.
pub const TICK_MS: u64 = 16;

/// Seconds per tick.
pub const DT: f64 = TICK_MS as f64 / 1000.0;

// --- Arena ---

/// Arena width (units).
pub const ARENA_WIDTH: f64 = 1200.0;

/// Arena height (units).
pub const ARENA_HEIGHT: f64 = 600.0;

/// x coordinate at which new elephants appear (just off the spawn edge).
pub const SPAWN_X: f64 = -30.0;

/// Vertical spawn band for new elephants.
pub const SPAWN_Y_MIN: f64 = 100.0;
pub const SPAWN_Y_MAX: f64 = 500.0;

/// Crossing this x raises the "reached safety" event.
pub const SAFETY_X: f64 = 1250.0;

/// Abandoned elephants past this x (toward the spawn edge) are removed.
pub const RETREAT_EXIT_X: f64 = -50.0;

/// Vertical soft bounds: below `ARENA_MARGIN_TOP` an elephant may not move up,
/// above `ARENA_MARGIN_BOTTOM` it may not move down.
pub const ARENA_MARGIN_TOP: f64 = 50.0;
pub const ARENA_MARGIN_BOTTOM: f64 = 550.0;

// --- Elephants ---

/// Base elephant speed (units/s).
pub const ELEPHANT_SPEED: f64 = 20.0;

/// Maximum blended speed as a multiple of base speed.
pub const MAX_SPEED_FACTOR: f64 = 2.0;

/// Random-walk direction hold interval bounds (ms).
pub const WALK_INTERVAL_MIN_MS: u64 = 1000;
pub const WALK_INTERVAL_MAX_MS: u64 = 3000;

/// Probability that a new walk direction is drawn from the rightward cone.
pub const RIGHTWARD_BIAS: f64 = 0.3;

/// Half-angle of the rightward cone (radians, 45°).
pub const RIGHTWARD_CONE_HALF_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

// --- Steering ---

/// Area-effect deterrent repulsion scale (× speed × effectiveness/100).
pub const AREA_REPULSION_FACTOR: f64 = 0.6;

/// Farms closer than this attract elephants.
pub const FARM_ATTRACTION_RADIUS: f64 = 120.0;

/// Farm attraction scale (× speed / max(distance, floor)).
pub const FARM_ATTRACTION_FACTOR: f64 = 0.5;
pub const FARM_ATTRACTION_MIN_DISTANCE: f64 = 20.0;

/// Neighbor radius for herd flocking.
pub const HERD_RADIUS: f64 = 100.0;

/// Separation kicks in below this neighbor distance.
pub const HERD_SEPARATION_RADIUS: f64 = 40.0;

/// Separation scale (× speed).
pub const HERD_SEPARATION_FACTOR: f64 = 0.2;

/// Cohesion and alignment gains.
pub const HERD_COHESION_GAIN: f64 = 0.1;
pub const HERD_ALIGNMENT_GAIN: f64 = 0.1;

/// Blend weights applied to farm and herd forces.
pub const FARM_BLEND_WEIGHT: f64 = 0.5;
pub const HERD_BLEND_WEIGHT: f64 = 0.3;

/// Age at which the migration force starts (ms).
pub const MIGRATION_ONSET_MS: u64 = 30_000;

/// Migration force escalation step (ms).
pub const MIGRATION_STEP_MS: u64 = 15_000;

/// Migration force at onset and per-step increment.
pub const MIGRATION_BASE_FORCE: f64 = 5.0;
pub const MIGRATION_FORCE_INCREMENT: f64 = 3.0;

/// Force magnitude above which a force counts as the dominant influence.
pub const INFLUENCE_THRESHOLD: f64 = 1.0;

// --- Deterrents ---

/// Minimum distance between a new deterrent and any farm or house.
pub const PLACEMENT_CLEARANCE: f64 = 40.0;

/// Solid body radius of a blocking deterrent, as a fraction of its size.
pub const BLOCKING_BODY_FACTOR: f64 = 0.4;

/// Elephant body radius used for solid collision.
pub const ELEPHANT_BODY_RADIUS: f64 = 19.0;

// --- Farms ---

/// Contact dwell time that damages a farm (ms, strictly exceeded).
pub const FARM_DAMAGE_DWELL_MS: u64 = 2000;

/// Fully damaged farm level.
pub const FARM_MAX_DAMAGE: u8 = 2;

/// Center distance below which an elephant is in contact with a farm.
pub const FARM_CONTACT_RADIUS: f64 = 50.0;

// --- Level layout ---

pub const FARM_X_MIN: f64 = ARENA_WIDTH / 4.0;
pub const FARM_X_MAX: f64 = ARENA_WIDTH - 100.0;
pub const FARM_Y_MIN: f64 = 100.0;
pub const FARM_Y_MAX: f64 = ARENA_HEIGHT - 100.0;
pub const FARM_SPACING: f64 = 120.0;

pub const HOUSE_MARGIN: f64 = 80.0;
pub const HOUSE_SPACING: f64 = 80.0;
pub const HOUSE_FARM_CLEARANCE: f64 = 60.0;

/// Attempts per building before the placement is skipped.
pub const LAYOUT_ATTEMPTS: u32 = 50;

// --- Villagers ---

/// Villager speed (units/s).
pub const VILLAGER_SPEED: f64 = 30.0;

/// Time spent emerging from the house before the chase (ms).
pub const VILLAGER_EMERGE_MS: u64 = 500;

/// Distance at which a villager confronts its target.
pub const VILLAGER_CONFRONT_RANGE: f64 = 40.0;

/// Distance at which a returning villager is home.
pub const VILLAGER_HOME_RANGE: f64 = 10.0;

// --- Campaign ---

/// Starting budget.
pub const STARTING_BUDGET: u32 = 500;

/// Budget granted for each elephant that reaches safety.
pub const SAFETY_REWARD: u32 = 10;

/// Delay before the first elephant of a level (ms).
pub const FIRST_SPAWN_DELAY_MS: u64 = 2000;

/// Spawn interval bounds within a herd (ms).
pub const SPAWN_INTERVAL_MIN_MS: u64 = 2000;
pub const SPAWN_INTERVAL_MAX_MS: u64 = 4000;

/// Fully damaged farms in one level that lose the campaign.
pub const FARM_LOSS_THRESHOLD: u32 = 3;

/// Intercepted elephants in one herd that lose the campaign.
pub const HERD_LOSS_THRESHOLD: u32 = 3;

/// Minimum campaign success rate for a win.
pub const WIN_SUCCESS_RATE: f64 = 0.6;
