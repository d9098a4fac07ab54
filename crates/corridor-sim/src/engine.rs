//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world and the campaign, processes
//! player commands, runs all systems in a fixed order, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use corridor_core::commands::PlayerCommand;
use corridor_core::components::ElephantAgent;
use corridor_core::config::{DeterrentCatalog, LevelsConfig};
use corridor_core::enums::GameState;
use corridor_core::error::PlacementError;
use corridor_core::events::{AudioCue, GameEvent};
use corridor_core::state::GameStateSnapshot;
use corridor_core::types::{Position, SimTime};

use crate::campaign::{current_level_config, CampaignState, Progression};
use crate::contact::{CircleContacts, ContactResolver};
use crate::placement;
use crate::systems;
use crate::systems::snapshot::SnapshotInputs;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub levels: LevelsConfig,
    pub catalog: DeterrentCatalog,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            levels: LevelsConfig::default(),
            catalog: DeterrentCatalog::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    campaign: CampaignState,
    levels: LevelsConfig,
    catalog: DeterrentCatalog,
    contacts: Box<dyn ContactResolver>,
    paused: bool,
    time_scale: f64,
    rng: ChaCha8Rng,
    next_elephant_id: u32,
    selected_deterrent: Option<String>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_cues: Vec<AudioCue>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the built-in circle contacts.
    pub fn new(config: SimConfig) -> Self {
        Self::with_contacts(config, Box::new(CircleContacts))
    }

    /// Create a new simulation engine with a host-supplied contact resolver.
    pub fn with_contacts(config: SimConfig, contacts: Box<dyn ContactResolver>) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            campaign: CampaignState::new(),
            levels: config.levels,
            catalog: config.catalog,
            contacts,
            paused: false,
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_elephant_id: 0,
            selected_deterrent: None,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_cues: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Systems only run while a level is playing and not paused. Once the
    /// campaign is won or lost nothing moves and the clock stops, but
    /// snapshots keep coming.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.campaign.game_state == GameState::Playing && !self.paused {
            self.run_systems();
            self.time.advance();
        }

        self.snapshot()
    }

    /// Current campaign state (won/lost/playing/transition).
    pub fn game_state(&self) -> GameState {
        self.campaign.game_state
    }

    pub fn campaign(&self) -> &CampaignState {
        &self.campaign
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the ECS world (for testing).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Mutable access to the campaign (for testing).
    #[cfg(test)]
    pub fn campaign_mut(&mut self) -> &mut CampaignState {
        &mut self.campaign
    }

    /// Spawn an elephant at an explicit spot in the current herd (for testing).
    /// A speed of zero keeps it parked: every steering force scales with speed.
    #[cfg(test)]
    pub fn spawn_test_elephant(
        &mut self,
        position: Position,
        speed: f64,
    ) -> corridor_core::components::ElephantId {
        let id = corridor_core::components::ElephantId(self.next_elephant_id);
        self.next_elephant_id += 1;
        world_setup::spawn_elephant_at(
            &mut self.world,
            id,
            self.campaign.current_herd,
            position,
            speed,
            self.time.elapsed_ms,
            u64::MAX,
        );
        id
    }

    #[cfg(test)]
    pub fn spawn_test_farm(&mut self, position: Position) -> hecs::Entity {
        world_setup::spawn_farm(&mut self.world, position)
    }

    #[cfg(test)]
    pub fn spawn_test_house(&mut self, position: Position) -> hecs::Entity {
        world_setup::spawn_house(&mut self.world, position)
    }

    #[cfg(test)]
    pub fn spawn_test_villager(&mut self, home: Position) -> hecs::Entity {
        world_setup::spawn_villager(&mut self.world, home)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Continue => {
                if self.campaign.game_state == GameState::LevelTransition {
                    self.start_level();
                }
            }
            PlayerCommand::SelectDeterrent { kind } => {
                match placement::check_unlocked(&self.catalog, &kind, self.campaign.level_number())
                {
                    Ok(()) => {
                        self.selected_deterrent = Some(kind);
                        self.audio_cues.push(AudioCue::DeterrentPicked);
                    }
                    Err(e) => log_rejection(&e),
                }
            }
            PlayerCommand::ClearSelection => {
                self.selected_deterrent = None;
            }
            PlayerCommand::Click { x, y } => match self.selected_deterrent.clone() {
                Some(kind) => self.place(&kind, Position::new(x, y)),
                None => log_rejection(&PlacementError::NothingSelected),
            },
            PlayerCommand::PlaceDeterrent { kind, x, y } => {
                self.place(&kind, Position::new(x, y));
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::Pause => {
                if self.campaign.game_state == GameState::Playing {
                    self.paused = true;
                }
            }
            PlayerCommand::Resume => {
                self.paused = false;
            }
        }
    }

    fn start_level(&mut self) {
        if self.time.tick == 0 && self.campaign.current_level == 0 {
            self.audio_cues.push(AudioCue::GameStart);
        }
        if let Some(level) = current_level_config(&self.levels, &self.campaign) {
            world_setup::setup_level(&mut self.world, &mut self.rng, level);
        }
        let event = self.campaign.start_level(&self.levels, &mut self.audio_cues);
        self.events.push(event);
    }

    fn place(&mut self, kind: &str, position: Position) {
        match placement::place_deterrent(
            &mut self.world,
            &mut self.campaign,
            &self.catalog,
            kind,
            position,
        ) {
            Ok(_) => {
                let cost = self.catalog.get(kind).map_or(0, |spec| spec.cost);
                tracing::debug!(kind, x = position.x, y = position.y, cost, "deterrent placed");
                self.audio_cues.push(AudioCue::DeterrentPlaced);
                self.events.push(GameEvent::DeterrentPlaced {
                    kind: kind.to_string(),
                    position,
                    cost,
                });
            }
            Err(e) => log_rejection(&e),
        }
    }

    /// Run all systems in order, then fold their events into the campaign.
    fn run_systems(&mut self) {
        let dt_ms = self.time.dt_ms();
        let now_ms = self.time.elapsed_ms;
        let mut events = Vec::new();

        // 1. Herd spawning
        systems::herd_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.campaign,
            &mut self.next_elephant_id,
            now_ms,
            dt_ms,
            &mut events,
        );
        // 2. Deterrent countdown (before steering so expired ones have no effect)
        systems::deterrents::run(&mut self.world, dt_ms, &mut events);
        // 3. Elephant steering
        systems::steering::run(&mut self.world, &mut self.rng, now_ms, dt_ms);
        // 4. Villager FSM
        systems::villagers::run(&mut self.world, dt_ms, &mut events);
        // 5. Movement integration + solid bodies
        systems::movement::run(&mut self.world, self.contacts.as_ref());
        // 6. Safety line and spawn edge
        systems::boundary::run(&mut self.world, &mut events);
        // 7. Farm contacts
        systems::farm_damage::run(&mut self.world, self.contacts.as_ref(), dt_ms, &mut events);

        // 8. Damage and losses before thresholds
        let mut follow_ups = Vec::new();
        for event in &events {
            if let Some(follow_up) = self.campaign.resolve(event, &mut self.audio_cues) {
                follow_ups.push(follow_up);
            }
        }
        events.append(&mut follow_ups);

        // 9. Herd / level / campaign transitions
        let active_elephants = self
            .world
            .query::<&ElephantAgent>()
            .iter()
            .filter(|(_, agent)| agent.active)
            .count();
        let progression = self.campaign.evaluate(
            &self.levels,
            active_elephants,
            &mut events,
            &mut self.audio_cues,
        );
        if progression == Progression::NextLevel {
            world_setup::clear_level(&mut self.world);
            self.paused = false;
        }

        // 10. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        self.events.append(&mut events);
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: &self.time,
                campaign: &self.campaign,
                levels: &self.levels,
                catalog: &self.catalog,
                paused: self.paused,
                selected_deterrent: self.selected_deterrent.as_deref(),
                audio_cues: std::mem::take(&mut self.audio_cues),
                events: std::mem::take(&mut self.events),
            },
        )
    }
}

fn log_rejection(error: &PlacementError) {
    match error {
        PlacementError::UnknownType(_) => tracing::warn!(%error, "deterrent request ignored"),
        _ => tracing::debug!(%error, "deterrent placement rejected"),
    }
}
