//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. It is headless,
//! which keeps it deterministic and testable.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pirate_core::commands::PlayerCommand;
use pirate_core::config::SimConfig;
use pirate_core::constants::{DT, SAVE_VERSION};
use pirate_core::enums::{AlertLevel, GamePhase};
use pirate_core::events::{Alert, AudioEvent};
use pirate_core::state::GameStateSnapshot;
use pirate_core::types::SimTime;

use crate::hud::Hud;
use crate::persistence::{self, SaveData, SaveError};
use crate::shop::GoldShop;
use crate::spawn_grid::SpawnGrid;
use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: SimConfig,
    rng: ChaCha8Rng,
    hud: Hud,
    shop: GoldShop,
    grid: SpawnGrid,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_events: Vec<AudioEvent>,
    alerts: Vec<Alert>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    /// The world stays empty until a `StartGame` command arrives.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            hud: Hud::default(),
            shop: GoldShop::default(),
            grid: SpawnGrid::with_college_footprints(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            alerts: Vec::new(),
        }
    }

    /// Rebuild a session from a save. The game resumes paused.
    pub fn from_save(config: SimConfig, data: &SaveData) -> Result<Self, SaveError> {
        if data.version != SAVE_VERSION {
            return Err(SaveError::UnsupportedVersion {
                found: data.version,
                expected: SAVE_VERSION,
            });
        }
        let mut engine = Self::new(SimConfig {
            seed: data.seed,
            difficulty: data.difficulty,
            ..config
        });
        engine.rng = ChaCha8Rng::seed_from_u64(data.seed.wrapping_add(data.time.tick));
        persistence::restore(&mut engine.world, data);
        engine.hud = data.hud.clone();
        engine.time = data.time;
        engine.phase = GamePhase::Paused;
        log::info!(
            "loaded slot {} at tick {}",
            data.slot_name,
            data.time.tick
        );
        Ok(engine)
    }

    /// Capture the current session for a save slot.
    pub fn save_data(&self, slot: &str) -> SaveData {
        let (player, colleges, power_ups) = persistence::capture(&self.world);
        SaveData {
            version: SAVE_VERSION,
            slot_name: slot.to_string(),
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            seed: self.config.seed,
            difficulty: self.config.difficulty,
            time: self.time,
            hud: self.hud.clone(),
            player,
            colleges,
            power_ups,
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
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        let alerts = std::mem::take(&mut self.alerts);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.hud,
            self.shop.view(),
            alerts,
            audio_events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Mutable world access for tests that stage a scenario.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn hud_mut(&mut self) -> &mut Hud {
        &mut self.hud
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
            PlayerCommand::StartGame => {
                if self.phase == GamePhase::MainMenu || self.phase.is_over() {
                    self.start_game();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::Steer { x, y } => {
                systems::player::steer(&mut self.world, x, y);
            }
            PlayerCommand::Fire { x, y } => {
                if self.phase == GamePhase::Active {
                    systems::player::fire(
                        &mut self.world,
                        Vec2::new(x, y),
                        &mut self.audio_events,
                        self.config.preferences.effects(),
                    );
                }
            }
            PlayerCommand::OpenShop => {
                if self.phase == GamePhase::Active {
                    self.shop.show();
                    self.phase = GamePhase::Shop;
                }
            }
            PlayerCommand::CloseShop => {
                if self.phase == GamePhase::Shop {
                    self.shop.close();
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::Purchase { item } => {
                if self.phase != GamePhase::Shop {
                    return;
                }
                match self.shop.purchase(item, &mut self.world, &mut self.hud) {
                    Ok(message) => {
                        if let Some(volume) = self.config.preferences.effects() {
                            self.audio_events.push(AudioEvent::Purchase { volume });
                        }
                        self.push_alert(AlertLevel::Info, "Success", message);
                    }
                    Err(e) => {
                        log::debug!("purchase of {:?} refused: {}", item, e);
                        self.push_alert(AlertLevel::Error, "Error", e.to_string());
                    }
                }
            }
            PlayerCommand::SetEffects { enabled, volume } => {
                self.config.preferences.set_effects(enabled, volume);
            }
        }
    }

    fn start_game(&mut self) {
        self.world.clear();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        world_setup::setup_new_game(&mut self.world, &mut self.rng, &self.grid, &self.config);
        self.hud = Hud::default();
        self.hud.set_coins(self.config.starting_coins);
        self.shop = GoldShop::default();
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
        log::info!(
            "new game: seed {}, difficulty {:?}",
            self.config.seed,
            self.config.difficulty
        );
    }

    fn push_alert(&mut self, level: AlertLevel, title: &str, message: String) {
        self.alerts.push(Alert {
            level,
            title: title.to_string(),
            message,
            tick: self.time.tick,
        });
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let effects = self.config.preferences.effects();

        // 1. Player helm and cannon cooldown
        systems::player::run(&mut self.world, DT);
        // 2. Colleges: destruction and rewards
        systems::college::run(
            &mut self.world,
            &mut self.rng,
            &mut self.hud,
            &mut self.audio_events,
            effects,
        );
        // 3. Fleets: sinking and steering
        systems::enemy_ship::run(&mut self.world, &mut self.hud, &mut self.audio_events, effects);
        // 4. Power-up countdowns
        systems::power_ups::run(
            &mut self.world,
            &mut self.hud,
            &mut self.audio_events,
            effects,
            DT,
        );
        // 5. Hostile batteries
        systems::gunnery::run(&mut self.world, &mut self.audio_events, effects, DT);
        // 6. Cannonball lifetime
        systems::cannonball::run(&mut self.world, DT);
        // 7. Movement integration
        systems::movement::run(&mut self.world, DT);
        // 8. Contacts
        systems::collision::run(&mut self.world, &mut self.hud, &mut self.audio_events, effects);
        // 9. Victory / defeat
        if let Some(outcome) = systems::game_over::check(&self.world, &self.hud) {
            log::info!(
                "game over: {:?} with {} points",
                outcome,
                self.hud.points
            );
            self.phase = outcome;
        }
        // 10. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
