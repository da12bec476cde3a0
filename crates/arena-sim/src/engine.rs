//! Simulation engine, the core of the arena.
//!
//! `SimulationEngine` owns the hecs ECS world and the player, processes host
//! commands, runs all systems, and produces `GameStateSnapshot`s. Completely
//! headless: the host supplies elapsed time and renders the snapshots.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use arena_core::commands::{HostCommand, UpgradeChoice};
use arena_core::config::ConfigRepository;
use arena_core::constants::MAX_TICK_SECS;
use arena_core::enums::{GamePhase, PauseReason, SchedulerState};
use arena_core::events::GameEvent;
use arena_core::state::{GameStateSnapshot, UpgradeOption};
use arena_core::types::SimTime;

use crate::player::Player;
use crate::progression::{self, ProgressionContext, ProgressionController};
use crate::spawn_area::SpawnAreaRegistry;
use crate::systems;
use crate::systems::spawn_scheduler::{SpawnContext, SpawnScheduler};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and same deltas = same simulation.
    pub seed: u64,
    /// Upper bound on a single tick's delta, in seconds.
    pub max_tick_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_tick_secs: MAX_TICK_SECS,
        }
    }
}

/// Derives tick deltas from host timestamps.
#[derive(Debug, Clone, Copy, Default)]
struct HostClock {
    anchor: Option<f64>,
}

impl HostClock {
    /// Seconds since the previous timestamp. Zero right after a re-anchor.
    fn delta(&mut self, now_secs: f64) -> f64 {
        let delta = self.anchor.map_or(0.0, |anchor| now_secs - anchor);
        self.anchor = Some(now_secs);
        delta
    }

    fn reanchor(&mut self) {
        self.anchor = None;
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    pause_reason: Option<PauseReason>,
    rng: ChaCha8Rng,
    max_tick_secs: f64,
    clock: HostClock,
    command_queue: VecDeque<HostCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,

    config: ConfigRepository,
    spawn_areas: SpawnAreaRegistry,
    player: Option<Player>,
    scheduler: SpawnScheduler,
    progression: ProgressionController,
}

impl SimulationEngine {
    /// Create a new engine over a definition repository.
    pub fn new(sim: SimConfig, config: ConfigRepository) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            pause_reason: None,
            rng: ChaCha8Rng::seed_from_u64(sim.seed),
            max_tick_secs: sim.max_tick_secs.max(0.0),
            clock: HostClock::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config,
            spawn_areas: SpawnAreaRegistry::builtin(),
            player: None,
            scheduler: SpawnScheduler::default(),
            progression: ProgressionController::default(),
        }
    }

    /// Register additional spawn-area selectors.
    pub fn spawn_areas_mut(&mut self) -> &mut SpawnAreaRegistry {
        &mut self.spawn_areas
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: HostCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = HostCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();
        self.step(dt)
    }

    /// Advance the simulation to a host timestamp. The delta is measured
    /// against the previous call and is zero on the first tick after a
    /// start or resume.
    pub fn tick_at(&mut self, host_secs: f64) -> GameStateSnapshot {
        self.process_commands();
        let dt = self.clock.delta(host_secs);
        self.step(dt)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn pause_reason(&self) -> Option<PauseReason> {
        self.pause_reason
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &ConfigRepository {
        &self.config
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn kill_count(&self) -> u32 {
        self.progression.kill_count()
    }

    pub fn stage(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn upgrade_options(&self) -> &[UpgradeOption] {
        self.progression.options()
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn an enemy by id at a fixed position (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        enemy_id: &str,
        position: arena_core::types::Position,
    ) -> Option<hecs::Entity> {
        let def = self.config.enemy(enemy_id).ok()?;
        Some(crate::world_setup::spawn_enemy(&mut self.world, def, position))
    }

    /// Spawn a loot item by id at a fixed position (for testing).
    #[cfg(test)]
    pub fn spawn_test_loot(
        &mut self,
        item_id: &str,
        position: arena_core::types::Position,
        value: Option<f64>,
    ) -> Option<hecs::Entity> {
        let item = self.config.loot_item(item_id).ok()?;
        Some(crate::world_setup::spawn_loot(&mut self.world, item, position, value))
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::Start { hero_id } => {
                if matches!(self.phase, GamePhase::HeroSelection | GamePhase::GameOver) {
                    self.start_game(&hero_id);
                }
            }
            HostCommand::Pause { reason } => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                    self.pause_reason = Some(reason);
                    debug!(?reason, "paused");
                }
            }
            HostCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                    self.pause_reason = None;
                    self.clock.reanchor();
                    debug!("resumed");
                }
            }
            HostCommand::Restart => self.restart(),
            HostCommand::ChooseUpgrade { choice } => {
                if self.phase == GamePhase::ChoosingUpgrade {
                    self.choose_upgrade(&choice);
                }
            }
            HostCommand::SetMoveInput { x, y } => {
                if let Some(player) = self.player.as_mut() {
                    let input = DVec2::new(x, y);
                    player.move_input = if input.is_finite() { input } else { DVec2::ZERO };
                }
            }
            HostCommand::AdvanceStage => {
                if matches!(
                    self.phase,
                    GamePhase::Playing | GamePhase::Paused | GamePhase::ChoosingUpgrade
                ) {
                    self.scheduler.advance(&self.config, &mut self.events);
                }
            }
        }
    }

    /// Build the player from a hero definition and enter the first stage.
    /// An unknown hero leaves the engine untouched.
    fn start_game(&mut self, hero_id: &str) {
        let hero = match self.config.hero(hero_id) {
            Ok(hero) => hero,
            Err(err) => {
                warn!(%err, "cannot start game");
                return;
            }
        };

        self.world.clear();
        self.time = SimTime::default();
        self.progression = ProgressionController::default();
        self.events.clear();

        let mut player = Player::new(hero, self.config.initial_xp_threshold());
        if let Some(weapon_id) = &hero.initial_weapon {
            if let Err(err) =
                progression::acquire_weapon(&mut player, &self.config, &mut self.events, weapon_id)
            {
                warn!(%err, "initial weapon skipped");
            }
        }
        for skill_id in &hero.initial_skills {
            if let Err(err) =
                progression::acquire_skill(&mut player, &self.config, &mut self.events, skill_id)
            {
                warn!(%err, "initial skill skipped");
            }
        }
        player.recompute_stats();
        player.health.restore_full();
        self.events.push(GameEvent::HealthChanged {
            hp: player.health.hp,
            max_hp: player.health.max_hp,
        });
        self.events.push(GameEvent::ExperienceChanged {
            experience: player.experience,
            experience_to_next: player.experience_to_next,
            level: player.level,
        });
        self.player = Some(player);

        self.scheduler.start(&self.config, &mut self.events);
        self.phase = GamePhase::Playing;
        self.pause_reason = None;
        self.clock.reanchor();
        info!(hero_id, "game started");
    }

    /// Drop the run and return to hero selection.
    fn restart(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.player = None;
        self.scheduler = SpawnScheduler::default();
        self.progression = ProgressionController::default();
        self.events.clear();
        self.phase = GamePhase::HeroSelection;
        self.pause_reason = None;
        self.clock.reanchor();
        debug!("restarted");
    }

    fn choose_upgrade(&mut self, choice: &UpgradeChoice) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let health_before = (player.health.hp, player.health.max_hp);
        let mut ctx = ProgressionContext {
            player,
            world: &mut self.world,
            config: &self.config,
            rng: &mut self.rng,
            events: &mut self.events,
        };
        if let Err(err) = self.progression.choose(&mut ctx, choice) {
            warn!(%err, "upgrade choice rejected");
            return;
        }
        if self.progression.take_recompute() {
            ctx.player.recompute_stats();
        }
        let health = &ctx.player.health;
        if (health.hp, health.max_hp) != health_before {
            ctx.events.push(GameEvent::HealthChanged {
                hp: health.hp,
                max_hp: health.max_hp,
            });
        }
        if self.progression.pending_choices() == 0 {
            self.phase = GamePhase::Playing;
            self.clock.reanchor();
        }
    }

    /// Clamp the delta, run the systems while playing, and snapshot.
    fn step(&mut self, dt: f64) -> GameStateSnapshot {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.max_tick_secs)
        } else {
            0.0
        };

        if self.phase == GamePhase::Playing {
            self.time.advance(dt);
            self.run_systems(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.scheduler.state(),
            self.player.as_ref(),
            self.progression.options(),
            self.progression.kill_count(),
            events,
        )
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let health_before = (player.health.hp, player.health.max_hp);

        // 1. Spawn scheduling
        self.scheduler.update(
            &mut SpawnContext {
                world: &mut self.world,
                config: &self.config,
                areas: &mut self.spawn_areas,
                rng: &mut self.rng,
                events: &mut self.events,
            },
            dt,
        );
        // 2. Player movement
        systems::movement::move_player(player, dt);
        // 3. Weapon fire
        systems::weapons::run(&mut self.world, player, &mut self.rng, dt);
        // 4. Enemy behaviors
        systems::enemy_ai::run(&mut self.world, &self.config, player.position, dt);
        // 5. Projectile and melee integration
        systems::movement::run(&mut self.world, dt);
        // 6. Loot magnet
        systems::magnet::run(&mut self.world, player, dt);
        // 7. Collision resolution
        let combat = systems::collision::resolve(&mut self.world, player);
        // 8. Progression (XP, relic triggers, level-ups, loot drops)
        let player_died = self.progression.apply(
            &mut ProgressionContext {
                player: &mut *player,
                world: &mut self.world,
                config: &self.config,
                rng: &mut self.rng,
                events: &mut self.events,
            },
            combat,
        );
        // 9. Stat recompute
        if self.progression.take_recompute() {
            player.recompute_stats();
        }
        if (player.health.hp, player.health.max_hp) != health_before {
            self.events.push(GameEvent::HealthChanged {
                hp: player.health.hp,
                max_hp: player.health.max_hp,
            });
        }
        // 10. Cleanup (dead, spent, expired)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        if player_died {
            self.game_over();
        } else if self.progression.pending_choices() > 0 {
            self.phase = GamePhase::ChoosingUpgrade;
        }
    }

    fn game_over(&mut self) {
        let level = self.player.as_ref().map_or(0, |p| p.level);
        self.phase = GamePhase::GameOver;
        self.scheduler.stop();
        self.events.push(GameEvent::GameOver {
            survival_secs: self.time.elapsed_secs,
            kill_count: self.progression.kill_count(),
            level,
        });
        info!(
            survival_secs = self.time.elapsed_secs,
            kills = self.progression.kill_count(),
            level,
            "game over"
        );
    }
}
