//! Spawn scheduler: per-level, per-group timers that create enemies and
//! trigger the level's boss.
//!
//! `Idle -> LevelActive(n) -> LevelComplete(n) -> LevelActive(next) | Finished`.
//! All timers consume the tick delta.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use arena_core::components::{Enemy, Health};
use arena_core::config::{ConfigRepository, LevelDef, SpawnGroupDef};
use arena_core::constants::*;
use arena_core::enums::{LevelCompletion, SchedulerState};
use arena_core::events::GameEvent;
use arena_core::types::Position;

use crate::spawn_area::SpawnAreaRegistry;
use crate::world_setup;

/// Runtime state of one spawn group.
#[derive(Debug, Clone)]
pub struct GroupState {
    pub enemy_id: String,
    /// Total budget; `None` is unlimited.
    pub budget: Option<u32>,
    pub spawned: u32,
    /// Seconds until the next attempt.
    pub timer_secs: f64,
    pub interval_secs: f64,
    pub max_alive: Option<u32>,
    pub spawn_area: Option<String>,
}

impl GroupState {
    fn from_def(def: &SpawnGroupDef) -> Self {
        Self {
            enemy_id: def.enemy_id.clone(),
            budget: def.count,
            spawned: 0,
            timer_secs: def.spawn_delay_secs.max(0.0),
            interval_secs: def
                .spawn_interval_secs
                .unwrap_or(DEFAULT_SPAWN_INTERVAL_SECS),
            max_alive: def.max_alive,
            spawn_area: def.spawn_area.clone(),
        }
    }

    pub fn has_budget(&self) -> bool {
        self.budget.map_or(true, |budget| self.spawned < budget)
    }
}

/// Boss lifecycle for the active level.
#[derive(Debug, Clone, PartialEq)]
pub enum BossStatus {
    /// Level has no boss.
    None,
    Pending { enemy_id: String, trigger_secs: f64 },
    Spawned(Entity),
    Defeated,
    /// Definition missing or not a boss; not retried.
    Skipped,
}

/// Everything a scheduler update needs from the engine.
pub struct SpawnContext<'a> {
    pub world: &'a mut World,
    pub config: &'a ConfigRepository,
    pub areas: &'a mut SpawnAreaRegistry,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<GameEvent>,
}

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    state: SchedulerState,
    groups: Vec<GroupState>,
    boss: BossStatus,
    time_into_level: f64,
    duration_secs: Option<f64>,
    completion: LevelCompletion,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self {
            state: SchedulerState::Idle,
            groups: Vec::new(),
            boss: BossStatus::None,
            time_into_level: 0.0,
            duration_secs: None,
            completion: LevelCompletion::Manual,
        }
    }
}

impl SpawnScheduler {
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn groups(&self) -> &[GroupState] {
        &self.groups
    }

    pub fn boss(&self) -> &BossStatus {
        &self.boss
    }

    pub fn time_into_level(&self) -> f64 {
        self.time_into_level
    }

    /// Enter the first configured level, or finish at once if there is none.
    pub fn start(&mut self, config: &ConfigRepository, events: &mut Vec<GameEvent>) {
        *self = Self::default();
        match config.first_level() {
            Some(level) => self.enter_level(level, config, events),
            None => self.finish(events),
        }
    }

    /// Stop spawning for good (game over).
    pub fn stop(&mut self) {
        self.state = SchedulerState::Finished;
        self.groups.clear();
    }

    /// Complete the active level and move to the next configured one.
    pub fn advance(&mut self, config: &ConfigRepository, events: &mut Vec<GameEvent>) {
        let current = match self.state {
            SchedulerState::LevelActive(n) => {
                events.push(GameEvent::StageCompleted { stage: n });
                n
            }
            SchedulerState::LevelComplete(n) => n,
            SchedulerState::Idle | SchedulerState::Finished => return,
        };
        match config.next_level_after(current) {
            Some(next) => self.enter_level(next, config, events),
            None => self.finish(events),
        }
    }

    /// Run one tick of scheduling.
    pub fn update(&mut self, ctx: &mut SpawnContext<'_>, dt: f64) {
        let SchedulerState::LevelActive(level) = self.state else {
            return;
        };
        self.time_into_level += dt;

        for group in &mut self.groups {
            run_group(group, ctx, dt);
        }
        self.update_boss(ctx);

        if self.level_complete(ctx.world) {
            debug!(level, "level complete");
            self.state = SchedulerState::LevelComplete(level);
            ctx.events.push(GameEvent::StageCompleted { stage: level });
            self.advance(ctx.config, ctx.events);
        }
    }

    fn enter_level(&mut self, level: u32, config: &ConfigRepository, events: &mut Vec<GameEvent>) {
        let def: &LevelDef = match config.level(level) {
            Ok(def) => def,
            Err(err) => {
                warn!(%err, "cannot enter level");
                self.finish(events);
                return;
            }
        };
        self.groups = def.enemy_groups.iter().map(GroupState::from_def).collect();
        self.boss = match &def.boss {
            Some(boss) => BossStatus::Pending {
                enemy_id: boss.enemy_id.clone(),
                trigger_secs: boss.trigger_secs,
            },
            None => BossStatus::None,
        };
        self.time_into_level = 0.0;
        self.duration_secs = def.duration_secs;
        self.completion = def.completion;
        self.state = SchedulerState::LevelActive(level);
        debug!(level, groups = self.groups.len(), "level started");
        events.push(GameEvent::StageStarted { stage: level });
    }

    fn finish(&mut self, events: &mut Vec<GameEvent>) {
        self.state = SchedulerState::Finished;
        self.groups.clear();
        events.push(GameEvent::AllStagesCleared);
    }

    fn update_boss(&mut self, ctx: &mut SpawnContext<'_>) {
        match &self.boss {
            BossStatus::Pending {
                enemy_id,
                trigger_secs,
            } => {
                if self.time_into_level >= *trigger_secs {
                    let enemy_id = enemy_id.clone();
                    self.boss = spawn_boss(enemy_id, ctx);
                }
            }
            BossStatus::Spawned(entity) => {
                let alive = ctx
                    .world
                    .get::<&Health>(*entity)
                    .map(|h| h.alive)
                    .unwrap_or(false);
                if !alive {
                    self.boss = BossStatus::Defeated;
                }
            }
            BossStatus::None | BossStatus::Defeated | BossStatus::Skipped => {}
        }
    }

    fn level_complete(&self, world: &World) -> bool {
        let duration_elapsed = self
            .duration_secs
            .is_some_and(|d| self.time_into_level >= d);
        // A skipped boss can never be fought, so it does not hold the level.
        let boss_defeated = match &self.boss {
            BossStatus::Defeated | BossStatus::Skipped => true,
            BossStatus::Spawned(entity) => !world.contains(*entity),
            _ => false,
        };
        match self.completion {
            LevelCompletion::Manual => false,
            LevelCompletion::AfterDuration => duration_elapsed,
            LevelCompletion::BossDefeated => boss_defeated,
            LevelCompletion::AfterDurationOrBossDefeated => duration_elapsed || boss_defeated,
        }
    }
}

fn run_group(group: &mut GroupState, ctx: &mut SpawnContext<'_>, dt: f64) {
    if !group.has_budget() {
        return;
    }
    group.timer_secs -= dt;
    if group.timer_secs > 0.0 {
        return;
    }

    let def = match ctx.config.enemy(&group.enemy_id) {
        Ok(def) => def,
        Err(err) => {
            warn!(%err, "skipping spawn");
            group.timer_secs = group.interval_secs;
            return;
        }
    };

    if let Some(cap) = group.max_alive {
        if count_alive(ctx.world, &group.enemy_id) >= cap {
            group.timer_secs = SPAWN_RETRY_DELAY_SECS;
            return;
        }
    }

    let position = ctx.areas.select(group.spawn_area.as_deref(), ctx.rng);
    world_setup::spawn_enemy(ctx.world, def, position);
    group.spawned += 1;
    group.timer_secs = group.interval_secs;
}

fn spawn_boss(enemy_id: String, ctx: &mut SpawnContext<'_>) -> BossStatus {
    let def = match ctx.config.enemy(&enemy_id) {
        Ok(def) if def.is_boss => def,
        Ok(_) => {
            warn!(enemy_id = %enemy_id, "boss id does not name a boss, skipping");
            return BossStatus::Skipped;
        }
        Err(err) => {
            warn!(%err, "skipping boss spawn");
            return BossStatus::Skipped;
        }
    };
    let entity = world_setup::spawn_enemy(
        ctx.world,
        def,
        Position::new(BOSS_SPAWN_X, BOSS_SPAWN_Y),
    );
    ctx.events.push(GameEvent::BossSpawned {
        enemy_id,
        name: def.name.clone(),
    });
    BossStatus::Spawned(entity)
}

/// Living enemies of a given definition.
pub fn count_alive(world: &World, enemy_id: &str) -> u32 {
    let mut query = world.query::<(&Enemy, &Health)>();
    query
        .iter()
        .filter(|(_, (enemy, health))| health.alive && enemy.def_id == enemy_id)
        .count() as u32
}
