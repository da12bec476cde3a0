//! Progression controller: experience, level-ups, relic triggers, and the
//! upgrade choice loop.
//!
//! Consumes the combat events produced by collision resolution. Stat changes
//! only set a recompute flag; the engine reruns the stat pipeline once per
//! tick after progression has run.

use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, warn};

use arena_core::commands::{StatBoostToken, UpgradeChoice};
use arena_core::config::{ConfigError, ConfigRepository, EffectCondition, RelicAction};
use arena_core::constants::*;
use arena_core::enums::{SourceKind, Trigger};
use arena_core::events::GameEvent;
use arena_core::state::UpgradeOption;
use arena_core::stats::{Modifier, ModifierSource};
use arena_core::types::Position;

use crate::loot::{self, LootEffect, LootSpawnRequest};
use crate::player::{OwnedSkill, Player, TriggeredEffect, WeaponInstance};
use crate::systems::collision::CombatEvent;

/// Why an acquisition was refused. The player is left unchanged.
#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0:?} is not among the offered upgrades")]
    NotOffered(UpgradeChoice),
    #[error("weapon {0} is already at max level")]
    WeaponMaxed(String),
    #[error("no free weapon slot for {0}")]
    WeaponSlotsFull(String),
    #[error("skill {0} is already at max level")]
    SkillMaxed(String),
    #[error("relic {0} is already owned")]
    RelicOwned(String),
    #[error("{id} has no stats for level {level}")]
    MissingLevelStats { id: String, level: u32 },
}

/// Everything progression reads or mutates during a tick.
pub struct ProgressionContext<'a> {
    pub player: &'a mut Player,
    pub world: &'a mut World,
    pub config: &'a ConfigRepository,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<GameEvent>,
}

#[derive(Debug, Clone, Default)]
pub struct ProgressionController {
    kill_count: u32,
    /// Level-ups whose upgrade choice has not been made yet.
    pending_choices: u32,
    options: Vec<UpgradeOption>,
    needs_recompute: bool,
}

impl ProgressionController {
    pub fn kill_count(&self) -> u32 {
        self.kill_count
    }

    pub fn pending_choices(&self) -> u32 {
        self.pending_choices
    }

    pub fn options(&self) -> &[UpgradeOption] {
        &self.options
    }

    /// Returns and clears the stat-recompute flag.
    pub fn take_recompute(&mut self) -> bool {
        std::mem::take(&mut self.needs_recompute)
    }

    /// Apply one tick of combat events. Returns true when the player died.
    pub fn apply(&mut self, ctx: &mut ProgressionContext<'_>, combat: Vec<CombatEvent>) -> bool {
        let mut player_died = false;
        for event in combat {
            match event {
                CombatEvent::EnemyKilled {
                    entity: _,
                    enemy_id,
                    position,
                    xp_value,
                    is_elite,
                    is_boss,
                } => {
                    self.kill_count += 1;
                    ctx.events.push(GameEvent::EnemyKilled {
                        enemy_id: enemy_id.clone(),
                        position,
                        is_elite,
                        is_boss,
                    });
                    self.collect_experience(ctx, xp_value);
                    match ctx.config.enemy(&enemy_id) {
                        Ok(def) => {
                            let drops = loot::roll_drops(&def.loot_table, position, ctx.rng);
                            loot::spawn_requests(ctx.world, ctx.config, &drops);
                        }
                        Err(err) => warn!(%err, "no loot table for killed enemy"),
                    }
                    if is_elite || is_boss {
                        self.fire_triggered(ctx, Trigger::OnEliteOrBossKill, position);
                    }
                }
                CombatEvent::PlayerDamaged { .. } => {}
                CombatEvent::PlayerKilled => {
                    player_died = true;
                    ctx.events.push(GameEvent::PlayerDied);
                }
                CombatEvent::LootCollected {
                    item_id,
                    kind,
                    value,
                } => {
                    ctx.events.push(GameEvent::LootCollected {
                        item_id,
                        kind,
                        value,
                    });
                    match loot::on_collect(kind, value) {
                        LootEffect::GainExperience(amount) => self.collect_experience(ctx, amount),
                        LootEffect::Heal(amount) => {
                            ctx.player.heal(amount);
                        }
                    }
                }
            }
        }

        if self.pending_choices > 0 && self.options.is_empty() {
            self.generate_options(ctx.player, ctx.config, ctx.rng);
        }
        player_died
    }

    /// Add experience, fire `OnXpCollect` effects, and level up as many
    /// times as the total allows.
    pub fn collect_experience(&mut self, ctx: &mut ProgressionContext<'_>, amount: u32) {
        if amount == 0 || !ctx.player.is_alive() {
            return;
        }
        ctx.player.experience = ctx.player.experience.saturating_add(amount);
        let origin = ctx.player.position;
        self.fire_triggered(ctx, Trigger::OnXpCollect, origin);

        while ctx.player.experience >= ctx.player.experience_to_next {
            self.level_up(ctx);
        }
        ctx.events.push(GameEvent::ExperienceChanged {
            experience: ctx.player.experience,
            experience_to_next: ctx.player.experience_to_next,
            level: ctx.player.level,
        });
    }

    fn level_up(&mut self, ctx: &mut ProgressionContext<'_>) {
        let player = &mut *ctx.player;
        player.experience -= player.experience_to_next;
        player.level += 1;
        player.experience_to_next = ctx
            .config
            .xp_threshold(player.level, player.experience_to_next);
        player.health.restore_full();
        debug!(
            level = player.level,
            next = player.experience_to_next,
            "player level up"
        );

        let origin = ctx.player.position;
        self.fire_triggered(ctx, Trigger::OnLevelUp, origin);
        self.needs_recompute = true;
        self.pending_choices += 1;
        ctx.events.push(GameEvent::LevelUp {
            level: ctx.player.level,
        });
    }

    /// Run every registered effect for `trigger`, honoring counters and
    /// independent chance rolls. Spawned loot lands around `origin`.
    fn fire_triggered(
        &mut self,
        ctx: &mut ProgressionContext<'_>,
        trigger: Trigger,
        origin: Position,
    ) {
        let effects: Vec<TriggeredEffect> = ctx
            .player
            .triggered_effects
            .iter()
            .filter(|t| t.effect.trigger == trigger)
            .cloned()
            .collect();

        for TriggeredEffect { relic_id, effect } in effects {
            if let Some(EffectCondition::Counter {
                counter_id,
                threshold,
            }) = &effect.condition
            {
                let counter = ctx.player.counters.entry(counter_id.clone()).or_insert(0);
                *counter += 1;
                if *counter < *threshold {
                    continue;
                }
                *counter = 0;
            }
            if let Some(chance) = effect.chance {
                if !(chance > 0.0) || !ctx.rng.gen_bool(chance.min(1.0)) {
                    continue;
                }
            }
            ctx.events.push(GameEvent::RelicTriggered {
                relic_id: relic_id.clone(),
                trigger,
            });
            self.run_action(ctx, &relic_id, &effect.action, origin);
        }
    }

    fn run_action(
        &mut self,
        ctx: &mut ProgressionContext<'_>,
        relic_id: &str,
        action: &RelicAction,
        origin: Position,
    ) {
        match action {
            RelicAction::ModifyStat { modifier } => self.permanent_boost(ctx, modifier),
            RelicAction::Heal { amount } => {
                ctx.player.heal(*amount);
            }
            RelicAction::RandomStatBoost {
                possible_stats,
                count,
            } => {
                for _ in 0..*count {
                    let Some(modifier) = possible_stats.choose(ctx.rng).copied() else {
                        warn!(relic_id, "random stat boost has no candidates");
                        break;
                    };
                    self.permanent_boost(ctx, &modifier);
                }
            }
            RelicAction::SpawnLoot { item_id, xp_amount } => {
                let request = LootSpawnRequest {
                    item_id: item_id.clone(),
                    position: loot::jitter(origin, ctx.rng),
                    value: xp_amount.map(f64::from),
                };
                loot::spawn_requests(ctx.world, ctx.config, &[request]);
            }
        }
    }

    fn permanent_boost(&mut self, ctx: &mut ProgressionContext<'_>, modifier: &Modifier) {
        let player = &mut *ctx.player;
        match player.boosts.apply(&player.hero_base, modifier) {
            Ok(amount) => {
                self.needs_recompute = true;
                ctx.events.push(GameEvent::PermanentBoost {
                    stat: modifier.stat,
                    amount,
                });
            }
            Err(err) => warn!(%err, "permanent boost skipped"),
        }
    }

    // --- Upgrade choice ---

    /// Pick up to three distinct weighted options, or the recover-health
    /// token when nothing can be offered.
    pub fn generate_options(
        &mut self,
        player: &Player,
        config: &ConfigRepository,
        rng: &mut ChaCha8Rng,
    ) {
        let candidates = upgrade_candidates(player, config);
        let picked: Vec<UpgradeOption> = candidates
            .choose_multiple_weighted(rng, UPGRADE_OPTION_COUNT, |(_, weight)| *weight)
            .map(|iter| iter.map(|(option, _)| option.clone()).collect())
            .unwrap_or_default();

        self.options = if picked.is_empty() {
            vec![recover_health_option()]
        } else {
            picked
        };
    }

    /// Apply a chosen upgrade. On success one pending choice is consumed and
    /// the next set of options is rolled if more remain.
    pub fn choose(
        &mut self,
        ctx: &mut ProgressionContext<'_>,
        choice: &UpgradeChoice,
    ) -> Result<(), UpgradeError> {
        if self.pending_choices == 0 || !self.options.iter().any(|o| &o.choice == choice) {
            return Err(UpgradeError::NotOffered(choice.clone()));
        }

        match choice {
            UpgradeChoice::Weapon(id) => acquire_weapon(ctx.player, ctx.config, ctx.events, id)?,
            UpgradeChoice::Skill(id) => acquire_skill(ctx.player, ctx.config, ctx.events, id)?,
            UpgradeChoice::Relic(id) => acquire_relic(ctx.player, ctx.config, ctx.events, id)?,
            UpgradeChoice::StatBoost(StatBoostToken::RecoverHealth) => {
                let amount = ctx.player.health.max_hp * RECOVER_HEALTH_FRACTION;
                ctx.player.heal(amount);
            }
        }
        self.needs_recompute = true;
        self.pending_choices -= 1;
        self.options.clear();
        if self.pending_choices > 0 {
            self.generate_options(ctx.player, ctx.config, ctx.rng);
        }
        Ok(())
    }
}

fn recover_health_option() -> UpgradeOption {
    UpgradeOption {
        choice: UpgradeChoice::StatBoost(StatBoostToken::RecoverHealth),
        name: "Recover Health".into(),
        description: "Restore 10% of maximum health.".into(),
        next_level: 1,
        is_new: false,
    }
}

/// Every currently offerable upgrade with its selection weight, in
/// deterministic order.
fn upgrade_candidates(player: &Player, config: &ConfigRepository) -> Vec<(UpgradeOption, u32)> {
    let mut candidates = Vec::new();

    for weapon in &player.weapons {
        let Ok(def) = config.weapon(&weapon.weapon_id) else {
            continue;
        };
        if !weapon.is_max_level() && def.stats_for_level(weapon.level + 1).is_some() {
            candidates.push((
                UpgradeOption {
                    choice: UpgradeChoice::Weapon(def.id.clone()),
                    name: def.name.clone(),
                    description: def.description.clone(),
                    next_level: weapon.level + 1,
                    is_new: false,
                },
                WEIGHT_WEAPON_UPGRADE,
            ));
        }
    }

    if player.weapons.len() < MAX_WEAPONS {
        for def in config.weapons.values() {
            if player.weapon(&def.id).is_some()
                || !def.is_player_weapon()
                || def.stats_for_level(1).is_none()
            {
                continue;
            }
            candidates.push((
                UpgradeOption {
                    choice: UpgradeChoice::Weapon(def.id.clone()),
                    name: def.name.clone(),
                    description: def.description.clone(),
                    next_level: 1,
                    is_new: true,
                },
                WEIGHT_NEW_WEAPON,
            ));
        }
    }

    for def in config.skills.values() {
        let next_level = match player.skill(&def.id) {
            Some(owned) if owned.level >= owned.max_level => continue,
            Some(owned) => owned.level + 1,
            None => 1,
        };
        if def.modifiers_for_level(next_level).is_none() {
            continue;
        }
        candidates.push((
            UpgradeOption {
                choice: UpgradeChoice::Skill(def.id.clone()),
                name: def.name.clone(),
                description: def.description.clone(),
                next_level,
                is_new: next_level == 1,
            },
            WEIGHT_SKILL,
        ));
    }

    if player.relics.len() < MAX_RELICS_OFFERED {
        for def in config.relics.values() {
            if player.has_relic(&def.id) {
                continue;
            }
            candidates.push((
                UpgradeOption {
                    choice: UpgradeChoice::Relic(def.id.clone()),
                    name: def.name.clone(),
                    description: def.description.clone(),
                    next_level: 1,
                    is_new: true,
                },
                WEIGHT_RELIC,
            ));
        }
    }

    candidates
}

// --- Acquisition ---

/// Add a weapon at level 1, or level up an owned one.
pub fn acquire_weapon(
    player: &mut Player,
    config: &ConfigRepository,
    events: &mut Vec<GameEvent>,
    weapon_id: &str,
) -> Result<(), UpgradeError> {
    let def = config.weapon(weapon_id)?;
    match player.weapon_mut(weapon_id) {
        Some(weapon) => {
            if weapon.is_max_level() {
                return Err(UpgradeError::WeaponMaxed(weapon_id.to_string()));
            }
            let next = weapon.level + 1;
            if !weapon.level_up(def) {
                return Err(UpgradeError::MissingLevelStats {
                    id: weapon_id.to_string(),
                    level: next,
                });
            }
        }
        None => {
            if player.weapons.len() >= MAX_WEAPONS {
                return Err(UpgradeError::WeaponSlotsFull(weapon_id.to_string()));
            }
            let weapon =
                WeaponInstance::new(def).ok_or_else(|| UpgradeError::MissingLevelStats {
                    id: weapon_id.to_string(),
                    level: 1,
                })?;
            player.weapons.push(weapon);
        }
    }
    events.push(GameEvent::WeaponsChanged {
        weapons: player.weapon_views(),
    });
    Ok(())
}

/// Add a skill at level 1, or level up an owned one. The skill's modifier
/// source always holds the current level's row.
pub fn acquire_skill(
    player: &mut Player,
    config: &ConfigRepository,
    events: &mut Vec<GameEvent>,
    skill_id: &str,
) -> Result<(), UpgradeError> {
    let def = config.skill(skill_id)?;
    let level = match player.skill(skill_id) {
        Some(owned) if owned.level >= owned.max_level => {
            return Err(UpgradeError::SkillMaxed(skill_id.to_string()))
        }
        Some(owned) => owned.level + 1,
        None => 1,
    };
    let modifiers = def
        .modifiers_for_level(level)
        .ok_or_else(|| UpgradeError::MissingLevelStats {
            id: skill_id.to_string(),
            level,
        })?
        .to_vec();

    match player.skills.iter_mut().find(|s| s.skill_id == skill_id) {
        Some(owned) => owned.level = level,
        None => player.skills.push(OwnedSkill {
            skill_id: skill_id.to_string(),
            level,
            max_level: def.max_level.max(1),
        }),
    }
    match player
        .modifier_sources
        .iter_mut()
        .find(|s| s.kind == SourceKind::Skill && s.id == skill_id)
    {
        Some(source) => source.modifiers = modifiers,
        None => player.modifier_sources.push(ModifierSource {
            id: skill_id.to_string(),
            kind: SourceKind::Skill,
            modifiers,
        }),
    }
    events.push(GameEvent::SkillsChanged {
        skills: player.skill_views(),
    });
    Ok(())
}

/// Take ownership of a relic: passive stat modifiers become a modifier
/// source, everything else is registered under its trigger.
pub fn acquire_relic(
    player: &mut Player,
    config: &ConfigRepository,
    events: &mut Vec<GameEvent>,
    relic_id: &str,
) -> Result<(), UpgradeError> {
    let def = config.relic(relic_id)?;
    if player.has_relic(relic_id) {
        return Err(UpgradeError::RelicOwned(relic_id.to_string()));
    }

    let mut passives = Vec::new();
    for effect in &def.effects {
        match (&effect.trigger, &effect.action) {
            (Trigger::Passive, RelicAction::ModifyStat { modifier }) => passives.push(*modifier),
            (Trigger::Passive, action) => {
                warn!(relic_id, ?action, "passive relic effect is not a stat modifier");
            }
            _ => player.triggered_effects.push(TriggeredEffect {
                relic_id: relic_id.to_string(),
                effect: effect.clone(),
            }),
        }
    }
    if !passives.is_empty() {
        player.modifier_sources.push(ModifierSource {
            id: relic_id.to_string(),
            kind: SourceKind::Relic,
            modifiers: passives,
        });
    }
    player.relics.push(relic_id.to_string());
    events.push(GameEvent::RelicsChanged {
        relics: player.relics.clone(),
    });
    Ok(())
}
