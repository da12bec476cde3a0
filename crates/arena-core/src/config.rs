//! Read-only configuration repository.
//!
//! Definitions are supplied once at startup (built in code or loaded from
//! JSON) and passed by reference to everything that needs lookups.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_FIRST_XP_THRESHOLD, XP_THRESHOLD_GROWTH};
use crate::enums::*;
use crate::stats::{Modifier, StatBlock};

/// Which table a lookup went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefinitionKind {
    Hero,
    Enemy,
    Weapon,
    Skill,
    Relic,
    Level,
    LootItem,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DefinitionKind::Hero => "hero",
            DefinitionKind::Enemy => "enemy",
            DefinitionKind::Weapon => "weapon",
            DefinitionKind::Skill => "skill",
            DefinitionKind::Relic => "relic",
            DefinitionKind::Level => "level",
            DefinitionKind::LootItem => "loot item",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An id that no definition answers to. Callers log and skip.
    #[error("missing {kind} definition `{id}`")]
    MissingDefinition { kind: DefinitionKind, id: String },
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn missing(kind: DefinitionKind, id: impl Into<String>) -> Self {
        ConfigError::MissingDefinition {
            kind,
            id: id.into(),
        }
    }
}

// --- Heroes ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub stats: StatBlock,
    #[serde(default)]
    pub initial_weapon: Option<String>,
    #[serde(default)]
    pub initial_skills: Vec<String>,
}

// --- Enemies ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyStatsDef {
    pub max_hp: f64,
    /// Pixels per 60 Hz frame.
    pub move_speed: f64,
    pub attack_damage: f64,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub xp_value: Option<u32>,
    #[serde(default)]
    pub collision_damage: f64,
    #[serde(default)]
    pub attack_range: Option<f64>,
    #[serde(default)]
    pub attack_cooldown_secs: Option<f64>,
    /// Weapon definition supplying projectile speed and lifetime.
    #[serde(default)]
    pub projectile_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    pub stats: EnemyStatsDef,
    #[serde(default)]
    pub behavior: BehaviorKind,
    /// Item id to independent drop probability.
    #[serde(default)]
    pub loot_table: BTreeMap<String, f64>,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub is_elite: bool,
}

// --- Weapons ---

/// Stats for one weapon level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponLevelStats {
    pub level: u32,
    pub damage: f64,
    pub cooldown_secs: f64,
    #[serde(default = "one_u32")]
    pub projectiles: u32,
    /// Pixels per 60 Hz frame.
    #[serde(default)]
    pub projectile_speed: f64,
    pub duration_secs: f64,
    #[serde(default = "one_f64")]
    pub area: f64,
    #[serde(default)]
    pub pierce: u32,
    #[serde(default)]
    pub knockback: f64,
    #[serde(default)]
    pub effects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: WeaponKind,
    pub max_level: u32,
    pub level_stats: Vec<WeaponLevelStats>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl WeaponDef {
    pub fn stats_for_level(&self, level: u32) -> Option<&WeaponLevelStats> {
        self.level_stats.iter().find(|s| s.level == level)
    }

    /// Enemy-only projectile definitions are never offered as upgrades.
    pub fn is_player_weapon(&self) -> bool {
        !self.tags.iter().any(|t| t == "enemy")
    }
}

// --- Skills ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillLevel {
    pub level: u32,
    pub effects: Vec<Modifier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub max_level: u32,
    pub level_stats: Vec<SkillLevel>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SkillDef {
    pub fn modifiers_for_level(&self, level: u32) -> Option<&[Modifier]> {
        self.level_stats
            .iter()
            .find(|l| l.level == level)
            .map(|l| l.effects.as_slice())
    }
}

// --- Relics ---

/// Gate on a triggered effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectCondition {
    /// Fire once every `threshold` trigger events, then reset.
    Counter { counter_id: String, threshold: u32 },
}

/// What a relic effect does when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RelicAction {
    /// Passive stat modifier (or a permanent boost when triggered).
    ModifyStat { modifier: Modifier },
    Heal { amount: f64 },
    /// Apply `count` boosts picked at random from `possible_stats`.
    RandomStatBoost {
        possible_stats: Vec<Modifier>,
        count: u32,
    },
    /// Drop an item; `xp_amount` overrides an orb's value.
    SpawnLoot {
        item_id: String,
        #[serde(default)]
        xp_amount: Option<u32>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelicEffect {
    pub trigger: Trigger,
    /// Independent probability rolled each time the trigger fires.
    #[serde(default)]
    pub chance: Option<f64>,
    #[serde(default)]
    pub condition: Option<EffectCondition>,
    pub action: RelicAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelicDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rarity: Rarity,
    pub effects: Vec<RelicEffect>,
}

// --- Level timeline ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnGroupDef {
    pub enemy_id: String,
    /// Total spawn budget. `None` spawns for as long as the level runs.
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub spawn_delay_secs: f64,
    #[serde(default)]
    pub spawn_interval_secs: Option<f64>,
    /// Concurrent-alive cap for this enemy type.
    #[serde(default)]
    pub max_alive: Option<u32>,
    /// Spawn-area selector key.
    #[serde(default)]
    pub spawn_area: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossDef {
    pub enemy_id: String,
    /// Seconds into the level.
    pub trigger_secs: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelDef {
    /// XP needed to leave this player level.
    #[serde(default)]
    pub xp_needed: Option<u32>,
    #[serde(default)]
    pub duration_secs: Option<f64>,
    #[serde(default)]
    pub enemy_groups: Vec<SpawnGroupDef>,
    #[serde(default)]
    pub boss: Option<BossDef>,
    #[serde(default)]
    pub completion: LevelCompletion,
}

// --- Loot items ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootItemDef {
    pub id: String,
    pub kind: LootKind,
    pub value: f64,
}

/// All definitions, keyed by id. Ordered maps keep iteration deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRepository {
    pub heroes: BTreeMap<String, HeroDef>,
    pub enemies: BTreeMap<String, EnemyDef>,
    pub weapons: BTreeMap<String, WeaponDef>,
    pub skills: BTreeMap<String, SkillDef>,
    pub relics: BTreeMap<String, RelicDef>,
    pub levels: BTreeMap<u32, LevelDef>,
    pub loot_items: BTreeMap<String, LootItemDef>,
}

impl ConfigRepository {
    /// Parse a repository from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn hero(&self, id: &str) -> Result<&HeroDef, ConfigError> {
        self.heroes
            .get(id)
            .ok_or_else(|| ConfigError::missing(DefinitionKind::Hero, id))
    }

    pub fn enemy(&self, id: &str) -> Result<&EnemyDef, ConfigError> {
        self.enemies
            .get(id)
            .ok_or_else(|| ConfigError::missing(DefinitionKind::Enemy, id))
    }

    pub fn weapon(&self, id: &str) -> Result<&WeaponDef, ConfigError> {
        self.weapons
            .get(id)
            .ok_or_else(|| ConfigError::missing(DefinitionKind::Weapon, id))
    }

    pub fn skill(&self, id: &str) -> Result<&SkillDef, ConfigError> {
        self.skills
            .get(id)
            .ok_or_else(|| ConfigError::missing(DefinitionKind::Skill, id))
    }

    pub fn relic(&self, id: &str) -> Result<&RelicDef, ConfigError> {
        self.relics
            .get(id)
            .ok_or_else(|| ConfigError::missing(DefinitionKind::Relic, id))
    }

    pub fn loot_item(&self, id: &str) -> Result<&LootItemDef, ConfigError> {
        self.loot_items
            .get(id)
            .ok_or_else(|| ConfigError::missing(DefinitionKind::LootItem, id))
    }

    pub fn level(&self, level: u32) -> Result<&LevelDef, ConfigError> {
        self.levels
            .get(&level)
            .ok_or_else(|| ConfigError::missing(DefinitionKind::Level, level.to_string()))
    }

    /// First configured timeline level.
    pub fn first_level(&self) -> Option<u32> {
        self.levels.keys().next().copied()
    }

    /// Next configured timeline level after `level`.
    pub fn next_level_after(&self, level: u32) -> Option<u32> {
        let start = level.checked_add(1)?;
        self.levels.range(start..).next().map(|(k, _)| *k)
    }

    /// Threshold for leaving player level 1.
    pub fn initial_xp_threshold(&self) -> u32 {
        self.levels
            .get(&1)
            .and_then(|l| l.xp_needed)
            .unwrap_or(DEFAULT_FIRST_XP_THRESHOLD)
            .max(1)
    }

    /// Threshold for leaving `level`, falling back to growth over `previous`.
    pub fn xp_threshold(&self, level: u32, previous: u32) -> u32 {
        let threshold = match self.levels.get(&level).and_then(|l| l.xp_needed) {
            Some(needed) => needed,
            None => (previous as f64 * XP_THRESHOLD_GROWTH).floor() as u32,
        };
        threshold.max(1)
    }
}

fn one_u32() -> u32 {
    1
}

fn one_f64() -> f64 {
    1.0
}
