//! The player actor and its owned equipment.
//!
//! The player is a singleton owned by the engine rather than an ECS entity:
//! progression touches most of its state at once.

use std::collections::BTreeMap;

use glam::DVec2;

use arena_core::components::{DamageOutcome, Health};
use arena_core::config::{HeroDef, RelicEffect, WeaponDef, WeaponLevelStats};
use arena_core::constants::*;
use arena_core::enums::WeaponKind;
use arena_core::state::{PlayerView, SkillView, WeaponView};
use arena_core::stats::{recompute, CurrentStats, ModifierSource, PermanentBoosts, StatBlock};
use arena_core::types::{Aabb, HalfExtents, Position, Velocity};

/// An owned weapon at a specific level.
#[derive(Debug, Clone)]
pub struct WeaponInstance {
    pub weapon_id: String,
    pub kind: WeaponKind,
    pub level: u32,
    pub max_level: u32,
    /// Stats row for `level`.
    pub stats: WeaponLevelStats,
    /// Seconds until the next attack. Ready at zero.
    pub cooldown_remaining: f64,
}

impl WeaponInstance {
    /// Level-1 instance, or `None` when the definition has no level-1 row.
    pub fn new(def: &WeaponDef) -> Option<Self> {
        let stats = def.stats_for_level(1)?.clone();
        Some(Self {
            weapon_id: def.id.clone(),
            kind: def.kind,
            level: 1,
            max_level: def.max_level.max(1),
            stats,
            cooldown_remaining: 0.0,
        })
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= self.max_level
    }

    /// Advance one level. Refused at max level or when the next row is missing.
    pub fn level_up(&mut self, def: &WeaponDef) -> bool {
        if self.is_max_level() {
            return false;
        }
        match def.stats_for_level(self.level + 1) {
            Some(stats) => {
                self.level += 1;
                self.stats = stats.clone();
                true
            }
            None => false,
        }
    }

    /// Effective cooldown after the player's cooldown multiplier and floor.
    pub fn effective_cooldown(&self, stats: &StatBlock) -> f64 {
        (self.stats.cooldown_secs * stats.cooldown).max(MIN_WEAPON_COOLDOWN_SECS)
    }

    /// Projectiles per attack after the player's bonus and floor.
    pub fn effective_projectiles(&self, stats: &StatBlock) -> u32 {
        let total = self.stats.projectiles as f64 + stats.projectiles.floor();
        (total.max(0.0) as u32).max(MIN_PROJECTILES)
    }

    pub fn view(&self) -> WeaponView {
        WeaponView {
            weapon_id: self.weapon_id.clone(),
            level: self.level,
            max_level: self.max_level,
        }
    }
}

/// An owned passive skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedSkill {
    pub skill_id: String,
    pub level: u32,
    pub max_level: u32,
}

impl OwnedSkill {
    pub fn view(&self) -> SkillView {
        SkillView {
            skill_id: self.skill_id.clone(),
            level: self.level,
            max_level: self.max_level,
        }
    }
}

/// A non-passive relic effect registered under its trigger.
#[derive(Debug, Clone)]
pub struct TriggeredEffect {
    pub relic_id: String,
    pub effect: RelicEffect,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub hero_id: String,
    pub position: Position,
    pub half_extents: HalfExtents,
    /// Last non-zero movement direction (unit vector).
    pub facing: DVec2,
    /// Movement direction requested by the host.
    pub move_input: DVec2,
    pub health: Health,

    // --- Stats ---
    pub hero_base: StatBlock,
    pub boosts: PermanentBoosts,
    /// Relic and skill sources in acquisition order.
    pub modifier_sources: Vec<ModifierSource>,
    pub current: CurrentStats,

    // --- Progression ---
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,

    // --- Loadout ---
    pub weapons: Vec<WeaponInstance>,
    pub skills: Vec<OwnedSkill>,
    pub relics: Vec<String>,
    pub triggered_effects: Vec<TriggeredEffect>,
    pub counters: BTreeMap<String, u32>,
}

impl Player {
    /// Fresh level-1 player at the arena center with no equipment.
    pub fn new(hero: &HeroDef, first_threshold: u32) -> Self {
        let hero_base = hero.stats;
        let boosts = PermanentBoosts::new(&hero_base);
        let current = recompute(&hero_base, &boosts, &[]);
        Self {
            hero_id: hero.id.clone(),
            position: Position::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            half_extents: HalfExtents::from_size(PLAYER_SIZE, PLAYER_SIZE),
            facing: DVec2::Y,
            move_input: DVec2::ZERO,
            health: Health::new(current.stats.max_hp),
            hero_base,
            boosts,
            modifier_sources: Vec::new(),
            current,
            level: 1,
            experience: 0,
            experience_to_next: first_threshold,
            weapons: Vec::new(),
            skills: Vec::new(),
            relics: Vec::new(),
            triggered_effects: Vec::new(),
            counters: BTreeMap::new(),
        }
    }

    /// Rerun the stat pipeline and clamp health to the new maximum.
    pub fn recompute_stats(&mut self) {
        self.current = recompute(&self.hero_base, &self.boosts, &self.modifier_sources);
        self.health.set_max_hp(self.current.stats.max_hp);
    }

    /// Damage intake using current defense and the damage-taken multiplier.
    pub fn take_damage(&mut self, raw: f64) -> DamageOutcome {
        self.health.take_damage(
            raw,
            self.current.stats.defense,
            self.current.damage_taken_multiplier,
        )
    }

    pub fn heal(&mut self, amount: f64) -> f64 {
        self.health.heal(amount)
    }

    pub fn is_alive(&self) -> bool {
        self.health.alive
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.half_extents)
    }

    pub fn stats(&self) -> &StatBlock {
        &self.current.stats
    }

    /// Current attack power relative to the hero's unmodified attack power.
    pub fn damage_scale(&self) -> f64 {
        if self.hero_base.attack_damage > 0.0 {
            self.current.stats.attack_damage / self.hero_base.attack_damage
        } else {
            1.0
        }
    }

    pub fn weapon(&self, weapon_id: &str) -> Option<&WeaponInstance> {
        self.weapons.iter().find(|w| w.weapon_id == weapon_id)
    }

    pub fn weapon_mut(&mut self, weapon_id: &str) -> Option<&mut WeaponInstance> {
        self.weapons.iter_mut().find(|w| w.weapon_id == weapon_id)
    }

    pub fn skill(&self, skill_id: &str) -> Option<&OwnedSkill> {
        self.skills.iter().find(|s| s.skill_id == skill_id)
    }

    pub fn has_relic(&self, relic_id: &str) -> bool {
        self.relics.iter().any(|r| r == relic_id)
    }

    pub fn weapon_views(&self) -> Vec<WeaponView> {
        self.weapons.iter().map(WeaponInstance::view).collect()
    }

    pub fn skill_views(&self) -> Vec<SkillView> {
        self.skills.iter().map(OwnedSkill::view).collect()
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            hero_id: self.hero_id.clone(),
            position: self.position,
            half_extents: self.half_extents,
            facing: Velocity::from(self.facing),
            hp: self.health.hp,
            max_hp: self.health.max_hp,
            level: self.level,
            experience: self.experience,
            experience_to_next: self.experience_to_next,
            stats: self.current.stats,
            damage_taken_multiplier: self.current.damage_taken_multiplier,
            weapons: self.weapon_views(),
            skills: self.skill_views(),
            relics: self.relics.clone(),
        }
    }
}
