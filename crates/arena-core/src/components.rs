//! ECS components for hecs entities.
//!
//! Components are plain data. `Health` is the exception: its damage intake
//! keeps defense, clamping, and death detection in one place.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Hit points of an actor. `0 <= hp <= max_hp`; `alive` flips to false once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub hp: f64,
    pub max_hp: f64,
    pub alive: bool,
}

/// Result of a damage intake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Target was already dead.
    Ignored,
    Damaged { amount: f64 },
    /// This hit killed the target. Reported exactly once per actor.
    Killed { amount: f64 },
}

impl Health {
    pub fn new(max_hp: f64) -> Self {
        let max_hp = max_hp.max(1.0);
        Self {
            hp: max_hp,
            max_hp,
            alive: true,
        }
    }

    /// Reduce health by `max(1, raw - defense) * multiplier`.
    pub fn take_damage(&mut self, raw: f64, defense: f64, multiplier: f64) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Ignored;
        }
        let amount = (raw - defense).max(1.0) * multiplier;
        self.hp = (self.hp - amount).clamp(0.0, self.max_hp);
        if self.hp <= 0.0 {
            self.alive = false;
            DamageOutcome::Killed { amount }
        } else {
            DamageOutcome::Damaged { amount }
        }
    }

    /// Restore up to `amount` health. Returns what was actually restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if !self.alive || amount <= 0.0 {
            return 0.0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Change the maximum, clamping current health into range.
    pub fn set_max_hp(&mut self, max_hp: f64) {
        self.max_hp = max_hp.max(1.0);
        self.hp = self.hp.clamp(0.0, self.max_hp);
    }

    pub fn restore_full(&mut self) {
        if self.alive {
            self.hp = self.max_hp;
        }
    }

    pub fn fraction(&self) -> f64 {
        self.hp / self.max_hp
    }
}

/// A hostile actor spawned from an enemy definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Enemy definition id.
    pub def_id: String,
    pub behavior: BehaviorKind,
    /// Pixels per 60 Hz frame.
    pub move_speed: f64,
    pub attack_damage: f64,
    pub defense: f64,
    /// Damage dealt to the player on contact, every tick of overlap.
    pub collision_damage: f64,
    pub xp_value: u32,
    pub is_boss: bool,
    pub is_elite: bool,
}

/// Ranged attack capability of an enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyAttack {
    /// `None` attacks at any distance.
    pub range: Option<f64>,
    pub cooldown_secs: f64,
    /// Counts down by the tick delta. Ready at zero.
    pub cooldown_remaining: f64,
    /// Weapon definition used for projectile stats, if any.
    pub projectile_id: Option<String>,
}

/// A moving damage carrier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Owner,
    pub damage: f64,
    pub lifetime_remaining: f64,
    /// Additional enemies this projectile may hit before deactivating.
    pub pierce: u32,
    pub active: bool,
    /// Entity bits already damaged by this projectile.
    pub hit_entities: HashSet<u64>,
}

impl Projectile {
    pub fn new(owner: Owner, damage: f64, lifetime_secs: f64, pierce: u32) -> Self {
        Self {
            owner,
            damage,
            lifetime_remaining: lifetime_secs,
            pierce,
            active: true,
            hit_entities: HashSet::new(),
        }
    }

    /// Record a hit: spend one pierce or deactivate.
    pub fn register_hit(&mut self, target: u64) {
        self.hit_entities.insert(target);
        if self.pierce > 0 {
            self.pierce -= 1;
        } else {
            self.active = false;
        }
    }
}

/// A transient melee hit region. Damages each enemy at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeRegion {
    pub owner: Owner,
    pub damage: f64,
    pub knockback: f64,
    pub remaining_secs: f64,
    pub hit_entities: HashSet<u64>,
}

/// A collectible item on the ground.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loot {
    pub item_id: String,
    pub kind: LootKind,
    /// XP amount for orbs, heal amount for potions.
    pub value: f64,
    pub pickup_radius: f64,
    pub magnet_radius: f64,
    pub active: bool,
}
