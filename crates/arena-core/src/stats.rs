//! Stat pipeline: hero base + permanent boosts + modifier sources.
//!
//! `recompute` is a pure function of its inputs. The only stateful part is
//! the `PermanentBoosts` ledger, which is written once per boost at
//! level-up time and read by every later recompute.
//!
//! Application order:
//! 1. start from the boosted base;
//! 2. relic passive modifiers, grouped by target stat in order of first
//!    appearance, each group in relic acquisition order;
//! 3. skill modifiers in skill acquisition order;
//! 4. floor clamps.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MIN_COOLDOWN_MULTIPLIER;
use crate::enums::{ModifierOp, SourceKind, StatKind};

/// A full set of player stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub max_hp: f64,
    /// Pixels per 60 Hz frame.
    pub move_speed: f64,
    pub attack_damage: f64,
    pub defense: f64,
    pub luck: f64,
    /// Probability in [0, 1].
    pub crit_chance: f64,
    pub pickup_radius: f64,
    pub area: f64,
    pub duration: f64,
    pub cooldown: f64,
    pub projectiles: f64,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            max_hp: 100.0,
            move_speed: 2.5,
            attack_damage: 10.0,
            defense: 0.0,
            luck: 0.0,
            crit_chance: 0.05,
            pickup_radius: 100.0,
            area: 1.0,
            duration: 1.0,
            cooldown: 1.0,
            projectiles: 0.0,
        }
    }
}

impl StatBlock {
    /// Read a stat. `DamageTakenMultiplier` is not part of the block and reads as 1.
    pub fn get(&self, stat: StatKind) -> f64 {
        match stat {
            StatKind::MaxHp => self.max_hp,
            StatKind::MoveSpeed => self.move_speed,
            StatKind::AttackDamage => self.attack_damage,
            StatKind::Defense => self.defense,
            StatKind::Luck => self.luck,
            StatKind::CritChance => self.crit_chance,
            StatKind::PickupRadius => self.pickup_radius,
            StatKind::Area => self.area,
            StatKind::Duration => self.duration,
            StatKind::Cooldown => self.cooldown,
            StatKind::Projectiles => self.projectiles,
            StatKind::DamageTakenMultiplier => 1.0,
        }
    }

    /// Mutable slot for a stat, or `None` for stats tracked outside the block.
    pub fn slot_mut(&mut self, stat: StatKind) -> Option<&mut f64> {
        match stat {
            StatKind::MaxHp => Some(&mut self.max_hp),
            StatKind::MoveSpeed => Some(&mut self.move_speed),
            StatKind::AttackDamage => Some(&mut self.attack_damage),
            StatKind::Defense => Some(&mut self.defense),
            StatKind::Luck => Some(&mut self.luck),
            StatKind::CritChance => Some(&mut self.crit_chance),
            StatKind::PickupRadius => Some(&mut self.pickup_radius),
            StatKind::Area => Some(&mut self.area),
            StatKind::Duration => Some(&mut self.duration),
            StatKind::Cooldown => Some(&mut self.cooldown),
            StatKind::Projectiles => Some(&mut self.projectiles),
            StatKind::DamageTakenMultiplier => None,
        }
    }
}

/// One adjustment to one stat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub stat: StatKind,
    pub magnitude: f64,
    #[serde(default)]
    pub op: ModifierOp,
}

impl Modifier {
    pub fn new(stat: StatKind, magnitude: f64, op: ModifierOp) -> Self {
        Self { stat, magnitude, op }
    }
}

/// Modifiers contributed by one owned relic or skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierSource {
    /// Relic or skill id.
    pub id: String,
    pub kind: SourceKind,
    pub modifiers: Vec<Modifier>,
}

/// Output of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentStats {
    pub stats: StatBlock,
    /// Applied to incoming damage after defense.
    pub damage_taken_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatError {
    #[error("permanent boosts support FlatAdd and PercentageBase, got {0:?}")]
    UnsupportedBoostOp(ModifierOp),
    #[error("{0:?} cannot be permanently boosted")]
    UnboostableStat(StatKind),
}

/// Mutable "boosted base" record. Starts as a copy of the hero base and
/// accumulates level-up boosts for the rest of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermanentBoosts {
    base: StatBlock,
    applied: Vec<Modifier>,
}

impl PermanentBoosts {
    pub fn new(hero_base: &StatBlock) -> Self {
        Self {
            base: *hero_base,
            applied: Vec::new(),
        }
    }

    /// The hero base with every boost folded in.
    pub fn base(&self) -> &StatBlock {
        &self.base
    }

    /// Boosts applied so far, oldest first.
    pub fn history(&self) -> &[Modifier] {
        &self.applied
    }

    /// Fold one boost into the base. `PercentageBase` is computed against
    /// the unboosted `hero_base`. Returns the amount added.
    pub fn apply(&mut self, hero_base: &StatBlock, boost: &Modifier) -> Result<f64, StatError> {
        let amount = match boost.op {
            ModifierOp::FlatAdd => boost.magnitude,
            ModifierOp::PercentageBase => boost.magnitude * hero_base.get(boost.stat),
            op @ ModifierOp::PercentageAdd => return Err(StatError::UnsupportedBoostOp(op)),
        };
        let slot = self
            .base
            .slot_mut(boost.stat)
            .ok_or(StatError::UnboostableStat(boost.stat))?;
        *slot += amount;
        self.applied.push(*boost);
        Ok(amount)
    }
}

/// Combine the boosted base with all modifier sources into current stats.
pub fn recompute(
    hero_base: &StatBlock,
    boosts: &PermanentBoosts,
    sources: &[ModifierSource],
) -> CurrentStats {
    let mut current = CurrentStats {
        stats: *boosts.base(),
        damage_taken_multiplier: 1.0,
    };

    // Relic passives, grouped by stat.
    let relic_modifiers: Vec<&Modifier> = sources
        .iter()
        .filter(|s| s.kind == SourceKind::Relic)
        .flat_map(|s| s.modifiers.iter())
        .collect();
    let mut stat_order: Vec<StatKind> = Vec::new();
    for m in &relic_modifiers {
        if !stat_order.contains(&m.stat) {
            stat_order.push(m.stat);
        }
    }
    for stat in stat_order {
        for m in relic_modifiers.iter().filter(|m| m.stat == stat) {
            apply_modifier(&mut current, hero_base, m);
        }
    }

    // Skill passives.
    for source in sources.iter().filter(|s| s.kind == SourceKind::Skill) {
        for m in &source.modifiers {
            apply_modifier(&mut current, hero_base, m);
        }
    }

    let stats = &mut current.stats;
    stats.max_hp = stats.max_hp.max(1.0);
    stats.move_speed = stats.move_speed.max(0.0);
    stats.crit_chance = stats.crit_chance.clamp(0.0, 1.0);
    stats.cooldown = stats.cooldown.max(MIN_COOLDOWN_MULTIPLIER);
    stats.projectiles = stats.projectiles.max(0.0);
    current.damage_taken_multiplier = current.damage_taken_multiplier.max(0.0);
    current
}

fn apply_modifier(current: &mut CurrentStats, hero_base: &StatBlock, m: &Modifier) {
    let Some(value) = current.stats.slot_mut(m.stat) else {
        // Only the damage-taken multiplier lives outside the block.
        current.damage_taken_multiplier *= 1.0 + m.magnitude;
        return;
    };
    match m.op {
        ModifierOp::FlatAdd => *value += m.magnitude,
        ModifierOp::PercentageAdd => *value *= 1.0 + m.magnitude,
        ModifierOp::PercentageBase => *value += m.magnitude * hero_base.get(m.stat),
    }
}
