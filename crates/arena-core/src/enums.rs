//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the host to start a run with a hero.
    #[default]
    HeroSelection,
    /// Simulation advancing each tick.
    Playing,
    /// Frozen by the host.
    Paused,
    /// Frozen until the host picks an upgrade.
    ChoosingUpgrade,
    /// The player died. `Restart` or `Start` leaves this phase.
    GameOver,
}

/// Why the host paused the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseReason {
    #[default]
    Menu,
    FocusLost,
    Host,
}

/// A stat the pipeline can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKind {
    MaxHp,
    MoveSpeed,
    AttackDamage,
    Defense,
    Luck,
    CritChance,
    PickupRadius,
    /// Multiplier on weapon area.
    Area,
    /// Multiplier on weapon duration.
    Duration,
    /// Multiplier on weapon cooldowns.
    Cooldown,
    /// Extra projectiles per ranged attack.
    Projectiles,
    /// Multiplier on incoming damage. Tracked apart from the stat block.
    DamageTakenMultiplier,
}

/// How a modifier combines with the running stat value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierOp {
    /// `value += magnitude`
    #[default]
    FlatAdd,
    /// `value *= 1 + magnitude`
    PercentageAdd,
    /// `value += magnitude * unboosted hero base`
    PercentageBase,
}

/// Where a modifier source came from. Determines application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Relic,
    Skill,
}

/// Weapon attack style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Ranged,
    MeleeSwing,
}

/// Enemy behavior variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorKind {
    /// Walk straight at the player.
    #[default]
    Chase,
    /// Hold position and shoot while in range, otherwise close in slowly.
    StationaryRanged,
    /// Keep a preferred distance and shoot from it.
    KiteRanged,
    /// Chase and periodically fire a radial volley.
    BossPattern,
}

/// Who fired a projectile or owns a hit region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    Player,
    Enemy,
}

/// Loot item category. Selects the on-collect effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootKind {
    #[default]
    ExperienceOrb,
    HealthPotion,
}

/// Event category that activates a relic effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    Passive,
    OnLevelUp,
    OnXpCollect,
    OnEliteOrBossKill,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// When a level of the timeline counts as complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelCompletion {
    /// Only an explicit advance moves on.
    #[default]
    Manual,
    AfterDuration,
    BossDefeated,
    AfterDurationOrBossDefeated,
}

/// Spawn scheduler lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerState {
    #[default]
    Idle,
    LevelActive(u32),
    LevelComplete(u32),
    Finished,
}
