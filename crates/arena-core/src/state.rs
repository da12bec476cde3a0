//! Game state snapshot: the complete visible state handed to the host after each tick.

use serde::{Deserialize, Serialize};

use crate::commands::UpgradeChoice;
use crate::enums::*;
use crate::events::GameEvent;
use crate::stats::StatBlock;
use crate::types::{HalfExtents, Position, SimTime, Velocity};

/// Complete read-only state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub stage: SchedulerState,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub melee_regions: Vec<MeleeRegionView>,
    pub loot: Vec<LootView>,
    /// Non-empty while the phase is `ChoosingUpgrade`.
    pub upgrade_options: Vec<UpgradeOption>,
    pub kill_count: u32,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub hero_id: String,
    pub position: Position,
    pub half_extents: HalfExtents,
    pub facing: Velocity,
    pub hp: f64,
    pub max_hp: f64,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub stats: StatBlock,
    pub damage_taken_multiplier: f64,
    pub weapons: Vec<WeaponView>,
    pub skills: Vec<SkillView>,
    pub relics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponView {
    pub weapon_id: String,
    pub level: u32,
    pub max_level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillView {
    pub skill_id: String,
    pub level: u32,
    pub max_level: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub enemy_id: String,
    pub position: Position,
    pub half_extents: HalfExtents,
    pub hp: f64,
    pub max_hp: f64,
    pub is_boss: bool,
    pub is_elite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub owner: Owner,
    pub position: Position,
    pub velocity: Velocity,
    pub half_extents: HalfExtents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeRegionView {
    pub id: u64,
    pub position: Position,
    pub half_extents: HalfExtents,
    pub remaining_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootView {
    pub id: u64,
    pub item_id: String,
    pub kind: LootKind,
    pub position: Position,
    pub half_extents: HalfExtents,
}

/// One entry of the upgrade choice UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOption {
    pub choice: UpgradeChoice,
    pub name: String,
    pub description: String,
    /// Level the item will have after taking this option.
    pub next_level: u32,
    pub is_new: bool,
}
