//! Notifications emitted by the simulation for the host and UI.
//!
//! Events accumulate during a tick and are drained into the snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::state::{SkillView, WeaponView};
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    // --- Player ---
    HealthChanged { hp: f64, max_hp: f64 },
    ExperienceChanged {
        experience: u32,
        experience_to_next: u32,
        level: u32,
    },
    /// Player gained a level. The upgrade choice UI should open.
    LevelUp { level: u32 },
    PermanentBoost { stat: StatKind, amount: f64 },
    WeaponsChanged { weapons: Vec<WeaponView> },
    SkillsChanged { skills: Vec<SkillView> },
    RelicsChanged { relics: Vec<String> },
    RelicTriggered { relic_id: String, trigger: Trigger },
    LootCollected {
        item_id: String,
        kind: LootKind,
        value: f64,
    },
    PlayerDied,

    // --- Enemies ---
    EnemyKilled {
        enemy_id: String,
        position: Position,
        is_elite: bool,
        is_boss: bool,
    },
    BossSpawned { enemy_id: String, name: String },

    // --- Timeline ---
    StageStarted { stage: u32 },
    StageCompleted { stage: u32 },
    AllStagesCleared,

    // --- Run ---
    GameOver {
        survival_secs: f64,
        kill_count: u32,
        level: u32,
    },
}
