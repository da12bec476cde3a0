//! Host commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All actions the host may request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    // --- Lifecycle ---
    /// Begin a run with the given hero.
    Start { hero_id: String },
    /// Freeze the simulation.
    Pause { reason: PauseReason },
    /// Leave a host pause.
    Resume,
    /// Drop the current run and return to hero selection.
    Restart,

    // --- Progression ---
    /// Apply one of the offered upgrades and resume when none remain.
    ChooseUpgrade { choice: UpgradeChoice },

    // --- Input ---
    /// Movement direction captured by the host. Normalized by the sim.
    SetMoveInput { x: f64, y: f64 },

    // --- Stage control ---
    /// Complete the active timeline level and move to the next one.
    AdvanceStage,
}

/// An upgrade the player can take at level-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum UpgradeChoice {
    Weapon(String),
    Skill(String),
    Relic(String),
    StatBoost(StatBoostToken),
}

/// Non-equipment upgrade used when nothing else is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatBoostToken {
    /// Heal a fraction of max HP.
    RecoverHealth,
}
