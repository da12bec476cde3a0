//! Loot economy: drop-table rolls and on-collect effects.

use std::collections::BTreeMap;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use arena_core::config::ConfigRepository;
use arena_core::constants::LOOT_JITTER;
use arena_core::enums::LootKind;
use arena_core::types::Position;

use crate::world_setup;

/// A loot item to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct LootSpawnRequest {
    pub item_id: String,
    pub position: Position,
    /// Replaces the definition's payload (e.g. a relic's XP amount).
    pub value: Option<f64>,
}

/// What collecting an item does to the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LootEffect {
    GainExperience(u32),
    Heal(f64),
}

/// Roll every table entry as an independent Bernoulli trial.
/// Each drop lands at `origin` plus independent jitter on both axes.
pub fn roll_drops(
    table: &BTreeMap<String, f64>,
    origin: Position,
    rng: &mut ChaCha8Rng,
) -> Vec<LootSpawnRequest> {
    let mut requests = Vec::new();
    for (item_id, &probability) in table {
        // Also rejects NaN.
        if !(probability > 0.0) || !rng.gen_bool(probability.min(1.0)) {
            continue;
        }
        requests.push(LootSpawnRequest {
            item_id: item_id.clone(),
            position: jitter(origin, rng),
            value: None,
        });
    }
    requests
}

/// Position offset by up to `LOOT_JITTER` on each axis.
pub fn jitter(origin: Position, rng: &mut ChaCha8Rng) -> Position {
    Position::new(
        origin.x + rng.gen_range(-LOOT_JITTER..LOOT_JITTER),
        origin.y + rng.gen_range(-LOOT_JITTER..LOOT_JITTER),
    )
}

/// Create loot entities for `requests`. Unknown item ids are skipped.
/// Returns the number spawned.
pub fn spawn_requests(
    world: &mut World,
    config: &ConfigRepository,
    requests: &[LootSpawnRequest],
) -> usize {
    let mut spawned = 0;
    for request in requests {
        match config.loot_item(&request.item_id) {
            Ok(item) => {
                world_setup::spawn_loot(world, item, request.position, request.value);
                spawned += 1;
            }
            Err(err) => warn!(%err, "skipping loot drop"),
        }
    }
    spawned
}

/// Per-kind collect effect.
pub fn on_collect(kind: LootKind, value: f64) -> LootEffect {
    match kind {
        LootKind::ExperienceOrb => LootEffect::GainExperience(value.max(0.0).round() as u32),
        LootKind::HealthPotion => LootEffect::Heal(value),
    }
}
