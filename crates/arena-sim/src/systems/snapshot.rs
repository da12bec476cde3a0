//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use arena_core::components::*;
use arena_core::enums::*;
use arena_core::events::GameEvent;
use arena_core::state::*;
use arena_core::types::{HalfExtents, Position, SimTime, Velocity};

use crate::player::Player;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    stage: SchedulerState,
    player: Option<&Player>,
    upgrade_options: &[UpgradeOption],
    kill_count: u32,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        stage,
        player: player.map(Player::view),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        melee_regions: build_melee_regions(world),
        loot: build_loot(world),
        upgrade_options: upgrade_options.to_vec(),
        kill_count,
        events,
    }
}

fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Living enemies, ordered by entity id.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Position, &HalfExtents, &Health)>()
        .iter()
        .filter(|(_, (_, _, _, health))| health.alive)
        .map(|(entity, (enemy, pos, half, health))| EnemyView {
            id: entity_id(entity),
            enemy_id: enemy.def_id.clone(),
            position: *pos,
            half_extents: *half,
            hp: health.hp,
            max_hp: health.max_hp,
            is_boss: enemy.is_boss,
            is_elite: enemy.is_elite,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position, &Velocity, &HalfExtents)>()
        .iter()
        .filter(|(_, (projectile, _, _, _))| projectile.active)
        .map(|(entity, (projectile, pos, vel, half))| ProjectileView {
            id: entity_id(entity),
            owner: projectile.owner,
            position: *pos,
            velocity: *vel,
            half_extents: *half,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_melee_regions(world: &World) -> Vec<MeleeRegionView> {
    let mut regions: Vec<MeleeRegionView> = world
        .query::<(&MeleeRegion, &Position, &HalfExtents)>()
        .iter()
        .map(|(entity, (region, pos, half))| MeleeRegionView {
            id: entity_id(entity),
            position: *pos,
            half_extents: *half,
            remaining_secs: region.remaining_secs,
        })
        .collect();
    regions.sort_by_key(|r| r.id);
    regions
}

fn build_loot(world: &World) -> Vec<LootView> {
    let mut loot: Vec<LootView> = world
        .query::<(&Loot, &Position, &HalfExtents)>()
        .iter()
        .filter(|(_, (loot, _, _))| loot.active)
        .map(|(entity, (loot, pos, half))| LootView {
            id: entity_id(entity),
            item_id: loot.item_id.clone(),
            kind: loot.kind,
            position: *pos,
            half_extents: *half,
        })
        .collect();
    loot.sort_by_key(|l| l.id);
    loot
}
