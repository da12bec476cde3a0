//! Entity spawn factories.
//!
//! Creates enemies, projectiles, melee regions, and loot with the
//! appropriate component bundles.

use hecs::{Entity, EntityBuilder, World};

use arena_core::components::*;
use arena_core::config::{EnemyDef, LootItemDef};
use arena_core::constants::*;
use arena_core::enums::{BehaviorKind, LootKind};
use arena_core::types::{HalfExtents, Position, Velocity};

/// Spawn an enemy from its definition.
pub fn spawn_enemy(world: &mut World, def: &EnemyDef, position: Position) -> Entity {
    let stats = &def.stats;
    let enemy = Enemy {
        def_id: def.id.clone(),
        behavior: def.behavior,
        move_speed: stats.move_speed,
        attack_damage: stats.attack_damage,
        defense: stats.defense,
        collision_damage: stats.collision_damage,
        xp_value: stats.xp_value.unwrap_or(DEFAULT_ENEMY_XP_VALUE),
        is_boss: def.is_boss,
        is_elite: def.is_elite,
    };

    let mut builder = EntityBuilder::new();
    builder.add(enemy).add(position).add(Health::new(stats.max_hp)).add(
        HalfExtents::from_size(def.width, def.height),
    );

    if stats.attack_range.is_some() || def.behavior == BehaviorKind::BossPattern {
        builder.add(EnemyAttack {
            range: stats.attack_range,
            cooldown_secs: stats
                .attack_cooldown_secs
                .unwrap_or(DEFAULT_ENEMY_ATTACK_COOLDOWN_SECS),
            cooldown_remaining: 0.0,
            projectile_id: stats.projectile_id.clone(),
        });
    }

    world.spawn(builder.build())
}

/// Spawn a projectile.
pub fn spawn_projectile(
    world: &mut World,
    projectile: Projectile,
    position: Position,
    velocity: Velocity,
    size: f64,
) -> Entity {
    world.spawn((
        projectile,
        position,
        velocity,
        HalfExtents::from_size(size, size),
    ))
}

/// Spawn a melee hit region.
pub fn spawn_melee_region(
    world: &mut World,
    region: MeleeRegion,
    center: Position,
    half_extents: HalfExtents,
) -> Entity {
    world.spawn((region, center, half_extents))
}

/// Spawn a loot item. `value` overrides the definition's payload.
pub fn spawn_loot(
    world: &mut World,
    item: &LootItemDef,
    position: Position,
    value: Option<f64>,
) -> Entity {
    let value = value.unwrap_or(item.value);
    world.spawn((
        Loot {
            item_id: item.id.clone(),
            kind: item.kind,
            value,
            pickup_radius: LOOT_PICKUP_RADIUS,
            magnet_radius: LOOT_MAGNET_RADIUS,
            active: true,
        },
        position,
        loot_half_extents(item.kind, value),
    ))
}

/// Orbs grow with their XP value; potions are tall.
fn loot_half_extents(kind: LootKind, value: f64) -> HalfExtents {
    match kind {
        LootKind::ExperienceOrb => {
            let size = if value >= 100.0 {
                TILE_SIZE * 0.6
            } else if value >= 50.0 {
                TILE_SIZE * 0.5
            } else if value >= 20.0 {
                TILE_SIZE * 0.4
            } else {
                TILE_SIZE * 0.3
            };
            HalfExtents::from_size(size, size)
        }
        LootKind::HealthPotion => HalfExtents::from_size(TILE_SIZE * 0.4, TILE_SIZE * 0.6),
    }
}

