//! Cleanup system: removes dead, spent, and expired entities.

use hecs::{Entity, World};

use arena_core::components::{Enemy, Health, Loot, MeleeRegion, Projectile};

/// Despawn dead enemies, inactive projectiles and loot, and expired melee
/// regions. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (health, _enemy)) in world.query_mut::<(&Health, &Enemy)>() {
        if !health.alive {
            despawn_buffer.push(entity);
        }
    }

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if !projectile.active {
            despawn_buffer.push(entity);
        }
    }

    // Regions get at least one collision pass before they expire.
    for (entity, region) in world.query_mut::<&MeleeRegion>() {
        if region.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, loot) in world.query_mut::<&Loot>() {
        if !loot.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
