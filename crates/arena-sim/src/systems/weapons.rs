//! Player weapon system: advances cooldowns and fires ready weapons.

use std::collections::HashSet;

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::components::{MeleeRegion, Projectile};
use arena_core::constants::*;
use arena_core::enums::{Owner, WeaponKind};
use arena_core::types::{HalfExtents, Velocity};

use crate::player::{Player, WeaponInstance};
use crate::world_setup;

/// Tick every weapon's cooldown and attack with those that are ready.
pub fn run(world: &mut World, player: &mut Player, rng: &mut ChaCha8Rng, dt: f64) {
    if !player.is_alive() {
        return;
    }

    // Collect attacks first; firing needs the player immutably.
    let mut ready: Vec<usize> = Vec::new();
    let stats = *player.stats();
    for (index, weapon) in player.weapons.iter_mut().enumerate() {
        weapon.cooldown_remaining -= dt;
        if weapon.cooldown_remaining <= 0.0 {
            weapon.cooldown_remaining = weapon.effective_cooldown(&stats);
            ready.push(index);
        }
    }

    for index in ready {
        let weapon = &player.weapons[index];
        let damage = roll_damage(player, weapon, rng);
        match weapon.kind {
            WeaponKind::Ranged => fire_ranged(world, player, weapon, damage),
            WeaponKind::MeleeSwing => swing_melee(world, player, weapon, damage),
        }
    }
}

/// Weapon damage scaled by the player's attack power, with a crit roll.
fn roll_damage(player: &Player, weapon: &WeaponInstance, rng: &mut ChaCha8Rng) -> f64 {
    let damage = weapon.stats.damage * player.damage_scale();
    let crit_chance = player.stats().crit_chance.clamp(0.0, 1.0);
    if crit_chance > 0.0 && rng.gen_bool(crit_chance) {
        damage * CRIT_MULTIPLIER
    } else {
        damage
    }
}

/// Fan of projectiles centered on the facing direction.
fn fire_ranged(world: &mut World, player: &Player, weapon: &WeaponInstance, damage: f64) {
    let stats = player.stats();
    let count = weapon.effective_projectiles(stats);
    let speed = weapon.stats.projectile_speed * FRAME_RATE_SCALE;
    let lifetime = weapon.stats.duration_secs * stats.duration;
    let size = PROJECTILE_SIZE * (weapon.stats.area * stats.area).max(0.1);
    let base_angle = player.facing.y.atan2(player.facing.x);

    for i in 0..count {
        let offset = if count > 1 {
            -RANGED_SPREAD_TOTAL / 2.0 + RANGED_SPREAD_TOTAL * i as f64 / (count - 1) as f64
        } else {
            0.0
        };
        let direction = DVec2::from_angle(base_angle + offset);
        world_setup::spawn_projectile(
            world,
            Projectile::new(Owner::Player, damage, lifetime, weapon.stats.pierce),
            player.position,
            Velocity::from(direction * speed),
            size,
        );
    }
}

/// Hit region ahead of the player.
fn swing_melee(world: &mut World, player: &Player, weapon: &WeaponInstance, damage: f64) {
    let stats = player.stats();
    let area = weapon.stats.area * stats.area;
    let center = player
        .position
        .offset(player.facing * TILE_SIZE * MELEE_OFFSET_TILES * area);
    let half = HalfExtents::from_size(
        TILE_SIZE * MELEE_WIDTH_TILES * area,
        TILE_SIZE * MELEE_HEIGHT_TILES * area,
    );
    world_setup::spawn_melee_region(
        world,
        MeleeRegion {
            owner: Owner::Player,
            damage,
            knockback: weapon.stats.knockback,
            remaining_secs: weapon.stats.duration_secs * stats.duration,
            hit_entities: HashSet::new(),
        },
        center,
        half,
    );
}
