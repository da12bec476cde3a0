//! Enemy AI system: runs each enemy's behavior and launches its attacks.
//!
//! Behaviors come from arena-ai and see only plain data. Displacements and
//! attack intents are collected first, then applied to the world.

use glam::DVec2;
use hecs::{Entity, World};

use arena_ai::behavior::{evaluate, AttackIntent, BehaviorContext};
use arena_core::components::{Enemy, EnemyAttack, Health, Projectile};
use arena_core::config::ConfigRepository;
use arena_core::constants::*;
use arena_core::enums::Owner;
use arena_core::types::{Position, Velocity};

use crate::world_setup;

/// Projectile parameters for one enemy attack.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ShotStats {
    damage: f64,
    /// Units per second.
    speed: f64,
    lifetime_secs: f64,
    size: f64,
    pierce: u32,
}

impl ShotStats {
    /// From the enemy's projectile weapon, or the fallback shot scaled to
    /// the enemy's attack power.
    fn resolve(config: &ConfigRepository, projectile_id: Option<&str>, attack_damage: f64) -> Self {
        let row = projectile_id
            .and_then(|id| config.weapon(id).ok())
            .and_then(|def| def.stats_for_level(1));
        match row {
            Some(row) => Self {
                damage: row.damage,
                speed: row.projectile_speed * FRAME_RATE_SCALE,
                lifetime_secs: row.duration_secs,
                size: PROJECTILE_SIZE * row.area.max(0.1),
                pierce: row.pierce,
            },
            None => Self {
                damage: attack_damage,
                speed: ENEMY_PROJECTILE_SPEED * FRAME_RATE_SCALE,
                lifetime_secs: ENEMY_PROJECTILE_LIFETIME_SECS,
                size: PROJECTILE_SIZE,
                pierce: 0,
            },
        }
    }
}

/// Move every living enemy and fire the attacks that are ready.
pub fn run(world: &mut World, config: &ConfigRepository, target: Position, dt: f64) {
    let mut moves: Vec<(Entity, DVec2)> = Vec::new();
    let mut shots: Vec<(Position, AttackIntent, ShotStats)> = Vec::new();

    for (entity, (enemy, pos, health, mut attack)) in
        world.query_mut::<(&Enemy, &Position, &Health, Option<&mut EnemyAttack>)>()
    {
        if !health.alive {
            continue;
        }

        let (attack_range, attack_ready) = match attack.as_deref_mut() {
            Some(attack) => {
                attack.cooldown_remaining = (attack.cooldown_remaining - dt).max(0.0);
                (attack.range, attack.cooldown_remaining <= 0.0)
            }
            None => (None, false),
        };

        let ctx = BehaviorContext {
            position: *pos,
            target,
            move_speed: enemy.move_speed,
            attack_range,
            attack_ready,
            dt,
        };
        let update = evaluate(enemy.behavior, &ctx);
        moves.push((entity, update.displacement));

        if let (Some(intent), Some(attack)) = (update.attack, attack) {
            attack.cooldown_remaining = attack.cooldown_secs;
            let stats =
                ShotStats::resolve(config, attack.projectile_id.as_deref(), enemy.attack_damage);
            shots.push((*pos, intent, stats));
        }
    }

    for (entity, displacement) in moves {
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            *pos = pos.offset(displacement);
        }
    }

    for (origin, intent, stats) in shots {
        match intent {
            AttackIntent::Aimed { direction } => fire(world, origin, direction, &stats),
            AttackIntent::Radial { count } => {
                let count = count.max(1);
                for i in 0..count {
                    let angle = std::f64::consts::TAU * i as f64 / count as f64;
                    fire(world, origin, DVec2::from_angle(angle), &stats);
                }
            }
        }
    }
}

fn fire(world: &mut World, origin: Position, direction: DVec2, stats: &ShotStats) {
    world_setup::spawn_projectile(
        world,
        Projectile::new(Owner::Enemy, stats.damage, stats.lifetime_secs, stats.pierce),
        origin,
        Velocity::from(direction * stats.speed),
        stats.size,
    );
}
