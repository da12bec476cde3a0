//! Collision resolution: AABB overlap tests between the player, enemies,
//! projectiles, melee regions, and loot.
//!
//! Every pair rule is evaluated every tick. Enemy state is copied out,
//! resolved locally, and written back so the projectile and melee queries
//! can borrow the world mutably.

use glam::DVec2;
use hecs::{Entity, World};

use arena_core::components::*;
use arena_core::constants::KNOCKBACK_DISTANCE;
use arena_core::enums::{LootKind, Owner};
use arena_core::types::{Aabb, HalfExtents, Position};

use crate::player::Player;

/// Outcome of collision resolution, consumed by progression.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    EnemyKilled {
        entity: Entity,
        enemy_id: String,
        position: Position,
        xp_value: u32,
        is_elite: bool,
        is_boss: bool,
    },
    PlayerDamaged { amount: f64 },
    /// The player's health reached zero. Reported once.
    PlayerKilled,
    LootCollected {
        item_id: String,
        kind: LootKind,
        value: f64,
    },
}

/// Local copy of a living enemy.
struct Target {
    entity: Entity,
    bits: u64,
    aabb: Aabb,
    enemy: Enemy,
    health: Health,
    knockback: DVec2,
}

impl Target {
    /// Apply a hit and report a kill.
    fn hit(&mut self, damage: f64, events: &mut Vec<CombatEvent>) {
        if let DamageOutcome::Killed { .. } =
            self.health.take_damage(damage, self.enemy.defense, 1.0)
        {
            events.push(CombatEvent::EnemyKilled {
                entity: self.entity,
                enemy_id: self.enemy.def_id.clone(),
                position: self.aabb.center,
                xp_value: self.enemy.xp_value,
                is_elite: self.enemy.is_elite,
                is_boss: self.enemy.is_boss,
            });
        }
    }
}

/// Resolve all overlaps for this tick.
pub fn resolve(world: &mut World, player: &mut Player) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    let mut targets = collect_targets(world);

    player_vs_enemies(player, &targets, &mut events);
    projectiles(world, player, &mut targets, &mut events);
    melee_regions(world, &mut targets, &mut events);
    write_back(world, &targets);
    loot_pickup(world, player, &mut events);

    events
}

fn collect_targets(world: &mut World) -> Vec<Target> {
    world
        .query_mut::<(&Enemy, &Position, &HalfExtents, &Health)>()
        .into_iter()
        .filter(|(_, (_, _, _, health))| health.alive)
        .map(|(entity, (enemy, pos, half, health))| Target {
            entity,
            bits: entity.to_bits().get(),
            aabb: Aabb::new(*pos, *half),
            enemy: enemy.clone(),
            health: *health,
            knockback: DVec2::ZERO,
        })
        .collect()
}

/// Contact damage from every overlapping enemy, every tick.
fn player_vs_enemies(player: &mut Player, targets: &[Target], events: &mut Vec<CombatEvent>) {
    let player_box = player.aabb();
    for target in targets {
        if target.enemy.collision_damage <= 0.0 || !player_box.overlaps(&target.aabb) {
            continue;
        }
        damage_player(player, target.enemy.collision_damage, events);
    }
}

fn damage_player(player: &mut Player, raw: f64, events: &mut Vec<CombatEvent>) {
    match player.take_damage(raw) {
        DamageOutcome::Ignored => {}
        DamageOutcome::Damaged { amount } => events.push(CombatEvent::PlayerDamaged { amount }),
        DamageOutcome::Killed { amount } => {
            events.push(CombatEvent::PlayerDamaged { amount });
            events.push(CombatEvent::PlayerKilled);
        }
    }
}

/// Player projectiles hit each enemy at most once and spend pierce.
/// Enemy projectiles hit the player and deactivate.
fn projectiles(
    world: &mut World,
    player: &mut Player,
    targets: &mut [Target],
    events: &mut Vec<CombatEvent>,
) {
    for (_entity, (projectile, pos, half)) in
        world.query_mut::<(&mut Projectile, &Position, &HalfExtents)>()
    {
        if !projectile.active {
            continue;
        }
        let shot = Aabb::new(*pos, *half);
        match projectile.owner {
            Owner::Player => {
                for target in targets.iter_mut() {
                    if !target.health.alive
                        || projectile.hit_entities.contains(&target.bits)
                        || !shot.overlaps(&target.aabb)
                    {
                        continue;
                    }
                    target.hit(projectile.damage, events);
                    projectile.register_hit(target.bits);
                    if !projectile.active {
                        break;
                    }
                }
            }
            Owner::Enemy => {
                if player.is_alive() && shot.overlaps(&player.aabb()) {
                    damage_player(player, projectile.damage, events);
                    projectile.active = false;
                }
            }
        }
    }
}

/// Each region damages each enemy once and pushes it away from the region.
fn melee_regions(world: &mut World, targets: &mut [Target], events: &mut Vec<CombatEvent>) {
    for (_entity, (region, pos, half)) in
        world.query_mut::<(&mut MeleeRegion, &Position, &HalfExtents)>()
    {
        if region.owner != Owner::Player {
            continue;
        }
        let area = Aabb::new(*pos, *half);
        for target in targets.iter_mut() {
            if !target.health.alive
                || region.hit_entities.contains(&target.bits)
                || !area.overlaps(&target.aabb)
            {
                continue;
            }
            region.hit_entities.insert(target.bits);
            target.hit(region.damage, events);
            if region.knockback > 0.0 {
                let away = pos.direction_to(&target.aabb.center);
                target.knockback += away * region.knockback * KNOCKBACK_DISTANCE;
            }
        }
    }
}

fn write_back(world: &mut World, targets: &[Target]) {
    for target in targets {
        if let Ok(mut health) = world.get::<&mut Health>(target.entity) {
            *health = target.health;
        }
        if target.knockback != DVec2::ZERO && target.health.alive {
            if let Ok(mut pos) = world.get::<&mut Position>(target.entity) {
                *pos = pos.offset(target.knockback);
            }
        }
    }
}

/// Loot overlapping the player box padded by the player's pickup radius.
fn loot_pickup(world: &mut World, player: &Player, events: &mut Vec<CombatEvent>) {
    if !player.is_alive() {
        return;
    }
    let player_box = player.aabb();
    let player_radius = player.stats().pickup_radius;
    for (_entity, (loot, pos, half)) in world.query_mut::<(&mut Loot, &Position, &HalfExtents)>() {
        if !loot.active {
            continue;
        }
        let padding = if player_radius > 0.0 {
            player_radius
        } else {
            loot.pickup_radius
        };
        if player_box.overlaps_padded(&Aabb::new(*pos, *half), padding) {
            loot.active = false;
            events.push(CombatEvent::LootCollected {
                item_id: loot.item_id.clone(),
                kind: loot.kind,
                value: loot.value,
            });
        }
    }
}
