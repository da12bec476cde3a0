//! Loot magnet: constant-speed homing toward the player.

use hecs::World;

use arena_core::components::Loot;
use arena_core::constants::LOOT_MAGNET_SPEED;
use arena_core::types::Position;

use crate::player::Player;

/// Pull every active loot item within the player's pickup radius toward
/// the player at `LOOT_MAGNET_SPEED`, never overshooting.
pub fn run(world: &mut World, player: &Player, dt: f64) {
    if !player.is_alive() {
        return;
    }
    let target = player.position;
    let player_radius = player.stats().pickup_radius;

    for (_entity, (loot, pos)) in world.query_mut::<(&Loot, &mut Position)>() {
        if !loot.active {
            continue;
        }
        let radius = if player_radius > 0.0 {
            player_radius
        } else {
            loot.magnet_radius
        };
        let distance = pos.distance_to(&target);
        if distance >= radius || distance <= 0.0 {
            continue;
        }
        let step = (LOOT_MAGNET_SPEED * dt).min(distance);
        *pos = pos.offset(pos.direction_to(&target) * step);
    }
}
