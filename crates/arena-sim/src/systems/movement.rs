//! Movement integration for the player, projectiles, and melee regions.

use hecs::World;

use arena_core::components::{MeleeRegion, Projectile};
use arena_core::constants::*;
use arena_core::types::{HalfExtents, Position, Velocity};

use crate::player::Player;

/// Move the player along the host's input direction, clamped to the arena.
pub fn move_player(player: &mut Player, dt: f64) {
    if !player.is_alive() {
        return;
    }
    let direction = player.move_input.normalize_or_zero();
    if direction.length_squared() > 0.0 {
        player.facing = direction;
        let step = direction * player.stats().move_speed * FRAME_RATE_SCALE * dt;
        player.position = player.position.offset(step);
    }
    let half = player.half_extents;
    player.position.x = player.position.x.clamp(half.x, ARENA_WIDTH - half.x);
    player.position.y = player.position.y.clamp(half.y, ARENA_HEIGHT - half.y);
}

/// Integrate projectiles, expire them by lifetime or bounds, and tick down
/// melee regions.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (projectile, pos, vel, half)) in
        world.query_mut::<(&mut Projectile, &mut Position, &Velocity, &HalfExtents)>()
    {
        if !projectile.active {
            continue;
        }
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        projectile.lifetime_remaining -= dt;
        if projectile.lifetime_remaining <= 0.0 || out_of_bounds(pos, half) {
            projectile.active = false;
        }
    }

    for (_entity, region) in world.query_mut::<&mut MeleeRegion>() {
        region.remaining_secs -= dt;
    }
}

/// Outside the arena expanded by the entity's own size.
fn out_of_bounds(pos: &Position, half: &HalfExtents) -> bool {
    let (w, h) = (half.x * 2.0, half.y * 2.0);
    pos.x < -w || pos.x > ARENA_WIDTH + w || pos.y < -h || pos.y > ARENA_HEIGHT + h
}
