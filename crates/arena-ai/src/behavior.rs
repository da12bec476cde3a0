//! Enemy behavior capability.
//!
//! Pure functions over plain data; no ECS dependency. The sim builds a
//! `BehaviorContext` per enemy, resolves the variant's behavior, and applies
//! the returned displacement and attack intent.

use glam::DVec2;

use arena_core::constants::FRAME_RATE_SCALE;
use arena_core::enums::BehaviorKind;
use arena_core::types::Position;

use crate::profiles::{get_profile, BehaviorProfile};

/// Input to a behavior for a single enemy.
pub struct BehaviorContext {
    pub position: Position,
    /// Player position.
    pub target: Position,
    /// Pixels per 60 Hz frame.
    pub move_speed: f64,
    pub attack_range: Option<f64>,
    /// Attack cooldown has elapsed.
    pub attack_ready: bool,
    pub dt: f64,
}

/// An attack the enemy wants to make this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackIntent {
    /// One projectile along `direction` (unit vector).
    Aimed { direction: DVec2 },
    /// `count` projectiles evenly spread around the enemy.
    Radial { count: u32 },
}

/// Output for one enemy for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorUpdate {
    pub displacement: DVec2,
    pub attack: Option<AttackIntent>,
}

/// Capability every behavior variant implements.
pub trait EnemyBehavior: Sync {
    /// Displacement to apply this tick.
    fn compute_move(&self, ctx: &BehaviorContext) -> DVec2;
    /// Attack to launch this tick, if any.
    fn attempt_attack(&self, ctx: &BehaviorContext) -> Option<AttackIntent>;
}

pub struct Chase;
pub struct StationaryRanged;
pub struct KiteRanged;
pub struct BossPattern;

/// Resolve the behavior implementation for a variant.
pub fn behavior_for(kind: BehaviorKind) -> &'static dyn EnemyBehavior {
    match kind {
        BehaviorKind::Chase => &Chase,
        BehaviorKind::StationaryRanged => &StationaryRanged,
        BehaviorKind::KiteRanged => &KiteRanged,
        BehaviorKind::BossPattern => &BossPattern,
    }
}

/// Evaluate one enemy's behavior for this tick.
pub fn evaluate(kind: BehaviorKind, ctx: &BehaviorContext) -> BehaviorUpdate {
    let behavior = behavior_for(kind);
    BehaviorUpdate {
        displacement: behavior.compute_move(ctx),
        attack: behavior.attempt_attack(ctx),
    }
}

impl EnemyBehavior for Chase {
    fn compute_move(&self, ctx: &BehaviorContext) -> DVec2 {
        step_toward(ctx, get_profile(BehaviorKind::Chase).approach_speed_factor)
    }

    fn attempt_attack(&self, _ctx: &BehaviorContext) -> Option<AttackIntent> {
        None
    }
}

impl EnemyBehavior for StationaryRanged {
    fn compute_move(&self, ctx: &BehaviorContext) -> DVec2 {
        if in_range(ctx) {
            return DVec2::ZERO;
        }
        step_toward(
            ctx,
            get_profile(BehaviorKind::StationaryRanged).approach_speed_factor,
        )
    }

    fn attempt_attack(&self, ctx: &BehaviorContext) -> Option<AttackIntent> {
        aimed_if_ready(ctx, &get_profile(BehaviorKind::StationaryRanged))
    }
}

impl EnemyBehavior for KiteRanged {
    fn compute_move(&self, ctx: &BehaviorContext) -> DVec2 {
        let profile = get_profile(BehaviorKind::KiteRanged);
        let (Some(range), Some(factor)) = (ctx.attack_range, profile.preferred_range_factor)
        else {
            return step_toward(ctx, profile.approach_speed_factor);
        };
        let preferred = range * factor;
        let distance = ctx.position.distance_to(&ctx.target);
        if distance < preferred * profile.retreat_threshold {
            -step_toward(ctx, profile.approach_speed_factor)
        } else if distance > range {
            step_toward(ctx, profile.approach_speed_factor)
        } else {
            DVec2::ZERO
        }
    }

    fn attempt_attack(&self, ctx: &BehaviorContext) -> Option<AttackIntent> {
        aimed_if_ready(ctx, &get_profile(BehaviorKind::KiteRanged))
    }
}

impl EnemyBehavior for BossPattern {
    fn compute_move(&self, ctx: &BehaviorContext) -> DVec2 {
        step_toward(ctx, get_profile(BehaviorKind::BossPattern).approach_speed_factor)
    }

    fn attempt_attack(&self, ctx: &BehaviorContext) -> Option<AttackIntent> {
        let profile = get_profile(BehaviorKind::BossPattern);
        if !ctx.attack_ready || profile.volley_count == 0 {
            return None;
        }
        if profile.requires_range && !in_range(ctx) {
            return None;
        }
        Some(AttackIntent::Radial {
            count: profile.volley_count,
        })
    }
}

fn step_toward(ctx: &BehaviorContext, speed_factor: f64) -> DVec2 {
    ctx.position.direction_to(&ctx.target)
        * ctx.move_speed
        * speed_factor
        * FRAME_RATE_SCALE
        * ctx.dt
}

fn in_range(ctx: &BehaviorContext) -> bool {
    ctx.attack_range
        .is_some_and(|range| ctx.position.distance_to(&ctx.target) <= range)
}

fn aimed_if_ready(ctx: &BehaviorContext, profile: &BehaviorProfile) -> Option<AttackIntent> {
    if !ctx.attack_ready || (profile.requires_range && !in_range(ctx)) {
        return None;
    }
    let direction = ctx.position.direction_to(&ctx.target);
    if direction == DVec2::ZERO {
        return None;
    }
    Some(AttackIntent::Aimed { direction })
}
