//! Behavior-specific tuning profiles.
//!
//! Consolidates per-variant parameters for the behavior implementations.

use arena_core::enums::BehaviorKind;

/// Tuning for one behavior variant.
pub struct BehaviorProfile {
    /// Fraction of move speed used while closing distance.
    pub approach_speed_factor: f64,
    /// Preferred distance as a fraction of attack range, if the variant keeps one.
    pub preferred_range_factor: Option<f64>,
    /// Retreat when closer than this fraction of the preferred distance.
    pub retreat_threshold: f64,
    /// Whether the variant only attacks inside its attack range.
    pub requires_range: bool,
    /// Projectiles per radial volley (0 for aimed shots).
    pub volley_count: u32,
}

/// Get the profile for a behavior variant.
pub fn get_profile(kind: BehaviorKind) -> BehaviorProfile {
    match kind {
        BehaviorKind::Chase => BehaviorProfile {
            approach_speed_factor: 1.0,
            preferred_range_factor: None,
            retreat_threshold: 0.0,
            requires_range: true,
            volley_count: 0,
        },
        BehaviorKind::StationaryRanged => BehaviorProfile {
            approach_speed_factor: 0.5,
            preferred_range_factor: None,
            retreat_threshold: 0.0,
            requires_range: true,
            volley_count: 0,
        },
        BehaviorKind::KiteRanged => BehaviorProfile {
            approach_speed_factor: 1.0,
            preferred_range_factor: Some(0.8),
            retreat_threshold: 0.5,
            requires_range: true,
            volley_count: 0,
        },
        BehaviorKind::BossPattern => BehaviorProfile {
            approach_speed_factor: 1.0,
            preferred_range_factor: None,
            retreat_threshold: 0.0,
            requires_range: false,
            volley_count: 8,
        },
    }
}
