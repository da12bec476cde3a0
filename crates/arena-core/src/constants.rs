//! Simulation constants and tuning parameters.

// --- Arena ---

/// Arena width in pixels.
pub const ARENA_WIDTH: f64 = 800.0;

/// Arena height in pixels.
pub const ARENA_HEIGHT: f64 = 600.0;

/// Base tile size. Most entity sizes and ranges scale from it.
pub const TILE_SIZE: f64 = 42.0;

/// Speeds in definitions are per 60 Hz frame; multiply by this for per-second.
pub const FRAME_RATE_SCALE: f64 = 60.0;

/// Largest delta a single tick may consume (seconds).
pub const MAX_TICK_SECS: f64 = 0.25;

// --- Player ---

/// Player box edge length.
pub const PLAYER_SIZE: f64 = TILE_SIZE * 0.8;

/// Maximum number of weapons a player may carry.
pub const MAX_WEAPONS: usize = 4;

/// Relics are only offered while the player holds fewer than this many.
pub const MAX_RELICS_OFFERED: usize = 3;

/// Experience threshold for level 1 when the timeline has no entry for it.
pub const DEFAULT_FIRST_XP_THRESHOLD: u32 = 100;

/// Growth factor applied to the previous threshold when a level has no
/// configured threshold.
pub const XP_THRESHOLD_GROWTH: f64 = 1.25;

// --- Stat floors ---

/// Minimum effective weapon cooldown (seconds).
pub const MIN_WEAPON_COOLDOWN_SECS: f64 = 0.05;

/// Minimum player cooldown multiplier after modifiers.
pub const MIN_COOLDOWN_MULTIPLIER: f64 = 0.1;

/// Minimum projectiles per ranged attack.
pub const MIN_PROJECTILES: u32 = 1;

// --- Weapons ---

/// Total fan angle for multi-projectile ranged attacks (radians).
pub const RANGED_SPREAD_TOTAL: f64 = std::f64::consts::PI / 12.0;

/// Projectile box edge length (before area scaling).
pub const PROJECTILE_SIZE: f64 = 10.0;

/// Melee region offset ahead of the player, in tiles per unit area.
pub const MELEE_OFFSET_TILES: f64 = 0.6;

/// Melee region width in tiles per unit area.
pub const MELEE_WIDTH_TILES: f64 = 1.2;

/// Melee region height in tiles per unit area.
pub const MELEE_HEIGHT_TILES: f64 = 0.8;

/// Knockback displacement per unit of knockback magnitude (pixels).
pub const KNOCKBACK_DISTANCE: f64 = TILE_SIZE;

/// Damage multiplier on a critical hit.
pub const CRIT_MULTIPLIER: f64 = 1.5;

// --- Enemies ---

/// XP granted by an enemy with no configured XP value.
pub const DEFAULT_ENEMY_XP_VALUE: u32 = 5;

/// Ranged attack cooldown when the enemy definition omits one (seconds).
pub const DEFAULT_ENEMY_ATTACK_COOLDOWN_SECS: f64 = 2.0;

/// Enemy projectile speed per frame when no projectile definition exists.
pub const ENEMY_PROJECTILE_SPEED: f64 = 5.0;

/// Enemy projectile lifetime when no projectile definition exists (seconds).
pub const ENEMY_PROJECTILE_LIFETIME_SECS: f64 = 1.5;

/// Boss spawn point.
pub const BOSS_SPAWN_X: f64 = ARENA_WIDTH / 2.0;
pub const BOSS_SPAWN_Y: f64 = TILE_SIZE * 2.0;

// --- Spawning ---

/// Distance outside the arena edge at which edge spawns appear.
pub const SPAWN_AREA_PADDING: f64 = 50.0;

/// Interval used when a spawn group omits one (seconds).
pub const DEFAULT_SPAWN_INTERVAL_SECS: f64 = 5.0;

/// Retry delay when a group is at its concurrent-alive cap (seconds).
pub const SPAWN_RETRY_DELAY_SECS: f64 = 1.0;

/// Spawn area used when a group names an unknown key.
pub const DEFAULT_SPAWN_AREA: &str = "full_screen_edge";

// --- Loot ---

/// Default per-item pickup radius.
pub const LOOT_PICKUP_RADIUS: f64 = TILE_SIZE * 0.75;

/// Default per-item magnet radius, used when the player has no pickup radius.
pub const LOOT_MAGNET_RADIUS: f64 = TILE_SIZE * 2.5;

/// Constant homing speed toward the player (pixels per second).
pub const LOOT_MAGNET_SPEED: f64 = 4.0 * FRAME_RATE_SCALE;

/// Maximum drop offset from the source position on each axis.
pub const LOOT_JITTER: f64 = TILE_SIZE * 0.25;

/// XP granted by a generic experience orb with no explicit amount.
pub const DEFAULT_ORB_XP: u32 = 10;

// --- Upgrades ---

/// Number of upgrade options offered per level-up.
pub const UPGRADE_OPTION_COUNT: usize = 3;

pub const WEIGHT_WEAPON_UPGRADE: u32 = 10;
pub const WEIGHT_NEW_WEAPON: u32 = 8;
pub const WEIGHT_SKILL: u32 = 7;
pub const WEIGHT_RELIC: u32 = 5;

/// Fraction of max HP restored by the fallback stat-boost option.
pub const RECOVER_HEALTH_FRACTION: f64 = 0.1;
