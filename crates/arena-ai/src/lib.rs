//! Enemy behavior for the arena simulation.
//!
//! Each behavior variant implements the `EnemyBehavior` capability:
//! where to move this tick and whether to attack. Tuning per variant lives
//! in `profiles`.

pub mod behavior;
pub mod profiles;

pub use arena_core as core;
