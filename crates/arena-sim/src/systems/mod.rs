//! Systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` plus whatever engine state
//! they need. They do not own state, except for the spawn scheduler's timers.

pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod magnet;
pub mod movement;
pub mod snapshot;
pub mod spawn_scheduler;
pub mod weapons;
