//! Simulation core for the arena.
//!
//! Owns the hecs ECS world and the player, runs systems on host-supplied
//! tick deltas, and produces GameStateSnapshots for the frontend.

pub mod catalog;
pub mod engine;
pub mod loot;
pub mod player;
pub mod progression;
pub mod spawn_area;
pub mod systems;
pub mod world_setup;

pub use arena_core as core;
pub use engine::{SimConfig, SimulationEngine};
