//! Core types and definitions for the arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, commands, state snapshots, events, constants,
//! the stat pipeline, and the read-only configuration repository.
//! It has no dependency on an ECS runtime or a rendering host.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod stats;
pub mod types;

#[cfg(test)]
mod tests;
