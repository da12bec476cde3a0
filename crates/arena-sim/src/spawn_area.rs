//! Spawn-area selectors keyed by name.
//!
//! A selector produces a spawn position for an enemy group. The registry
//! falls back to the default edge spawn when a key is unknown.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use arena_core::constants::{ARENA_HEIGHT, ARENA_WIDTH, DEFAULT_SPAWN_AREA, SPAWN_AREA_PADDING};
use arena_core::types::Position;

/// Produces spawn positions.
pub trait SpawnArea: Send + Sync {
    fn select(&self, rng: &mut ChaCha8Rng) -> Position;
}

/// Positions just outside the arena edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeSpawn {
    /// Any of the four edges, chosen uniformly.
    AllEdges { padding: f64 },
    TopEdge { padding: f64 },
    BottomEdge { padding: f64 },
}

impl SpawnArea for EdgeSpawn {
    fn select(&self, rng: &mut ChaCha8Rng) -> Position {
        match *self {
            EdgeSpawn::AllEdges { padding } => match rng.gen_range(0..4) {
                0 => Position::new(rng.gen_range(0.0..ARENA_WIDTH), -padding),
                1 => Position::new(rng.gen_range(0.0..ARENA_WIDTH), ARENA_HEIGHT + padding),
                2 => Position::new(-padding, rng.gen_range(0.0..ARENA_HEIGHT)),
                _ => Position::new(ARENA_WIDTH + padding, rng.gen_range(0.0..ARENA_HEIGHT)),
            },
            EdgeSpawn::TopEdge { padding } => {
                Position::new(rng.gen_range(0.0..ARENA_WIDTH), -padding)
            }
            EdgeSpawn::BottomEdge { padding } => {
                Position::new(rng.gen_range(0.0..ARENA_WIDTH), ARENA_HEIGHT + padding)
            }
        }
    }
}

/// Named spawn-area selectors.
pub struct SpawnAreaRegistry {
    areas: HashMap<String, Box<dyn SpawnArea>>,
    fallback: EdgeSpawn,
    /// Unknown keys already reported.
    warned: HashSet<String>,
}

impl Default for SpawnAreaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SpawnAreaRegistry {
    /// Registry with no named areas. Every lookup uses the fallback.
    pub fn empty() -> Self {
        Self {
            areas: HashMap::new(),
            warned: HashSet::new(),
            fallback: EdgeSpawn::AllEdges {
                padding: SPAWN_AREA_PADDING,
            },
        }
    }

    /// `full_screen_edge`, `top_half_edge`, and `bottom_half_edge`.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(
            DEFAULT_SPAWN_AREA,
            EdgeSpawn::AllEdges {
                padding: SPAWN_AREA_PADDING,
            },
        );
        registry.register(
            "top_half_edge",
            EdgeSpawn::TopEdge {
                padding: SPAWN_AREA_PADDING,
            },
        );
        registry.register(
            "bottom_half_edge",
            EdgeSpawn::BottomEdge {
                padding: SPAWN_AREA_PADDING,
            },
        );
        registry
    }

    /// Add or replace a named selector.
    pub fn register(&mut self, name: impl Into<String>, area: impl SpawnArea + 'static) {
        self.areas.insert(name.into(), Box::new(area));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.areas.contains_key(name)
    }

    /// Unknown keys that have fallen back to the default area.
    pub fn fallback_keys(&self) -> impl Iterator<Item = &str> {
        self.warned.iter().map(String::as_str)
    }

    /// Pick a position from the named area, or from the default area when
    /// `key` is absent or unknown. Each unknown key is reported once.
    pub fn select(&mut self, key: Option<&str>, rng: &mut ChaCha8Rng) -> Position {
        let key = key.unwrap_or(DEFAULT_SPAWN_AREA);
        if let Some(area) = self.areas.get(key) {
            return area.select(rng);
        }
        if self.warned.insert(key.to_string()) {
            warn!(key, "unknown spawn area, using default edge spawn");
        }
        match self.areas.get(DEFAULT_SPAWN_AREA) {
            Some(area) => area.select(rng),
            None => self.fallback.select(rng),
        }
    }
}
