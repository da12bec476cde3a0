//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in arena space (pixels).
/// Origin is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in arena space (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Half-width and half-height of an entity's bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HalfExtents {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounding box described by its center and half extents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Position,
    pub half: HalfExtents,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks run while playing.
    pub tick: u64,
    /// Elapsed simulated play time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    /// Unit vector pointing from `self` toward `other` (zero if coincident).
    pub fn direction_to(&self, other: &Position) -> DVec2 {
        (other.as_dvec2() - self.as_dvec2()).normalize_or_zero()
    }

    /// Position displaced by `delta`.
    pub fn offset(&self, delta: DVec2) -> Position {
        Position::from(self.as_dvec2() + delta)
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Speed magnitude (pixels per second).
    pub fn speed(&self) -> f64 {
        self.as_dvec2().length()
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl HalfExtents {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Half extents of a box with the given full width and height.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            x: width / 2.0,
            y: height / 2.0,
        }
    }
}

impl Aabb {
    pub fn new(center: Position, half: HalfExtents) -> Self {
        Self { center, half }
    }

    /// Strict overlap test. Boxes that exactly touch do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_padded(other, 0.0)
    }

    /// Overlap test with `padding` added to the combined half extents on
    /// each axis. Used for pickup checks.
    pub fn overlaps_padded(&self, other: &Aabb, padding: f64) -> bool {
        let dx = (self.center.x - other.center.x).abs();
        let dy = (self.center.y - other.center.y).abs();
        dx < self.half.x + other.half.x + padding && dy < self.half.y + other.half.y + padding
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
