//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in arena space (units). x grows toward the safety boundary,
/// y grows downward across the arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in arena space (units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: u64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    /// Angle of the vector from `self` to `other`, in radians
    /// (0 = +x, counter-clockwise in math convention).
    pub fn angle_to(&self, other: &Position) -> f64 {
        let d = other.as_dvec2() - self.as_dvec2();
        d.y.atan2(d.x)
    }

    /// Unit vector pointing from `self` toward `other`.
    /// Coincident points yield +x so callers always get a usable direction.
    pub fn direction_to(&self, other: &Position) -> DVec2 {
        let angle = self.angle_to(other);
        DVec2::new(angle.cos(), angle.sin())
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Advance by `velocity` over `dt_secs`.
    pub fn step(&mut self, velocity: &Velocity, dt_secs: f64) {
        self.x += velocity.x * dt_secs;
        self.y += velocity.y * dt_secs;
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

    /// Speed magnitude (units/s).
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

impl SimTime {
    /// Milliseconds per tick.
    pub fn dt_ms(&self) -> u64 {
        crate::constants::TICK_MS
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_ms += self.dt_ms();
    }
}
