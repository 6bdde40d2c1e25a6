//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position in world units (x = East, y = North).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// 2D velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        self.0.distance(other.0)
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn speed(&self) -> f32 {
        self.0.length()
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Collision category bits. Each sensor carries one category and a mask
/// of the categories it reacts to.
pub mod category {
    pub const DEFAULT: u16 = 1;
    pub const PLAYER: u16 = 1 << 1;
    pub const ENEMY: u16 = 1 << 2;
    pub const COLLEGE: u16 = 1 << 3;
    pub const COLLEGE_SENSOR: u16 = 1 << 4;
    pub const CANNON: u16 = 1 << 5;
    pub const COLLEGE_FIRE: u16 = 1 << 6;
    pub const SPEED_BOOST: u16 = 1 << 7;
    pub const FASTER_SHOOTING: u16 = 1 << 8;
    pub const ABSORPTION_HEART: u16 = 1 << 9;
}

/// Category/mask pair, box2d style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFilter {
    pub category: u16,
    pub mask: u16,
}

impl CollisionFilter {
    pub const fn new(category: u16, mask: u16) -> Self {
        Self { category, mask }
    }

    /// Two filters interact only when each accepts the other's category.
    pub fn accepts(&self, other: &CollisionFilter) -> bool {
        (self.mask & other.category) != 0 && (other.mask & self.category) != 0
    }
}

/// Circular sensor fixture. Entities without one have no physical presence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub radius: f32,
    pub filter: CollisionFilter,
}

impl Sensor {
    pub fn overlaps(&self, pos: &Position, other: &Sensor, other_pos: &Position) -> bool {
        let reach = self.radius + other.radius;
        pos.0.distance_squared(other_pos.0) <= reach * reach
    }
}
