//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems,
//! apart from a few stat helpers on `PlayerStats`.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;

/// Marks the player's ship and carries its tunable stats.
/// Health is tracked by the HUD, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub max_speed: f32,
    pub acceleration: f32,
    /// Minimum seconds between shots.
    pub shooting_delay: f32,
    pub cannon_velocity: i32,
    /// Seconds until the cannon can fire again.
    pub fire_cooldown: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            max_speed: PLAYER_BASE_MAX_SPEED,
            acceleration: PLAYER_BASE_ACCELERATION,
            shooting_delay: PLAYER_BASE_SHOOTING_DELAY,
            cannon_velocity: PLAYER_BASE_CANNON_VELOCITY,
            fire_cooldown: 0.0,
        }
    }
}

impl PlayerStats {
    /// Raise max speed by a percentage.
    pub fn change_max_speed(&mut self, percent: f32) {
        self.max_speed *= 1.0 + percent / 100.0;
    }

    /// Raise acceleration by a percentage.
    pub fn change_acceleration(&mut self, percent: f32) {
        self.acceleration *= 1.0 + percent / 100.0;
    }

    /// Cut the shooting delay by a percentage.
    pub fn change_shooting_delay(&mut self, percent: f32) {
        self.shooting_delay *= 1.0 - percent / 100.0;
    }
}

/// Steering input latched from the last `Steer` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SteerInput {
    pub x: f32,
    pub y: f32,
}

/// An enemy (or allied) college.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub id: CollegeId,
    pub health: i32,
    pub max_health: i32,
    /// Damage taken per hit.
    pub damage: i32,
    pub set_to_destroy: bool,
    pub destroyed: bool,
}

/// A ship belonging to a college fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyShip {
    pub college: CollegeId,
    pub health: i32,
    pub max_health: i32,
    /// Damage taken per hit.
    pub damage: i32,
    pub set_to_destroy: bool,
    pub destroyed: bool,
    /// Texture path of the hull sprite.
    pub sprite: String,
}

/// Anchor point a fleet ship returns to when not chasing the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub x: f32,
    pub y: f32,
}

/// Fire control for colleges and ships.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gunnery {
    /// Seconds until the next volley.
    pub cooldown: f32,
    pub interval: f32,
    pub range: f32,
    /// Cannonball speed (units/s).
    pub speed: f32,
    /// Health the player loses when one of these shots lands.
    pub damage_to_player: i32,
}

/// A wall segment that forwards cannonball hits to its college.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeWall {
    pub college: CollegeId,
}

/// A cannonball in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cannonball {
    pub owner: Faction,
    /// Health the player loses if this ball hits them.
    pub damage_to_player: i32,
    /// Seconds left before the ball sinks.
    pub lifetime: f32,
    pub destroyed: bool,
}

/// A collectable power-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub active: bool,
    /// Seconds the effect has been running.
    pub timer: f32,
    pub duration: f32,
    pub set_to_destroy: bool,
    pub destroyed: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind) -> Self {
        Self {
            kind,
            active: false,
            timer: 0.0,
            duration: kind.duration(),
            set_to_destroy: false,
            destroyed: false,
        }
    }
}
