//! Game state snapshot: the complete visible state handed to the host each tick.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Alert, AudioEvent};
use crate::types::SimTime;

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub colleges: Vec<CollegeView>,
    pub enemy_ships: Vec<EnemyShipView>,
    pub cannonballs: Vec<CannonballView>,
    pub power_ups: Vec<PowerUpView>,
    pub hud: HudView,
    /// Present while the gold shop is displayed.
    pub shop: Option<ShopView>,
    pub alerts: Vec<Alert>,
    pub audio_events: Vec<AudioEvent>,
}

/// The player's ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// Heading in radians (0 = East, counter-clockwise).
    pub heading: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub shooting_delay: f32,
    pub cannon_velocity: i32,
}

/// A college and its health bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeView {
    pub id: CollegeId,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    /// Health bar fill (0.0 - 1.0).
    pub health_ratio: f32,
    pub damage: i32,
    pub destroyed: bool,
    pub flag_asset: String,
    /// Ships of this college still afloat.
    pub fleet_remaining: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyShipView {
    pub college: CollegeId,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub health_ratio: f32,
    pub damage: i32,
    pub sprite: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CannonballView {
    pub owner: Faction,
    pub x: f32,
    pub y: f32,
}

/// A power-up still lying on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
    pub texture: String,
}

/// Heads-up display values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub points: i32,
    pub coins: i32,
    pub health: i32,
    /// Seconds left on each running power-up.
    pub power_up_timers: BTreeMap<PowerUpKind, f32>,
}

/// The gold shop overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopView {
    pub title: String,
    pub buttons: Vec<ShopButtonView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopButtonView {
    pub item: ShopItem,
    pub label: String,
    pub price_label: String,
    pub enabled: bool,
}
