//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Audio cues for the engine's sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A cannonball struck a college or ship.
    Explosion { volume: f32 },
    /// The player picked up a power-up.
    PowerUpCollected { kind: PowerUpKind, volume: f32 },
    /// A power-up effect wore off.
    PowerUpEnded { kind: PowerUpKind, volume: f32 },
    /// A gold shop purchase went through.
    Purchase { volume: f32 },
    /// A cannon was fired.
    CannonFired { faction: Faction, volume: f32 },
    /// A college fell.
    CollegeDestroyed { college: CollegeId, volume: f32 },
    /// A fleet ship sank.
    ShipSunk { college: CollegeId, volume: f32 },
}

/// Message dialog for the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
    pub tick: u64,
}
