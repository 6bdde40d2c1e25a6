//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::ShopItem;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Build the world and start playing.
    StartGame,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,

    // --- Ship control ---
    /// Set the steering direction. (0, 0) releases the helm.
    Steer { x: f32, y: f32 },
    /// Fire a cannonball in the given direction.
    Fire { x: f32, y: f32 },

    // --- Gold shop ---
    /// Open the gold shop (pauses the world).
    OpenShop,
    /// Close the gold shop and resume.
    CloseShop,
    /// Buy an item. Only accepted while the shop is open.
    Purchase { item: ShopItem },

    // --- Preferences ---
    /// Toggle sound effects and set their volume.
    SetEffects { enabled: bool, volume: f32 },
}
