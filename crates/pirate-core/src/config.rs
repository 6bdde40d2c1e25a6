//! Session configuration.
//!
//! `SimConfig::default()` reproduces the stock game. A TOML file can
//! override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::Difficulty;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Audio preferences. The simulation only reads the effects settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub effects_enabled: bool,
    pub effects_volume: f32,
    pub music_enabled: bool,
    pub music_volume: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            effects_enabled: true,
            effects_volume: 0.5,
            music_enabled: true,
            music_volume: 0.5,
        }
    }
}

impl Preferences {
    /// Volume for a sound effect, or `None` when effects are muted.
    pub fn effects(&self) -> Option<f32> {
        self.effects_enabled.then_some(self.effects_volume)
    }

    /// Toggle effects and set their volume, clamped like a loaded config.
    pub fn set_effects(&mut self, enabled: bool, volume: f32) {
        self.effects_enabled = enabled;
        self.effects_volume = volume;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.effects_volume = clamp_volume(self.effects_volume);
        self.music_volume = clamp_volume(self.music_volume);
    }
}

/// Volumes live in [0, 1]. NaN is treated as silence.
fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same game.
    pub seed: u64,
    pub difficulty: Difficulty,
    pub preferences: Preferences,
    /// Ships spawned around each college on a new game.
    pub fleet_size: u32,
    /// Copies of each power-up scattered on a new game.
    pub power_ups_per_kind: u32,
    pub starting_coins: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: Difficulty::default(),
            preferences: Preferences::default(),
            fleet_size: 5,
            power_ups_per_kind: 3,
            starting_coins: 0,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut config: SimConfig = toml::from_str(s)?;
        config.preferences.clamp();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
