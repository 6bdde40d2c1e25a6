//! Heads-up display state: points, coins, health and power-up countdowns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pirate_core::constants::PLAYER_START_HEALTH;
use pirate_core::enums::PowerUpKind;
use pirate_core::state::HudView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub points: i32,
    pub coins: i32,
    pub health: i32,
    /// Seconds left on each power-up countdown.
    pub power_up_timers: BTreeMap<PowerUpKind, f32>,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            points: 0,
            coins: 0,
            health: PLAYER_START_HEALTH,
            power_up_timers: BTreeMap::new(),
        }
    }
}

impl Hud {
    pub fn change_points(&mut self, value: i32) {
        self.points += value;
    }

    /// Add (or remove) coins. The balance never drops below zero.
    pub fn change_coins(&mut self, value: i32) {
        self.coins = (self.coins + value).max(0);
    }

    pub fn set_coins(&mut self, value: i32) {
        self.coins = value.max(0);
    }

    pub fn change_health(&mut self, value: i32) {
        self.health += value;
    }

    pub fn power_up_timer(&self, kind: PowerUpKind) -> f32 {
        self.power_up_timers.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn set_power_up_timer(&mut self, kind: PowerUpKind, secs: f32) {
        self.power_up_timers.insert(kind, secs.max(0.0));
    }

    pub fn view(&self) -> HudView {
        HudView {
            points: self.points,
            coins: self.coins,
            health: self.health,
            power_up_timers: self
                .power_up_timers
                .iter()
                .filter(|(_, secs)| **secs > 0.0)
                .map(|(k, v)| (*k, *v))
                .collect(),
        }
    }
}
