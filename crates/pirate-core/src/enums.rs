//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::category;

/// The four colleges on the map. Alcuin is the player's home college.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollegeId {
    Alcuin,
    AnneLister,
    Constantine,
    Goodricke,
}

impl CollegeId {
    pub const ALL: [CollegeId; 4] = [
        CollegeId::Alcuin,
        CollegeId::AnneLister,
        CollegeId::Constantine,
        CollegeId::Goodricke,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Alcuin => "Alcuin",
            Self::AnneLister => "Anne Lister",
            Self::Constantine => "Constantine",
            Self::Goodricke => "Goodricke",
        }
    }

    /// Asset stem used to build flag and ship texture paths.
    pub fn file_path(&self) -> &'static str {
        match self {
            Self::Alcuin => "alcuin",
            Self::AnneLister => "anne_lister",
            Self::Constantine => "constantine",
            Self::Goodricke => "goodricke",
        }
    }

    /// Map position of the college (world units).
    pub fn position(&self) -> (f32, f32) {
        match self {
            Self::Alcuin => (19.0, 21.0),
            Self::AnneLister => (46.0, 79.0),
            Self::Constantine => (78.0, 30.0),
            Self::Goodricke => (83.0, 82.0),
        }
    }

    pub fn is_ally(&self) -> bool {
        matches!(self, Self::Alcuin)
    }

    pub fn faction(&self) -> Faction {
        if self.is_ally() {
            Faction::Ally
        } else {
            Faction::Hostile
        }
    }

    pub fn flag_asset(&self) -> String {
        format!("college/Flags/{}_flag.png", self.file_path())
    }

    pub fn ship_asset(&self) -> String {
        format!("college/Ships/{}_ship.png", self.file_path())
    }
}

/// Who an entity fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Ally,
    Hostile,
}

/// Collectable power-up types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    FasterShooting,
    AbsorptionHeart,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::FasterShooting,
        PowerUpKind::AbsorptionHeart,
    ];

    /// How long the effect lasts once collected (seconds).
    pub fn duration(&self) -> f32 {
        match self {
            Self::SpeedBoost => SPEED_BOOST_DURATION,
            Self::FasterShooting => FASTER_SHOOTING_DURATION,
            Self::AbsorptionHeart => ABSORPTION_HEART_DURATION,
        }
    }

    pub fn texture(&self) -> &'static str {
        match self {
            Self::SpeedBoost => "entity/bolt.png",
            Self::FasterShooting => "entity/gun.png",
            Self::AbsorptionHeart => "entity/heart.png",
        }
    }

    /// Key of the HUD countdown for this kind.
    pub fn timer_key(&self) -> &'static str {
        match self {
            Self::SpeedBoost => "speedBoost",
            Self::FasterShooting => "fasterShooting",
            Self::AbsorptionHeart => "absorptionHeart",
        }
    }

    pub fn category(&self) -> u16 {
        match self {
            Self::SpeedBoost => category::SPEED_BOOST,
            Self::FasterShooting => category::FASTER_SHOOTING,
            Self::AbsorptionHeart => category::ABSORPTION_HEART,
        }
    }
}

/// Items sold in the gold shop, in button order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopItem {
    FasterCannon,
    HealthBoost,
    IncreaseCannonDamage,
    /// Placeholder for a future unlock. Always disabled.
    Mystery,
}

impl ShopItem {
    pub const ALL: [ShopItem; 4] = [
        ShopItem::FasterCannon,
        ShopItem::HealthBoost,
        ShopItem::IncreaseCannonDamage,
        ShopItem::Mystery,
    ];

    pub fn price(&self) -> i32 {
        match self {
            Self::FasterCannon => FASTER_CANNON_PRICE,
            Self::HealthBoost => HEALTH_BOOST_PRICE,
            Self::IncreaseCannonDamage => INCREASE_CANNON_DAMAGE_PRICE,
            Self::Mystery => MYSTERY_ITEM_PRICE,
        }
    }

    /// Button index in the shop layout.
    pub fn index(&self) -> usize {
        match self {
            Self::FasterCannon => 0,
            Self::HealthBoost => 1,
            Self::IncreaseCannonDamage => 2,
            Self::Mystery => 3,
        }
    }
}

/// Game difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Multiplier on the damage colleges take per hit.
    pub fn damage_factor(&self) -> i32 {
        match self {
            Self::Easy => 3,
            Self::Normal => 2,
            Self::Hard => 1,
        }
    }
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// Gold shop open; the world is frozen.
    Shop,
    Victory,
    Defeat,
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Error,
}
