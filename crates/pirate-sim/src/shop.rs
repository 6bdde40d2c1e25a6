//! The gold shop: permanent upgrades bought with coins.

use hecs::World;
use thiserror::Error;

use pirate_core::components::{College, EnemyShip, PlayerStats};
use pirate_core::constants::*;
use pirate_core::enums::ShopItem;
use pirate_core::state::{ShopButtonView, ShopView};

use crate::hud::Hud;

/// Rounding slack for the faster-cannon cap. 5 * 1.2 and 10 * 1.2 land on
/// whole numbers that f32 cannot hit exactly.
const VELOCITY_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("You do not have enough coins to purchase this powerup")]
    NotEnoughCoins,
    #[error("You do not have enough coins to purchase this boost!")]
    NotEnoughCoinsForBoost,
    #[error("Cannot purchase again: you have maximised this powerup")]
    MaxedOut,
    #[error("This item is not available yet")]
    Locked,
    #[error("The gold shop is closed")]
    Closed,
    #[error("There is no ship to upgrade")]
    NoShip,
}

/// Shop state. Button states belong to the instance.
#[derive(Debug, Clone, PartialEq)]
pub struct GoldShop {
    display: bool,
    enabled: [bool; 4],
}

impl Default for GoldShop {
    fn default() -> Self {
        Self {
            display: false,
            enabled: [true, true, true, false],
        }
    }
}

impl GoldShop {
    pub fn is_enabled(&self, item: ShopItem) -> bool {
        self.enabled[item.index()]
    }

    pub fn show(&mut self) -> ShopView {
        self.display = true;
        self.build_view()
    }

    pub fn close(&mut self) {
        self.display = false;
    }

    /// The overlay, if the shop is on screen.
    pub fn view(&self) -> Option<ShopView> {
        self.display.then(|| self.build_view())
    }

    fn build_view(&self) -> ShopView {
        ShopView {
            title: "Gold Shop".to_string(),
            buttons: ShopItem::ALL
                .iter()
                .map(|&item| ShopButtonView {
                    item,
                    label: label(item),
                    price_label: format!("{} gold", item.price()),
                    enabled: self.is_enabled(item),
                })
                .collect(),
        }
    }

    /// Buy an item. On success returns the confirmation message.
    /// A failed purchase leaves the world and the HUD untouched.
    pub fn purchase(
        &self,
        item: ShopItem,
        world: &mut World,
        hud: &mut Hud,
    ) -> Result<String, ShopError> {
        if !self.display {
            return Err(ShopError::Closed);
        }
        if !self.is_enabled(item) {
            return Err(ShopError::Locked);
        }
        let message = match item {
            ShopItem::FasterCannon => purchase_faster_cannon(world, hud)?,
            ShopItem::HealthBoost => purchase_health_boost(hud)?,
            ShopItem::IncreaseCannonDamage => purchase_increase_cannon_damage(world, hud)?,
            ShopItem::Mystery => return Err(ShopError::Locked),
        };
        log::debug!("bought {:?}, {} coins left", item, hud.coins);
        Ok(message)
    }
}

fn label(item: ShopItem) -> String {
    match item {
        ShopItem::FasterCannon => format!(
            "Cannon ball speed +{}",
            multiplier_to_percent(FASTER_CANNON_MULTIPLIER)
        ),
        ShopItem::HealthBoost => format!("Health Boost +{}", HEALTH_BOOST_VALUE),
        ShopItem::IncreaseCannonDamage => format!(
            "Increase Cannon Damage +{}",
            multiplier_to_percent(INCREASE_CANNON_DAMAGE_MULTIPLIER)
        ),
        ShopItem::Mystery => "????????????".to_string(),
    }
}

/// 1.2 -> "20%".
pub fn multiplier_to_percent(multiplier: f32) -> String {
    format!("{}%", (multiplier * 100.0) as i32 - 100)
}

fn purchase_faster_cannon(world: &mut World, hud: &mut Hud) -> Result<String, ShopError> {
    if hud.coins < FASTER_CANNON_PRICE {
        return Err(ShopError::NotEnoughCoins);
    }
    let Some((_entity, stats)) = world.query_mut::<&mut PlayerStats>().into_iter().next() else {
        return Err(ShopError::NoShip);
    };
    let boosted = stats.cannon_velocity as f32 * FASTER_CANNON_MULTIPLIER;
    if boosted > MAX_CANNON_VELOCITY + VELOCITY_EPSILON {
        return Err(ShopError::MaxedOut);
    }
    stats.cannon_velocity = (boosted - VELOCITY_EPSILON).ceil() as i32;
    hud.change_coins(-FASTER_CANNON_PRICE);
    log::debug!("cannon velocity now {}", stats.cannon_velocity);
    Ok(format!(
        "Your cannon now fires {} faster!",
        multiplier_to_percent(FASTER_CANNON_MULTIPLIER)
    ))
}

fn purchase_health_boost(hud: &mut Hud) -> Result<String, ShopError> {
    if hud.coins < HEALTH_BOOST_PRICE {
        return Err(ShopError::NotEnoughCoinsForBoost);
    }
    hud.change_coins(-HEALTH_BOOST_PRICE);
    hud.change_health(HEALTH_BOOST_VALUE);
    Ok(format!(
        "You have received a health boost of {}!",
        HEALTH_BOOST_VALUE
    ))
}

fn purchase_increase_cannon_damage(world: &mut World, hud: &mut Hud) -> Result<String, ShopError> {
    if hud.coins < INCREASE_CANNON_DAMAGE_PRICE {
        return Err(ShopError::NotEnoughCoins);
    }
    hud.change_coins(-INCREASE_CANNON_DAMAGE_PRICE);
    for (_entity, college) in world.query_mut::<&mut College>() {
        college.damage = boost_damage(college.damage);
    }
    for (_entity, ship) in world.query_mut::<&mut EnemyShip>() {
        ship.damage = boost_damage(ship.damage);
    }
    Ok(format!(
        "Cannon damage has been increased by {}",
        multiplier_to_percent(INCREASE_CANNON_DAMAGE_MULTIPLIER)
    ))
}

fn boost_damage(damage: i32) -> i32 {
    (damage as f32 * INCREASE_CANNON_DAMAGE_MULTIPLIER).round() as i32
}
