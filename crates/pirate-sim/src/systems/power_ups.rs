//! Power-up lifecycle: pickup, countdown and expiry.

use hecs::World;

use pirate_core::components::{PlayerStats, PowerUp};
use pirate_core::constants::*;
use pirate_core::enums::PowerUpKind;
use pirate_core::events::AudioEvent;
use pirate_core::types::Sensor;

use crate::hud::Hud;

/// Run the power-up update.
///
/// 1. A power-up flagged on pickup loses its sensor and is marked destroyed.
/// 2. An effect that has outlived its duration ends and its timers reset.
/// 3. Otherwise a running effect advances its timer and the HUD countdown.
pub fn run(
    world: &mut World,
    hud: &mut Hud,
    audio_events: &mut Vec<AudioEvent>,
    effects: Option<f32>,
    dt: f32,
) {
    let mut collected = Vec::new();
    let mut ended = Vec::new();

    for (entity, power_up) in world.query_mut::<&mut PowerUp>() {
        if power_up.set_to_destroy && !power_up.destroyed {
            power_up.destroyed = true;
            collected.push(entity);
        }

        if power_up.timer > power_up.duration {
            power_up.active = false;
            power_up.timer = 0.0;
            hud.set_power_up_timer(power_up.kind, 0.0);
            ended.push(power_up.kind);
        } else if power_up.active {
            power_up.timer += dt;
            let left = hud.power_up_timer(power_up.kind) - dt;
            hud.set_power_up_timer(power_up.kind, left);
        }
    }

    for entity in collected {
        let _ = world.remove_one::<Sensor>(entity);
    }

    for kind in ended {
        for (_entity, stats) in world.query_mut::<&mut PlayerStats>() {
            end_power_up(kind, stats);
        }
        audio_events.push(AudioEvent::PowerUpEnded {
            kind,
            volume: effects.unwrap_or(0.0),
        });
    }
}

/// The player touched a power-up. Returns false if it was already taken.
pub fn entity_contact(
    power_up: &mut PowerUp,
    stats: &mut PlayerStats,
    hud: &mut Hud,
    audio_events: &mut Vec<AudioEvent>,
    effects: Option<f32>,
) -> bool {
    if power_up.destroyed || power_up.set_to_destroy {
        return false;
    }
    power_up.active = true;

    match power_up.kind {
        PowerUpKind::SpeedBoost => {
            hud.set_power_up_timer(power_up.kind, power_up.duration);
            stats.change_max_speed(SPEED_BOOST_MAX_SPEED_PERCENT);
            stats.change_acceleration(SPEED_BOOST_ACCELERATION_PERCENT);
        }
        PowerUpKind::FasterShooting => {
            hud.set_power_up_timer(power_up.kind, power_up.duration);
            stats.change_shooting_delay(FASTER_SHOOTING_DELAY_PERCENT);
        }
        PowerUpKind::AbsorptionHeart => {
            let left = hud.power_up_timer(power_up.kind) + power_up.duration;
            hud.set_power_up_timer(power_up.kind, left);
            hud.change_health(ABSORPTION_HEART_HEAL);
        }
    }

    power_up.set_to_destroy = true;
    log::debug!("{:?} collected", power_up.kind);
    if let Some(volume) = effects {
        audio_events.push(AudioEvent::PowerUpCollected {
            kind: power_up.kind,
            volume,
        });
    }
    true
}

/// Undo a power-up's effect by restoring base stats.
pub fn end_power_up(kind: PowerUpKind, stats: &mut PlayerStats) {
    match kind {
        PowerUpKind::SpeedBoost => {
            stats.max_speed = PLAYER_BASE_MAX_SPEED;
            stats.acceleration = PLAYER_BASE_ACCELERATION;
        }
        PowerUpKind::FasterShooting => {
            stats.shooting_delay = PLAYER_BASE_SHOOTING_DELAY;
        }
        PowerUpKind::AbsorptionHeart => {}
    }
    log::debug!("{:?} ended", kind);
}
