//! Fleet ship lifecycle and helm.

use glam::Vec2;
use hecs::World;

use pirate_core::components::{EnemyShip, Station};
use pirate_core::constants::*;
use pirate_core::events::AudioEvent;
use pirate_core::types::{Position, Sensor, Velocity};

use crate::hud::Hud;
use crate::systems::find_player;

/// Distance at which a ship counts as back on station.
const STATION_TOLERANCE: f32 = 0.1;

/// Run the ship update: destruction, rewards and steering.
pub fn run(
    world: &mut World,
    hud: &mut Hud,
    audio_events: &mut Vec<AudioEvent>,
    effects: Option<f32>,
) {
    let player_pos = find_player(world).map(|(_, pos)| pos.0);
    let mut sunk = Vec::new();

    for (entity, (ship, station, pos, vel)) in
        world.query_mut::<(&mut EnemyShip, &Station, &Position, &mut Velocity)>()
    {
        if ship.set_to_destroy && !ship.destroyed {
            ship.destroyed = true;
            vel.0 = Vec2::ZERO;
            sunk.push(entity);

            if !ship.college.is_ally() {
                hud.change_points(SHIP_SINK_POINTS);
                hud.change_coins(SHIP_SINK_COINS);
            }
            log::debug!("{} ship sunk", ship.college.name());
            audio_events.push(AudioEvent::ShipSunk {
                college: ship.college,
                volume: effects.unwrap_or(0.0),
            });
        } else if !ship.destroyed {
            vel.0 = helm(ship, station, pos.0, player_pos);
        }

        if ship.health <= 0 {
            ship.set_to_destroy = true;
        }
    }

    for entity in sunk {
        let _ = world.remove_one::<Sensor>(entity);
    }
}

/// Hostile ships chase a nearby player, otherwise they sail back to station.
/// Allied ships hold station.
fn helm(ship: &EnemyShip, station: &Station, pos: Vec2, player: Option<Vec2>) -> Vec2 {
    if !ship.college.is_ally() {
        if let Some(target) = player {
            if pos.distance(target) <= SHIP_AGGRO_RANGE {
                return (target - pos).normalize_or_zero() * SHIP_SPEED;
            }
        }
    }

    let home = Vec2::new(station.x, station.y);
    let to_home = home - pos;
    if to_home.length() <= STATION_TOLERANCE {
        Vec2::ZERO
    } else {
        to_home.normalize() * SHIP_SPEED.min(to_home.length() * TICK_RATE as f32)
    }
}

/// A player cannonball struck the ship.
/// Returns false if the ship was already sunk.
pub fn on_contact(
    ship: &mut EnemyShip,
    audio_events: &mut Vec<AudioEvent>,
    effects: Option<f32>,
) -> bool {
    if ship.destroyed {
        return false;
    }
    ship.health -= ship.damage;
    if let Some(volume) = effects {
        audio_events.push(AudioEvent::Explosion { volume });
    }
    true
}
