//! Player helm and cannon.

use glam::Vec2;
use hecs::World;

use pirate_core::components::{PlayerStats, SteerInput};
use pirate_core::constants::PLAYER_DRAG;
use pirate_core::enums::Faction;
use pirate_core::events::AudioEvent;
use pirate_core::types::{Position, Velocity};

use crate::world_setup;

/// Apply steering input and tick the cannon cooldown.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (stats, input, vel)) in
        world.query_mut::<(&mut PlayerStats, &SteerInput, &mut Velocity)>()
    {
        let dir = Vec2::new(input.x, input.y).normalize_or_zero();
        if dir == Vec2::ZERO {
            vel.0 *= PLAYER_DRAG;
        } else {
            vel.0 += dir * stats.acceleration;
        }
        vel.0 = vel.0.clamp_length_max(stats.max_speed);

        stats.fire_cooldown = (stats.fire_cooldown - dt).max(0.0);
    }
}

/// Latch a new steering direction.
pub fn steer(world: &mut World, x: f32, y: f32) {
    for (_entity, input) in world.query_mut::<&mut SteerInput>() {
        input.x = x;
        input.y = y;
    }
}

/// Fire a cannonball along `aim` if the cannon is ready.
/// Returns whether a shot was fired.
pub fn fire(
    world: &mut World,
    aim: Vec2,
    audio_events: &mut Vec<AudioEvent>,
    effects: Option<f32>,
) -> bool {
    if aim.normalize_or_zero() == Vec2::ZERO {
        return false;
    }

    let mut shot = None;
    for (_entity, (stats, pos)) in world.query_mut::<(&mut PlayerStats, &Position)>() {
        if stats.fire_cooldown > 0.0 {
            continue;
        }
        stats.fire_cooldown = stats.shooting_delay;
        shot = Some((pos.0, stats.cannon_velocity as f32));
    }

    let Some((from, speed)) = shot else {
        return false;
    };
    world_setup::spawn_cannonball(world, Faction::Player, from, aim, speed, 0);
    if let Some(volume) = effects {
        audio_events.push(AudioEvent::CannonFired {
            faction: Faction::Player,
            volume,
        });
    }
    true
}
