//! Fire control for colleges and fleet ships.

use glam::Vec2;
use hecs::World;

use pirate_core::components::{College, EnemyShip, Gunnery};
use pirate_core::enums::Faction;
use pirate_core::events::AudioEvent;
use pirate_core::types::Position;

use crate::systems::find_player;
use crate::world_setup;

/// Tick every battery and fire at the player when in range.
///
/// Only standing hostile colleges and ships fire. A battery whose
/// cooldown has run out waits, loaded, until the player comes in range.
pub fn run(
    world: &mut World,
    audio_events: &mut Vec<AudioEvent>,
    effects: Option<f32>,
    dt: f32,
) {
    let Some((_, player_pos)) = find_player(world) else {
        return;
    };

    let mut volleys: Vec<(Vec2, Vec2, f32, i32)> = Vec::new();
    for (_entity, (gunnery, pos, college, ship)) in world.query_mut::<(
        &mut Gunnery,
        &Position,
        Option<&College>,
        Option<&EnemyShip>,
    )>() {
        let hostile_and_standing = match (college, ship) {
            (Some(c), _) => !c.id.is_ally() && !c.destroyed && !c.set_to_destroy,
            (None, Some(s)) => !s.college.is_ally() && !s.destroyed && !s.set_to_destroy,
            (None, None) => false,
        };
        if !hostile_and_standing {
            continue;
        }

        gunnery.cooldown = (gunnery.cooldown - dt).max(0.0);
        if gunnery.cooldown > 0.0 || pos.0.distance(player_pos.0) > gunnery.range {
            continue;
        }
        gunnery.cooldown = gunnery.interval;
        volleys.push((
            pos.0,
            player_pos.0 - pos.0,
            gunnery.speed,
            gunnery.damage_to_player,
        ));
    }

    for (from, aim, speed, damage) in volleys {
        world_setup::spawn_cannonball(world, Faction::Hostile, from, aim, speed, damage);
        if let Some(volume) = effects {
            audio_events.push(AudioEvent::CannonFired {
                faction: Faction::Hostile,
                volume,
            });
        }
    }
}
