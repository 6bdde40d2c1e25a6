//! College lifecycle: destruction, rewards and taking hits.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use pirate_core::components::{College, CollegeWall};
use pirate_core::constants::*;
use pirate_core::events::AudioEvent;
use pirate_core::types::Sensor;

use crate::hud::Hud;

/// Run the college update.
///
/// A college flagged last tick is destroyed now: its sensors go away and
/// the player is rewarded, unless it was Alcuin. A college at zero health
/// is flagged, so destruction always lands one tick after the killing blow.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    hud: &mut Hud,
    audio_events: &mut Vec<AudioEvent>,
    effects: Option<f32>,
) {
    let mut fallen = Vec::new();

    for (entity, college) in world.query_mut::<&mut College>() {
        if college.set_to_destroy && !college.destroyed {
            college.destroyed = true;
            fallen.push((entity, college.id));

            if college.id.is_ally() {
                log::info!("{} has fallen", college.id.name());
            } else {
                hud.change_points(COLLEGE_DESTROY_POINTS);
                hud.change_coins(rng.gen_range(0..COLLEGE_DESTROY_MAX_COINS));
                log::info!("{} destroyed", college.id.name());
            }
            audio_events.push(AudioEvent::CollegeDestroyed {
                college: college.id,
                volume: effects.unwrap_or(0.0),
            });
        }

        if college.health <= 0 {
            college.set_to_destroy = true;
        }
    }

    for (entity, id) in fallen {
        let _ = world.remove_one::<Sensor>(entity);
        let walls: Vec<Entity> = world
            .query::<&CollegeWall>()
            .iter()
            .filter(|(_, wall)| wall.college == id)
            .map(|(e, _)| e)
            .collect();
        for wall in walls {
            let _ = world.despawn(wall);
        }
    }
}

/// A player cannonball struck the college or one of its walls.
/// Returns false if the college was already destroyed.
pub fn on_contact(
    college: &mut College,
    audio_events: &mut Vec<AudioEvent>,
    effects: Option<f32>,
) -> bool {
    if college.destroyed {
        return false;
    }
    college.health -= college.damage;
    log::debug!(
        "{} hit for {}, health {}",
        college.id.name(),
        college.damage,
        college.health
    );
    if let Some(volume) = effects {
        audio_events.push(AudioEvent::Explosion { volume });
    }
    true
}
