//! Win/lose evaluation.

use hecs::World;

use pirate_core::components::College;
use pirate_core::enums::GamePhase;

use crate::hud::Hud;

/// Decide whether the game has ended.
///
/// Losing Alcuin or running out of health is a defeat; destroying every
/// hostile college is a victory. Defeat wins a tie.
pub fn check(world: &World, hud: &Hud) -> Option<GamePhase> {
    let mut alcuin_lost = false;
    let mut hostiles_standing = 0;
    let mut hostiles = 0;

    for (_entity, college) in world.query::<&College>().iter() {
        if college.id.is_ally() {
            alcuin_lost |= college.destroyed;
        } else {
            hostiles += 1;
            if !college.destroyed {
                hostiles_standing += 1;
            }
        }
    }

    if alcuin_lost || hud.health <= 0 {
        Some(GamePhase::Defeat)
    } else if hostiles > 0 && hostiles_standing == 0 {
        Some(GamePhase::Victory)
    } else {
        None
    }
}
