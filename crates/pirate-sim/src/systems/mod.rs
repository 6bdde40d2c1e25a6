//! ECS systems that operate on the game world each tick.
//!
//! Systems are plain functions over `&mut World` plus whatever engine
//! state they touch (HUD, RNG, event buffers). They own no state.

pub mod cannonball;
pub mod cleanup;
pub mod college;
pub mod collision;
pub mod enemy_ship;
pub mod game_over;
pub mod gunnery;
pub mod movement;
pub mod player;
pub mod power_ups;
pub mod snapshot;

use hecs::{Entity, World};

use pirate_core::components::PlayerStats;
use pirate_core::types::Position;

/// The player's entity and position, if the player exists.
pub fn find_player(world: &World) -> Option<(Entity, Position)> {
    world
        .query::<(&PlayerStats, &Position)>()
        .iter()
        .next()
        .map(|(entity, (_, pos))| (entity, *pos))
}
