//! Cleanup system: removes entities that have left play.

use hecs::{Entity, World};

use pirate_core::components::{Cannonball, EnemyShip, PowerUp};

/// Despawn spent cannonballs, sunk ships and power-ups whose effect is over.
/// Colleges stay in the world after destruction.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, ball) in world.query_mut::<&Cannonball>() {
        if ball.destroyed {
            despawn_buffer.push(entity);
        }
    }

    for (entity, ship) in world.query_mut::<&EnemyShip>() {
        if ship.destroyed {
            despawn_buffer.push(entity);
        }
    }

    // A collected power-up keeps ticking its timer until the effect ends.
    for (entity, power_up) in world.query_mut::<&PowerUp>() {
        if power_up.destroyed && !power_up.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
