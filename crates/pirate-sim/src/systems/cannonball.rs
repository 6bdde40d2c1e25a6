//! Cannonball expiry.

use hecs::World;

use pirate_core::components::Cannonball;

/// Age every cannonball; balls past their lifetime sink.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, ball) in world.query_mut::<&mut Cannonball>() {
        ball.lifetime -= dt;
        if ball.lifetime <= 0.0 {
            ball.destroyed = true;
        }
    }
}
