//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only: it never modifies the world.

use std::collections::HashMap;

use hecs::World;

use pirate_core::components::*;
use pirate_core::enums::*;
use pirate_core::events::{Alert, AudioEvent};
use pirate_core::state::*;
use pirate_core::types::{Position, SimTime, Velocity};

use crate::hud::Hud;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    hud: &Hud,
    shop: Option<ShopView>,
    alerts: Vec<Alert>,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        player: build_player(world),
        colleges: build_colleges(world),
        enemy_ships: build_enemy_ships(world),
        cannonballs: build_cannonballs(world),
        power_ups: build_power_ups(world),
        hud: hud.view(),
        shop,
        alerts,
        audio_events,
    }
}

fn build_player(world: &World) -> PlayerView {
    world
        .query::<(&PlayerStats, &Position, &Velocity)>()
        .iter()
        .next()
        .map(|(_, (stats, pos, vel))| PlayerView {
            x: pos.0.x,
            y: pos.0.y,
            speed: vel.speed(),
            heading: vel.0.y.atan2(vel.0.x),
            max_speed: stats.max_speed,
            acceleration: stats.acceleration,
            shooting_delay: stats.shooting_delay,
            cannon_velocity: stats.cannon_velocity,
        })
        .unwrap_or_default()
}

fn build_colleges(world: &World) -> Vec<CollegeView> {
    let mut fleets: HashMap<CollegeId, u32> = HashMap::new();
    for (_, ship) in world.query::<&EnemyShip>().iter() {
        if !ship.destroyed {
            *fleets.entry(ship.college).or_default() += 1;
        }
    }

    let mut colleges: Vec<CollegeView> = world
        .query::<(&College, &Position)>()
        .iter()
        .map(|(_, (college, pos))| CollegeView {
            id: college.id,
            name: college.id.name().to_string(),
            x: pos.0.x,
            y: pos.0.y,
            health: college.health,
            health_ratio: health_ratio(college.health, college.max_health),
            damage: college.damage,
            destroyed: college.destroyed,
            flag_asset: college.id.flag_asset(),
            fleet_remaining: fleets.get(&college.id).copied().unwrap_or(0),
        })
        .collect();
    colleges.sort_by_key(|c| c.id);
    colleges
}

fn build_enemy_ships(world: &World) -> Vec<EnemyShipView> {
    let mut ships: Vec<EnemyShipView> = world
        .query::<(&EnemyShip, &Position)>()
        .iter()
        .filter(|(_, (ship, _))| !ship.destroyed)
        .map(|(_, (ship, pos))| EnemyShipView {
            college: ship.college,
            x: pos.0.x,
            y: pos.0.y,
            health: ship.health,
            health_ratio: health_ratio(ship.health, ship.max_health),
            damage: ship.damage,
            sprite: ship.sprite.clone(),
        })
        .collect();
    ships.sort_by(|a, b| {
        a.college
            .cmp(&b.college)
            .then(a.x.total_cmp(&b.x))
            .then(a.y.total_cmp(&b.y))
    });
    ships
}

fn build_cannonballs(world: &World) -> Vec<CannonballView> {
    world
        .query::<(&Cannonball, &Position)>()
        .iter()
        .filter(|(_, (ball, _))| !ball.destroyed)
        .map(|(_, (ball, pos))| CannonballView {
            owner: ball.owner,
            x: pos.0.x,
            y: pos.0.y,
        })
        .collect()
}

/// Power-ups still on the map (not yet collected).
fn build_power_ups(world: &World) -> Vec<PowerUpView> {
    world
        .query::<(&PowerUp, &Position)>()
        .iter()
        .filter(|(_, (power_up, _))| !power_up.destroyed && !power_up.set_to_destroy)
        .map(|(_, (power_up, pos))| PowerUpView {
            kind: power_up.kind,
            x: pos.0.x,
            y: pos.0.y,
            texture: power_up.kind.texture().to_string(),
        })
        .collect()
}

fn health_ratio(health: i32, max: i32) -> f32 {
    if max <= 0 {
        return 0.0;
    }
    (health as f32 / max as f32).clamp(0.0, 1.0)
}
