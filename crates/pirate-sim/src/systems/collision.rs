//! Contact detection and dispatch.
//!
//! Stands in for the physics engine's contact listener: overlapping
//! sensors whose filters accept each other produce a contact, which is
//! routed to the owning entity's contact handler.

use std::collections::HashMap;

use hecs::{Entity, World};

use pirate_core::components::*;
use pirate_core::enums::CollegeId;
use pirate_core::events::AudioEvent;
use pirate_core::types::{Position, Sensor};

use crate::hud::Hud;
use crate::systems::{college, enemy_ship, power_ups};

/// What a cannonball ran into.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    College(Entity),
    Ship(Entity),
    Player,
}

/// Run contact detection for cannonballs and power-up pickups.
pub fn run(
    world: &mut World,
    hud: &mut Hud,
    audio_events: &mut Vec<AudioEvent>,
    effects: Option<f32>,
) {
    resolve_cannonballs(world, hud, audio_events, effects);
    resolve_pickups(world, hud, audio_events, effects);
}

fn resolve_cannonballs(
    world: &mut World,
    hud: &mut Hud,
    audio_events: &mut Vec<AudioEvent>,
    effects: Option<f32>,
) {
    let balls: Vec<(Entity, Position, Sensor, i32)> = world
        .query::<(&Cannonball, &Position, &Sensor)>()
        .iter()
        .filter(|(_, (ball, _, _))| !ball.destroyed)
        .map(|(e, (ball, pos, sensor))| (e, *pos, *sensor, ball.damage_to_player))
        .collect();
    if balls.is_empty() {
        return;
    }

    let college_entities: HashMap<CollegeId, Entity> = world
        .query::<&College>()
        .iter()
        .map(|(e, c)| (c.id, e))
        .collect();

    // Everything a ball can hit, tagged with the handler it routes to.
    let mut targets: Vec<(Target, Position, Sensor)> = Vec::new();
    for (entity, (pos, sensor, college, wall, ship, player)) in world
        .query::<(
            &Position,
            &Sensor,
            Option<&College>,
            Option<&CollegeWall>,
            Option<&EnemyShip>,
            Option<&PlayerStats>,
        )>()
        .iter()
    {
        let target = if college.is_some() {
            Target::College(entity)
        } else if let Some(wall) = wall {
            match college_entities.get(&wall.college) {
                Some(&owner) => Target::College(owner),
                None => continue,
            }
        } else if ship.is_some() {
            Target::Ship(entity)
        } else if player.is_some() {
            Target::Player
        } else {
            continue;
        };
        targets.push((target, *pos, *sensor));
    }

    for (ball_entity, ball_pos, ball_sensor, damage_to_player) in balls {
        let hit = targets.iter().find(|(_, pos, sensor)| {
            ball_sensor.filter.accepts(&sensor.filter)
                && ball_sensor.overlaps(&ball_pos, sensor, pos)
        });
        let Some(&(target, _, _)) = hit else {
            continue;
        };

        let landed = match target {
            Target::College(entity) => match world.get::<&mut College>(entity) {
                Ok(mut c) => college::on_contact(&mut c, audio_events, effects),
                Err(_) => false,
            },
            Target::Ship(entity) => match world.get::<&mut EnemyShip>(entity) {
                Ok(mut s) => enemy_ship::on_contact(&mut s, audio_events, effects),
                Err(_) => false,
            },
            Target::Player => {
                hud.change_health(-damage_to_player);
                log::debug!("player hit for {}, health {}", damage_to_player, hud.health);
                true
            }
        };

        if landed {
            if let Ok(mut ball) = world.get::<&mut Cannonball>(ball_entity) {
                ball.destroyed = true;
            }
        }
    }
}

fn resolve_pickups(
    world: &mut World,
    hud: &mut Hud,
    audio_events: &mut Vec<AudioEvent>,
    effects: Option<f32>,
) {
    let Some((player_entity, player_pos, player_sensor)) = world
        .query::<(&PlayerStats, &Position, &Sensor)>()
        .iter()
        .next()
        .map(|(e, (_, pos, sensor))| (e, *pos, *sensor))
    else {
        return;
    };

    let touched: Vec<Entity> = world
        .query::<(&PowerUp, &Position, &Sensor)>()
        .iter()
        .filter(|(_, (power_up, pos, sensor))| {
            !power_up.destroyed
                && player_sensor.filter.accepts(&sensor.filter)
                && player_sensor.overlaps(&player_pos, sensor, pos)
        })
        .map(|(e, _)| e)
        .collect();

    for entity in touched {
        let Ok(mut stats) = world.get::<&mut PlayerStats>(player_entity) else {
            return;
        };
        if let Ok(mut power_up) = world.get::<&mut PowerUp>(entity) {
            power_ups::entity_contact(&mut power_up, &mut stats, hud, audio_events, effects);
        }
    }
}
