//! Entity spawn factories for setting up the game world.
//!
//! Creates the player, colleges with their walls and fleets, power-ups
//! and cannonballs with the right component bundles.

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use pirate_core::components::*;
use pirate_core::config::SimConfig;
use pirate_core::constants::*;
use pirate_core::enums::*;
use pirate_core::types::{category, CollisionFilter, Position, Sensor, Velocity};

use crate::spawn_grid::SpawnGrid;

const PLAYER_FILTER: CollisionFilter = CollisionFilter::new(
    category::PLAYER,
    category::COLLEGE_FIRE
        | category::SPEED_BOOST
        | category::FASTER_SHOOTING
        | category::ABSORPTION_HEART,
);
const COLLEGE_SENSOR_FILTER: CollisionFilter =
    CollisionFilter::new(category::COLLEGE_SENSOR, category::CANNON);
const COLLEGE_WALL_FILTER: CollisionFilter =
    CollisionFilter::new(category::COLLEGE, category::CANNON);
const SHIP_FILTER: CollisionFilter = CollisionFilter::new(category::ENEMY, category::CANNON);
const PLAYER_SHOT_FILTER: CollisionFilter = CollisionFilter::new(
    category::CANNON,
    category::ENEMY | category::COLLEGE | category::COLLEGE_SENSOR,
);
const ENEMY_SHOT_FILTER: CollisionFilter =
    CollisionFilter::new(category::COLLEGE_FIRE, category::PLAYER);

/// Build a fresh game: player, all colleges with fleets, and power-ups.
pub fn setup_new_game(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    grid: &SpawnGrid,
    config: &SimConfig,
) {
    let (ax, ay) = CollegeId::Alcuin.position();
    spawn_player(
        world,
        Vec2::new(ax + PLAYER_SPAWN_OFFSET.0, ay + PLAYER_SPAWN_OFFSET.1),
        PlayerStats::default(),
    );

    let damage = COLLEGE_BASE_DAMAGE * config.difficulty.damage_factor();
    for id in CollegeId::ALL {
        spawn_college(world, new_college(id, damage));
        spawn_fleet(world, rng, grid, id, config.fleet_size);
    }

    for kind in PowerUpKind::ALL {
        for _ in 0..config.power_ups_per_kind {
            match grid.random_open_tile(rng, MAX_SPAWN_ATTEMPTS) {
                Some((x, y)) => {
                    spawn_power_up(
                        world,
                        PowerUp::new(kind),
                        Vec2::new(x as f32 + 0.5, y as f32 + 0.5),
                    );
                }
                None => log::warn!("no free tile for {:?}, skipping", kind),
            }
        }
    }
}

/// A college at full health.
pub fn new_college(id: CollegeId, damage: i32) -> College {
    College {
        id,
        health: COLLEGE_MAX_HEALTH,
        max_health: COLLEGE_MAX_HEALTH,
        damage,
        set_to_destroy: false,
        destroyed: false,
    }
}

/// A fleet ship at full health.
pub fn new_enemy_ship(college: CollegeId) -> EnemyShip {
    EnemyShip {
        college,
        health: SHIP_MAX_HEALTH,
        max_health: SHIP_MAX_HEALTH,
        damage: SHIP_BASE_DAMAGE,
        set_to_destroy: false,
        destroyed: false,
        sprite: college.ship_asset(),
    }
}

pub fn spawn_player(world: &mut World, at: Vec2, stats: PlayerStats) -> Entity {
    world.spawn((
        stats,
        SteerInput::default(),
        Position(at),
        Velocity::default(),
        Sensor {
            radius: PLAYER_RADIUS,
            filter: PLAYER_FILTER,
        },
    ))
}

/// Spawn a college and its four wall segments.
/// A destroyed college is spawned without sensors.
pub fn spawn_college(world: &mut World, college: College) -> Entity {
    let id = college.id;
    let (x, y) = id.position();
    let centre = Vec2::new(x, y);
    let destroyed = college.destroyed;

    let entity = world.spawn((
        college,
        Position(centre),
        Gunnery {
            cooldown: COLLEGE_FIRE_INTERVAL,
            interval: COLLEGE_FIRE_INTERVAL,
            range: COLLEGE_FIRE_RANGE,
            speed: COLLEGE_FIRE_SPEED,
            damage_to_player: COLLEGE_FIRE_DAMAGE,
        },
    ));
    if destroyed {
        return entity;
    }
    let _ = world.insert_one(
        entity,
        Sensor {
            radius: COLLEGE_RADIUS,
            filter: COLLEGE_SENSOR_FILTER,
        },
    );

    for offset in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y] {
        world.spawn((
            CollegeWall { college: id },
            Position(centre + offset * COLLEGE_WALL_OFFSET),
            Sensor {
                radius: COLLEGE_WALL_RADIUS,
                filter: COLLEGE_WALL_FILTER,
            },
        ));
    }
    entity
}

/// Spawn up to `count` ships around a college. Returns how many were placed.
pub fn spawn_fleet(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    grid: &SpawnGrid,
    college: CollegeId,
    count: u32,
) -> u32 {
    let mut placed = 0;
    for _ in 0..count {
        let Some((x, y)) = grid.random_tile(
            rng,
            college.position(),
            FLEET_SPAWN_HALF_EXTENT_PX,
            MAX_SPAWN_ATTEMPTS,
        ) else {
            log::warn!(
                "{} fleet: no valid spawn after {} attempts, placed {}/{}",
                college.name(),
                MAX_SPAWN_ATTEMPTS,
                placed,
                count
            );
            break;
        };
        spawn_enemy_ship(world, new_enemy_ship(college), Vec2::new(x as f32, y as f32));
        placed += 1;
    }
    placed
}

pub fn spawn_enemy_ship(world: &mut World, ship: EnemyShip, at: Vec2) -> Entity {
    world.spawn((
        ship,
        Station { x: at.x, y: at.y },
        Position(at),
        Velocity::default(),
        Sensor {
            radius: SHIP_RADIUS,
            filter: SHIP_FILTER,
        },
        Gunnery {
            cooldown: SHIP_FIRE_INTERVAL,
            interval: SHIP_FIRE_INTERVAL,
            range: SHIP_FIRE_RANGE,
            speed: SHIP_FIRE_SPEED,
            damage_to_player: SHIP_FIRE_DAMAGE,
        },
    ))
}

pub fn spawn_power_up(world: &mut World, power_up: PowerUp, at: Vec2) -> Entity {
    let kind = power_up.kind;
    world.spawn((
        power_up,
        Position(at),
        Sensor {
            radius: POWER_UP_RADIUS,
            filter: CollisionFilter::new(
                kind.category(),
                category::DEFAULT | category::PLAYER | category::ENEMY,
            ),
        },
    ))
}

/// Spawn a cannonball travelling along `direction` at `speed`.
pub fn spawn_cannonball(
    world: &mut World,
    owner: Faction,
    from: Vec2,
    direction: Vec2,
    speed: f32,
    damage_to_player: i32,
) -> Entity {
    let filter = match owner {
        Faction::Player => PLAYER_SHOT_FILTER,
        Faction::Ally | Faction::Hostile => ENEMY_SHOT_FILTER,
    };
    world.spawn((
        Cannonball {
            owner,
            damage_to_player,
            lifetime: CANNONBALL_LIFETIME,
            destroyed: false,
        },
        Position(from),
        Velocity(direction.normalize_or_zero() * speed),
        Sensor {
            radius: CANNONBALL_RADIUS,
            filter,
        },
    ))
}
