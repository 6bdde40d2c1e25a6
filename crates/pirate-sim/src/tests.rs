//! Tests for the simulation engine, game rules, the shop and saves.

use glam::Vec2;
use hecs::Entity;

use pirate_core::commands::PlayerCommand;
use pirate_core::components::*;
use pirate_core::config::SimConfig;
use pirate_core::constants::*;
use pirate_core::enums::*;
use pirate_core::events::AudioEvent;
use pirate_core::types::{Position, Velocity};

use crate::engine::SimulationEngine;
use crate::persistence::SaveError;
use crate::world_setup;

fn started(config: SimConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick();
    engine
}

fn college_entity(engine: &SimulationEngine, id: CollegeId) -> Entity {
    engine
        .world()
        .query::<&College>()
        .iter()
        .find(|(_, c)| c.id == id)
        .map(|(e, _)| e)
        .unwrap()
}

fn set_college_health(engine: &mut SimulationEngine, id: CollegeId, health: i32) {
    let entity = college_entity(engine, id);
    engine.world_mut().get::<&mut College>(entity).unwrap().health = health;
}

fn move_player(engine: &mut SimulationEngine, to: Vec2) {
    for (_e, (_stats, pos)) in engine
        .world_mut()
        .query_mut::<(&PlayerStats, &mut Position)>()
    {
        pos.0 = to;
    }
}

fn player_stats(engine: &SimulationEngine) -> PlayerStats {
    engine
        .world()
        .query::<&PlayerStats>()
        .iter()
        .next()
        .map(|(_, s)| *s)
        .unwrap()
}

fn despawn_all<T: hecs::Component>(engine: &mut SimulationEngine) {
    let entities: Vec<Entity> = engine
        .world()
        .query::<&T>()
        .iter()
        .map(|(e, _)| e)
        .collect();
    for e in entities {
        engine.world_mut().despawn(e).unwrap();
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);

    let opening = [
        PlayerCommand::StartGame,
        PlayerCommand::Steer { x: 1.0, y: 0.5 },
        PlayerCommand::Fire { x: 1.0, y: 0.0 },
    ];
    engine_a.queue_commands(opening.clone());
    engine_b.queue_commands(opening);

    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let a = started(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let b = started(SimConfig {
        seed: 222,
        ..Default::default()
    });
    let ships = |engine: &SimulationEngine| {
        let mut positions: Vec<(i32, i32)> = engine
            .world()
            .query::<(&EnemyShip, &Station)>()
            .iter()
            .map(|(_, (_, s))| (s.x as i32, s.y as i32))
            .collect();
        positions.sort();
        positions
    };
    assert_ne!(ships(&a), ships(&b), "Fleets should be placed differently");
}

// ---- Session lifecycle ----

#[test]
fn test_new_game_populates_world() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let menu = engine.tick();
    assert_eq!(menu.phase, GamePhase::MainMenu);
    assert!(menu.colleges.is_empty());

    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.colleges.len(), 4);
    assert_eq!(engine.world().query::<&PowerUp>().iter().count(), 9);
    assert_eq!(snap.hud.health, PLAYER_START_HEALTH);
    assert!(snap.colleges.iter().all(|c| c.fleet_remaining <= 5));
    assert!(!snap.enemy_ships.is_empty());

    let (ax, ay) = CollegeId::Alcuin.position();
    assert!((snap.player.x - ax).abs() < 0.5);
    assert!(snap.player.y < ay);

    // Normal difficulty doubles the base damage colleges take.
    assert!(snap
        .colleges
        .iter()
        .all(|c| c.damage == COLLEGE_BASE_DAMAGE * 2));
}

#[test]
fn test_difficulty_scales_college_damage() {
    let easy = started(SimConfig {
        difficulty: Difficulty::Easy,
        ..Default::default()
    });
    let hard = started(SimConfig {
        difficulty: Difficulty::Hard,
        ..Default::default()
    });
    let damage = |engine: &SimulationEngine| {
        let entity = college_entity(engine, CollegeId::Goodricke);
        engine.world().get::<&College>(entity).unwrap().damage
    };
    assert_eq!(damage(&easy), 15);
    assert_eq!(damage(&hard), 5);
}

#[test]
fn test_pause_freezes_time() {
    let mut engine = started(SimConfig::default());
    engine.tick();
    let before = engine.time();

    engine.queue_command(PlayerCommand::Pause);
    for _ in 0..10 {
        assert_eq!(engine.tick().phase, GamePhase::Paused);
    }
    assert_eq!(engine.time(), before);

    engine.queue_command(PlayerCommand::Resume);
    engine.tick();
    assert_eq!(engine.time().tick, before.tick + 1);
}

#[test]
fn test_start_game_ignored_mid_session() {
    let mut engine = started(SimConfig::default());
    for _ in 0..5 {
        engine.tick();
    }
    let tick = engine.time().tick;
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick();
    assert_eq!(engine.time().tick, tick + 1);
}

// ---- Colleges and game over ----

#[test]
fn test_college_falls_one_tick_after_lethal_hit() {
    let mut engine = started(SimConfig::default());
    set_college_health(&mut engine, CollegeId::Goodricke, 0);

    let snap = engine.tick();
    let goodricke = snap
        .colleges
        .iter()
        .find(|c| c.id == CollegeId::Goodricke)
        .unwrap();
    assert!(!goodricke.destroyed, "destruction lands on the next tick");

    let snap = engine.tick();
    let goodricke = snap
        .colleges
        .iter()
        .find(|c| c.id == CollegeId::Goodricke)
        .unwrap();
    assert!(goodricke.destroyed);
    assert_eq!(snap.hud.points, COLLEGE_DESTROY_POINTS);
    assert!(snap.hud.coins < COLLEGE_DESTROY_MAX_COINS);
    assert!(snap.audio_events.iter().any(|e| matches!(
        e,
        AudioEvent::CollegeDestroyed {
            college: CollegeId::Goodricke,
            ..
        }
    )));

    let walls = engine
        .world()
        .query::<&CollegeWall>()
        .iter()
        .filter(|(_, w)| w.college == CollegeId::Goodricke)
        .count();
    assert_eq!(walls, 0);

    // Reward is paid once.
    let snap = engine.tick();
    assert_eq!(snap.hud.points, COLLEGE_DESTROY_POINTS);
    assert_eq!(snap.phase, GamePhase::Active);
}

#[test]
fn test_losing_alcuin_is_defeat() {
    let mut engine = started(SimConfig::default());
    set_college_health(&mut engine, CollegeId::Alcuin, -5);
    engine.tick();
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Defeat);
    assert_eq!(snap.hud.points, 0, "no reward for the home college");

    // The world is frozen once the game is over.
    let tick = engine.time().tick;
    engine.tick();
    assert_eq!(engine.time().tick, tick);
}

#[test]
fn test_sinking_to_zero_health_is_defeat() {
    let mut engine = started(SimConfig::default());
    engine.hud_mut().health = 0;
    assert_eq!(engine.tick().phase, GamePhase::Defeat);
}

#[test]
fn test_destroying_every_hostile_is_victory() {
    let mut engine = started(SimConfig::default());
    for id in CollegeId::ALL.into_iter().filter(|id| !id.is_ally()) {
        set_college_health(&mut engine, id, 0);
    }
    engine.tick();
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Victory);
    assert_eq!(snap.hud.points, 3 * COLLEGE_DESTROY_POINTS);

    // A finished game can be restarted.
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.hud.points, 0);
    assert!(snap.colleges.iter().all(|c| !c.destroyed));
}

// ---- Combat ----

#[test]
fn test_player_shot_damages_college() {
    let mut engine = started(SimConfig::default());
    despawn_all::<EnemyShip>(&mut engine);
    let (gx, gy) = CollegeId::Goodricke.position();
    move_player(&mut engine, Vec2::new(gx, gy - 3.0));

    engine.queue_command(PlayerCommand::Fire { x: 0.0, y: 1.0 });
    let snap = engine.tick();
    assert!(snap.audio_events.iter().any(|e| matches!(
        e,
        AudioEvent::CannonFired {
            faction: Faction::Player,
            ..
        }
    )));

    let mut hit = false;
    for _ in 0..60 {
        let snap = engine.tick();
        let goodricke = snap
            .colleges
            .iter()
            .find(|c| c.id == CollegeId::Goodricke)
            .unwrap();
        if goodricke.health < COLLEGE_MAX_HEALTH {
            assert_eq!(goodricke.health, COLLEGE_MAX_HEALTH - COLLEGE_BASE_DAMAGE * 2);
            hit = true;
            break;
        }
    }
    assert!(hit, "cannonball should reach the college walls");
}

#[test]
fn test_fire_respects_shooting_delay() {
    let mut engine = started(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::Fire { x: 1.0, y: 0.0 },
        PlayerCommand::Fire { x: 1.0, y: 0.0 },
    ]);
    engine.tick();
    let player_balls = engine
        .world()
        .query::<&Cannonball>()
        .iter()
        .filter(|(_, b)| b.owner == Faction::Player)
        .count();
    assert_eq!(player_balls, 1);
}

#[test]
fn test_hostile_college_shoots_player_in_range() {
    let mut engine = started(SimConfig::default());
    let (cx, cy) = CollegeId::Constantine.position();
    move_player(&mut engine, Vec2::new(cx, cy - 5.0));

    let mut hurt = false;
    for _ in 0..300 {
        engine.tick();
        if engine.hud().health < PLAYER_START_HEALTH {
            hurt = true;
            break;
        }
    }
    assert!(hurt, "Constantine should hit a player parked in range");
}

#[test]
fn test_allies_hold_fire() {
    let mut engine = started(SimConfig::default());
    for _ in 0..180 {
        engine.tick();
    }
    let hostile_balls = engine
        .world()
        .query::<&Cannonball>()
        .iter()
        .filter(|(_, b)| b.owner != Faction::Player)
        .count();
    assert_eq!(hostile_balls, 0);
    assert_eq!(engine.hud().health, PLAYER_START_HEALTH);
}

#[test]
fn test_hostile_ship_sink_rewards() {
    let mut engine = started(SimConfig::default());
    let fleet_ship = |engine: &SimulationEngine, ally: bool| {
        engine
            .world()
            .query::<&EnemyShip>()
            .iter()
            .find(|(_, s)| s.college.is_ally() == ally)
            .map(|(e, _)| e)
            .unwrap()
    };
    let hostile = fleet_ship(&engine, false);
    let ally = fleet_ship(&engine, true);
    engine.world_mut().get::<&mut EnemyShip>(hostile).unwrap().health = 0;
    engine.world_mut().get::<&mut EnemyShip>(ally).unwrap().health = 0;

    engine.tick();
    let snap = engine.tick();
    assert_eq!(snap.hud.points, SHIP_SINK_POINTS);
    assert_eq!(snap.hud.coins, SHIP_SINK_COINS);
    assert_eq!(
        snap.audio_events
            .iter()
            .filter(|e| matches!(e, AudioEvent::ShipSunk { .. }))
            .count(),
        2
    );
    assert!(!engine.world().contains(hostile));
    assert!(!engine.world().contains(ally));
}

#[test]
fn test_cannonball_expires() {
    let mut engine = started(SimConfig::default());
    despawn_all::<EnemyShip>(&mut engine);
    engine.queue_command(PlayerCommand::Fire { x: 0.0, y: -1.0 });
    engine.tick();

    let balls = |engine: &SimulationEngine| engine.world().query::<&Cannonball>().iter().count();
    assert_eq!(balls(&engine), 1);

    let lifetime_ticks = (CANNONBALL_LIFETIME * TICK_RATE as f32) as u32;
    for _ in 0..lifetime_ticks - 10 {
        engine.tick();
    }
    assert_eq!(balls(&engine), 1, "ball still in flight before its lifetime");
    for _ in 0..20 {
        engine.tick();
    }
    assert_eq!(balls(&engine), 0, "ball sinks once its lifetime runs out");
}

#[test]
fn test_player_shot_damages_adjacent_ship() {
    let mut engine = started(SimConfig::default());
    despawn_all::<EnemyShip>(&mut engine);
    let (_, player_pos) = crate::systems::find_player(engine.world()).unwrap();
    let ship = world_setup::spawn_enemy_ship(
        engine.world_mut(),
        world_setup::new_enemy_ship(CollegeId::Goodricke),
        player_pos.0 + Vec2::new(1.5, 0.0),
    );

    engine.queue_command(PlayerCommand::Fire { x: 1.0, y: 0.0 });
    let mut hit = false;
    for _ in 0..30 {
        let snap = engine.tick();
        let health = engine.world().get::<&EnemyShip>(ship).unwrap().health;
        if health < SHIP_MAX_HEALTH {
            assert_eq!(health, SHIP_MAX_HEALTH - SHIP_BASE_DAMAGE);
            assert!(snap
                .audio_events
                .iter()
                .any(|e| matches!(e, AudioEvent::Explosion { .. })));
            hit = true;
            break;
        }
    }
    assert!(hit, "cannonball should strike the ship alongside");
    let player_balls = engine
        .world()
        .query::<&Cannonball>()
        .iter()
        .filter(|(_, b)| b.owner == Faction::Player && !b.destroyed)
        .count();
    assert_eq!(player_balls, 0, "the ball is spent on impact");
}

#[test]
fn test_steering_moves_player() {
    let mut engine = started(SimConfig::default());
    let start = engine.tick().player;
    engine.queue_command(PlayerCommand::Steer { x: 1.0, y: 0.0 });
    let mut snap = engine.tick();
    for _ in 0..120 {
        snap = engine.tick();
    }
    assert!(snap.player.x > start.x);
    assert!(snap.player.speed <= snap.player.max_speed + 1e-4);
    assert!(snap.player.heading.abs() < 1e-3);
}

// ---- Power-ups ----

#[test]
fn test_speed_boost_pickup_and_expiry() {
    let mut engine = started(SimConfig::default());
    despawn_all::<PowerUp>(&mut engine);
    let player_pos = engine
        .world()
        .query::<(&PlayerStats, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, p))| p.0)
        .unwrap();
    let boost =
        world_setup::spawn_power_up(engine.world_mut(), PowerUp::new(PowerUpKind::SpeedBoost), player_pos);

    let snap = engine.tick();
    assert!(snap.audio_events.iter().any(|e| matches!(
        e,
        AudioEvent::PowerUpCollected {
            kind: PowerUpKind::SpeedBoost,
            ..
        }
    )));
    assert!(player_stats(&engine).max_speed > PLAYER_BASE_MAX_SPEED);
    assert_eq!(
        snap.hud.power_up_timers.get(&PowerUpKind::SpeedBoost),
        Some(&SPEED_BOOST_DURATION)
    );

    let snap = engine.tick();
    assert!(snap.power_ups.is_empty(), "collected power-up leaves the map");
    assert!(engine.world().contains(boost), "effect still running");

    let mut ended = false;
    for _ in 0..(SPEED_BOOST_DURATION as usize * TICK_RATE as usize + 10) {
        let snap = engine.tick();
        if snap.audio_events.iter().any(|e| matches!(e, AudioEvent::PowerUpEnded { .. })) {
            assert!(!snap.hud.power_up_timers.contains_key(&PowerUpKind::SpeedBoost));
            ended = true;
            break;
        }
    }
    assert!(ended, "speed boost should wear off");
    assert_eq!(player_stats(&engine).max_speed, PLAYER_BASE_MAX_SPEED);
    assert_eq!(player_stats(&engine).acceleration, PLAYER_BASE_ACCELERATION);
    assert!(!engine.world().contains(boost));
}

#[test]
fn test_heart_heals_player() {
    let mut engine = started(SimConfig::default());
    despawn_all::<PowerUp>(&mut engine);
    engine.hud_mut().change_health(-30);
    let player_pos = engine
        .world()
        .query::<(&PlayerStats, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, p))| p.0)
        .unwrap();
    world_setup::spawn_power_up(
        engine.world_mut(),
        PowerUp::new(PowerUpKind::AbsorptionHeart),
        player_pos,
    );
    let snap = engine.tick();
    assert_eq!(snap.hud.health, PLAYER_START_HEALTH - 30 + ABSORPTION_HEART_HEAL);
}

// ---- Gold shop ----

#[test]
fn test_shop_purchase_flow() {
    let mut engine = started(SimConfig {
        starting_coins: 100,
        ..Default::default()
    });

    engine.queue_command(PlayerCommand::OpenShop);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Shop);
    let shop = snap.shop.unwrap();
    assert_eq!(shop.title, "Gold Shop");
    assert_eq!(shop.buttons.len(), 4);
    let frozen = engine.time();

    engine.queue_command(PlayerCommand::Purchase {
        item: ShopItem::HealthBoost,
    });
    let snap = engine.tick();
    assert_eq!(snap.hud.coins, 100 - HEALTH_BOOST_PRICE);
    assert_eq!(snap.hud.health, PLAYER_START_HEALTH + HEALTH_BOOST_VALUE);
    assert_eq!(snap.alerts.len(), 1);
    assert_eq!(snap.alerts[0].level, AlertLevel::Info);
    assert_eq!(snap.alerts[0].title, "Success");
    assert!(snap
        .audio_events
        .iter()
        .any(|e| matches!(e, AudioEvent::Purchase { .. })));

    engine.queue_command(PlayerCommand::Purchase {
        item: ShopItem::HealthBoost,
    });
    let snap = engine.tick();
    assert_eq!(snap.alerts[0].level, AlertLevel::Error);
    assert_eq!(
        snap.alerts[0].message,
        "You do not have enough coins to purchase this boost!"
    );
    assert_eq!(snap.hud.coins, 100 - HEALTH_BOOST_PRICE);
    assert_eq!(engine.time(), frozen, "world is frozen while shopping");

    engine.queue_command(PlayerCommand::CloseShop);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.shop.is_none());
    assert!(snap.alerts.is_empty());
}

#[test]
fn test_purchase_outside_shop_is_ignored() {
    let mut engine = started(SimConfig {
        starting_coins: 500,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::Purchase {
        item: ShopItem::FasterCannon,
    });
    let snap = engine.tick();
    assert!(snap.alerts.is_empty());
    assert_eq!(snap.hud.coins, 500);
    assert_eq!(player_stats(&engine).cannon_velocity, PLAYER_BASE_CANNON_VELOCITY);
}

#[test]
fn test_muted_effects_emit_silent_cues_only() {
    let mut engine = started(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::SetEffects {
            enabled: false,
            volume: 0.9,
        },
        PlayerCommand::Fire { x: 0.0, y: 1.0 },
    ]);
    let snap = engine.tick();
    assert!(snap.audio_events.is_empty());
    assert_eq!(engine.config().preferences.effects(), None);
}

#[test]
fn test_set_effects_volume_is_sanitized() {
    let mut engine = started(SimConfig::default());
    engine.queue_command(PlayerCommand::SetEffects {
        enabled: true,
        volume: f32::NAN,
    });
    engine.tick();
    assert_eq!(engine.config().preferences.effects(), Some(0.0));

    engine.queue_commands([
        PlayerCommand::SetEffects {
            enabled: true,
            volume: 2.5,
        },
        PlayerCommand::Fire { x: 0.0, y: -1.0 },
    ]);
    let snap = engine.tick();
    assert_eq!(engine.config().preferences.effects(), Some(1.0));
    assert!(snap.audio_events.contains(&AudioEvent::CannonFired {
        faction: Faction::Player,
        volume: 1.0,
    }));
}

// ---- Saves ----

#[test]
fn test_save_and_restore_session() {
    let mut engine = started(SimConfig {
        seed: 9,
        starting_coins: 40,
        ..Default::default()
    });
    set_college_health(&mut engine, CollegeId::AnneLister, 0);
    engine.queue_command(PlayerCommand::Steer { x: 0.0, y: -1.0 });
    for _ in 0..30 {
        engine.tick();
    }

    let data = engine.save_data("quick");
    assert_eq!(data.slot_name, "quick");
    assert_eq!(data.seed, 9);
    assert_eq!(data.colleges.len(), 4);
    assert!(data.timestamp > 0);

    let mut restored = SimulationEngine::from_save(SimConfig::default(), &data).unwrap();
    assert_eq!(restored.phase(), GamePhase::Paused);
    assert_eq!(restored.time(), engine.time());
    assert_eq!(restored.hud(), engine.hud());
    assert_eq!(restored.config().seed, 9);

    let again = restored.save_data("quick");
    assert_eq!(again.player, data.player);
    assert_eq!(again.colleges.len(), data.colleges.len());
    for (a, b) in again.colleges.iter().zip(&data.colleges) {
        assert_eq!(a.college, b.college);
        assert_eq!(a.fleet.len(), b.fleet.len());
    }
    assert_eq!(again.power_ups.len(), data.power_ups.len());

    let snap = restored.tick();
    let anne = snap
        .colleges
        .iter()
        .find(|c| c.id == CollegeId::AnneLister)
        .unwrap();
    assert!(anne.destroyed);

    restored.queue_command(PlayerCommand::Resume);
    assert_eq!(restored.tick().phase, GamePhase::Active);
}

#[test]
fn test_restore_rejects_unknown_version() {
    let engine = started(SimConfig::default());
    let mut data = engine.save_data("bad");
    data.version = SAVE_VERSION + 7;
    let result = SimulationEngine::from_save(SimConfig::default(), &data);
    assert!(matches!(
        result,
        Err(SaveError::UnsupportedVersion { .. })
    ));
}

#[test]
fn test_restored_player_keeps_velocity() {
    let mut engine = started(SimConfig::default());
    engine.queue_command(PlayerCommand::Steer { x: 1.0, y: 1.0 });
    for _ in 0..20 {
        engine.tick();
    }
    let data = engine.save_data("moving");
    let restored = SimulationEngine::from_save(SimConfig::default(), &data).unwrap();
    let vel = restored
        .world()
        .query::<(&PlayerStats, &Velocity)>()
        .iter()
        .next()
        .map(|(_, (_, v))| v.0)
        .unwrap();
    assert_eq!(vel, data.player.velocity);
    assert!(vel.length() > 0.0);
}
