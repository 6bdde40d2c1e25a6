//! Save slots on disk.
//!
//! A save captures the HUD, the player, every college with its surviving
//! fleet, and the power-ups. Cannonballs in flight are not saved.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use hecs::World;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pirate_core::components::*;
use pirate_core::constants::SAVE_VERSION;
use pirate_core::enums::{CollegeId, Difficulty};
use pirate_core::types::{Position, Sensor, SimTime, Velocity};

use crate::hud::Hud;
use crate::world_setup;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save data is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Full save data written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub slot_name: String,
    pub timestamp: u64,
    pub seed: u64,
    pub difficulty: Difficulty,
    pub time: SimTime,
    pub hud: Hud,
    pub player: PlayerSave,
    pub colleges: Vec<CollegeSave>,
    pub power_ups: Vec<PowerUpSave>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSave {
    pub position: Vec2,
    pub velocity: Vec2,
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeSave {
    pub college: College,
    pub fleet: Vec<ShipSave>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipSave {
    pub ship: EnemyShip,
    pub station: Station,
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpSave {
    pub power_up: PowerUp,
    pub position: Vec2,
}

/// Lightweight metadata for listing saves without loading full state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot_name: String,
    pub timestamp: u64,
    pub points: i32,
    pub coins: i32,
    pub colleges_destroyed: usize,
}

impl SaveData {
    pub fn metadata(&self) -> SaveMetadata {
        SaveMetadata {
            slot_name: self.slot_name.clone(),
            timestamp: self.timestamp,
            points: self.hud.points,
            coins: self.hud.coins,
            colleges_destroyed: self
                .colleges
                .iter()
                .filter(|c| c.college.destroyed)
                .count(),
        }
    }
}

/// Player, colleges with their live fleets, and power-ups, in that order.
pub(crate) fn capture(world: &World) -> (PlayerSave, Vec<CollegeSave>, Vec<PowerUpSave>) {
    let player = world
        .query::<(&PlayerStats, &Position, &Velocity)>()
        .iter()
        .next()
        .map(|(_, (stats, pos, vel))| PlayerSave {
            position: pos.0,
            velocity: vel.0,
            stats: *stats,
        })
        .unwrap_or_else(|| PlayerSave {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            stats: PlayerStats::default(),
        });

    let mut colleges: Vec<CollegeSave> = world
        .query::<&College>()
        .iter()
        .map(|(_, college)| CollegeSave {
            college: college.clone(),
            fleet: Vec::new(),
        })
        .collect();
    colleges.sort_by_key(|c| c.college.id);

    for (_, (ship, station, pos)) in world.query::<(&EnemyShip, &Station, &Position)>().iter() {
        if ship.destroyed {
            continue;
        }
        if let Some(entry) = colleges.iter_mut().find(|c| c.college.id == ship.college) {
            entry.fleet.push(ShipSave {
                ship: ship.clone(),
                station: *station,
                position: pos.0,
            });
        }
    }

    let power_ups = world
        .query::<(&PowerUp, &Position)>()
        .iter()
        .map(|(_, (power_up, pos))| PowerUpSave {
            power_up: *power_up,
            position: pos.0,
        })
        .collect();

    (player, colleges, power_ups)
}

/// Rebuild a world from a save. The world is cleared first.
pub(crate) fn restore(world: &mut World, data: &SaveData) {
    world.clear();

    let player = world_setup::spawn_player(world, data.player.position, data.player.stats);
    if let Ok(mut vel) = world.get::<&mut Velocity>(player) {
        vel.0 = data.player.velocity;
    }

    for entry in &data.colleges {
        world_setup::spawn_college(world, entry.college.clone());
        for saved in &entry.fleet {
            let ship = world_setup::spawn_enemy_ship(world, saved.ship.clone(), saved.position);
            if let Ok(mut station) = world.get::<&mut Station>(ship) {
                *station = saved.station;
            }
        }
    }

    for saved in &data.power_ups {
        let entity = world_setup::spawn_power_up(world, saved.power_up, saved.position);
        if saved.power_up.destroyed || saved.power_up.set_to_destroy {
            let _ = world.remove_one::<Sensor>(entity);
        }
    }

    let missing: Vec<CollegeId> = CollegeId::ALL
        .into_iter()
        .filter(|id| !data.colleges.iter().any(|c| c.college.id == *id))
        .collect();
    if !missing.is_empty() {
        log::warn!("save {} has no entry for {:?}", data.slot_name, missing);
    }
}

fn save_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{}.json", slot))
}

pub fn save_to_file(dir: &Path, slot: &str, data: &SaveData) -> Result<(), SaveError> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(data)?;
    fs::write(save_path(dir, slot), json)?;
    log::info!("saved slot {}", slot);
    Ok(())
}

pub fn load_from_file(dir: &Path, slot: &str) -> Result<SaveData, SaveError> {
    let json = fs::read_to_string(save_path(dir, slot))?;
    let data: SaveData = serde_json::from_str(&json)?;
    if data.version != SAVE_VERSION {
        return Err(SaveError::UnsupportedVersion {
            found: data.version,
            expected: SAVE_VERSION,
        });
    }
    Ok(data)
}

/// Every loadable save in `dir`, newest first. Unreadable files and saves
/// from other versions are skipped.
pub fn list_saves(dir: &Path) -> Vec<SaveMetadata> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut saves = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        match fs::read_to_string(&path)
            .map_err(SaveError::from)
            .and_then(|json| serde_json::from_str::<SaveData>(&json).map_err(SaveError::from))
        {
            Ok(data) if data.version == SAVE_VERSION => saves.push(data.metadata()),
            Ok(data) => log::warn!(
                "skipping {}: save version {} (expected {})",
                path.display(),
                data.version,
                SAVE_VERSION
            ),
            Err(e) => log::warn!("skipping {}: {}", path.display(), e),
        }
    }
    saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    saves
}

pub fn delete_save(dir: &Path, slot: &str) -> Result<(), SaveError> {
    let path = save_path(dir, slot);
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup::new_college;

    fn make_save_data(slot: &str, timestamp: u64) -> SaveData {
        let mut hud = Hud::default();
        hud.change_points(120);
        hud.set_coins(35);
        let mut fallen = new_college(CollegeId::Constantine, 10);
        fallen.destroyed = true;
        SaveData {
            version: SAVE_VERSION,
            slot_name: slot.to_string(),
            timestamp,
            seed: 42,
            difficulty: Difficulty::Normal,
            time: SimTime::default(),
            hud,
            player: PlayerSave {
                position: Vec2::new(19.0, 17.0),
                velocity: Vec2::ZERO,
                stats: PlayerStats::default(),
            },
            colleges: vec![
                CollegeSave {
                    college: new_college(CollegeId::Alcuin, 10),
                    fleet: Vec::new(),
                },
                CollegeSave {
                    college: fallen,
                    fleet: Vec::new(),
                },
            ],
            power_ups: Vec::new(),
        }
    }

    #[test]
    fn save_and_load_file() {
        let dir = std::env::temp_dir().join("pirate_test_save_load");
        let _ = fs::remove_dir_all(&dir);

        let data = make_save_data("slot1", 10);
        save_to_file(&dir, "slot1", &data).unwrap();
        let loaded = load_from_file(&dir, "slot1").unwrap();
        assert_eq!(loaded, data);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_rejects_other_versions() {
        let dir = std::env::temp_dir().join("pirate_test_save_version");
        let _ = fs::remove_dir_all(&dir);

        let mut data = make_save_data("old", 10);
        data.version = SAVE_VERSION + 1;
        save_to_file(&dir, "old", &data).unwrap();
        let err = load_from_file(&dir, "old").unwrap_err();
        assert!(matches!(err, SaveError::UnsupportedVersion { .. }));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_slot_is_io_error() {
        let dir = std::env::temp_dir().join("pirate_test_save_missing");
        let err = load_from_file(&dir, "nope").unwrap_err();
        assert!(matches!(err, SaveError::Io(_)));
    }

    #[test]
    fn list_saves_sorted_newest_first() {
        let dir = std::env::temp_dir().join("pirate_test_list_multi");
        let _ = fs::remove_dir_all(&dir);

        save_to_file(&dir, "early", &make_save_data("early", 1000)).unwrap();
        save_to_file(&dir, "late", &make_save_data("late", 2000)).unwrap();
        fs::write(dir.join("junk.json"), "not json").unwrap();

        let saves = list_saves(&dir);
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].slot_name, "late");
        assert_eq!(saves[1].slot_name, "early");
        assert_eq!(saves[0].points, 120);
        assert_eq!(saves[0].colleges_destroyed, 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn list_saves_skips_other_versions() {
        let dir = std::env::temp_dir().join("pirate_test_list_versions");
        let _ = fs::remove_dir_all(&dir);

        save_to_file(&dir, "current", &make_save_data("current", 1)).unwrap();
        let mut old = make_save_data("old", 2);
        old.version = SAVE_VERSION + 1;
        save_to_file(&dir, "old", &old).unwrap();

        let saves = list_saves(&dir);
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].slot_name, "current");
        for save in &saves {
            assert!(load_from_file(&dir, &save.slot_name).is_ok());
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn list_saves_missing_dir_is_empty() {
        let dir = std::env::temp_dir().join("pirate_test_list_none");
        let _ = fs::remove_dir_all(&dir);
        assert!(list_saves(&dir).is_empty());
    }

    #[test]
    fn delete_save_removes_file() {
        let dir = std::env::temp_dir().join("pirate_test_delete");
        let _ = fs::remove_dir_all(&dir);

        save_to_file(&dir, "gone", &make_save_data("gone", 1)).unwrap();
        assert!(save_path(&dir, "gone").exists());
        delete_save(&dir, "gone").unwrap();
        assert!(!save_path(&dir, "gone").exists());
        delete_save(&dir, "gone").unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn restore_skips_sensors_on_fallen_colleges() {
        let data = make_save_data("restore", 0);
        let mut world = World::new();
        restore(&mut world, &data);

        let mut with_sensor = Vec::new();
        for (_, (college, sensor)) in world.query::<(&College, Option<&Sensor>)>().iter() {
            with_sensor.push((college.id, sensor.is_some()));
        }
        with_sensor.sort();
        assert_eq!(
            with_sensor,
            vec![(CollegeId::Alcuin, true), (CollegeId::Constantine, false)]
        );
        // Only the standing college gets walls.
        assert_eq!(world.query::<&CollegeWall>().iter().count(), 4);
    }
}
