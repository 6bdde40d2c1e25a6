//! End-of-session report printed by the binary.

use serde::Serialize;

use pirate_core::enums::GamePhase;
use pirate_core::state::GameStateSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub phase: GamePhase,
    pub points: i32,
    pub coins: i32,
    pub health: i32,
    pub colleges_destroyed: Vec<String>,
    pub ships_afloat: usize,
}

impl SessionSummary {
    pub fn from_snapshot(seed: u64, snapshot: &GameStateSnapshot) -> Self {
        Self {
            seed,
            ticks: snapshot.time.tick,
            elapsed_secs: snapshot.time.elapsed_secs,
            phase: snapshot.phase,
            points: snapshot.hud.points,
            coins: snapshot.hud.coins,
            health: snapshot.hud.health,
            colleges_destroyed: snapshot
                .colleges
                .iter()
                .filter(|c| c.destroyed)
                .map(|c| c.name.clone())
                .collect(),
            ships_afloat: snapshot.enemy_ships.len(),
        }
    }
}
