//! Simulation engine for the pirate game.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the host.

pub mod engine;
pub mod hud;
pub mod persistence;
pub mod shop;
pub mod spawn_grid;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use pirate_core as core;

#[cfg(test)]
mod tests;
