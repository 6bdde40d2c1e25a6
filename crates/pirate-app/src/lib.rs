//! Headless host for the pirate game.
//!
//! Runs the simulation on its own thread, forwards commands to it and
//! keeps the latest snapshot for polling.

pub mod game_loop;
pub mod state;
pub mod summary;

pub use pirate_core as core;
