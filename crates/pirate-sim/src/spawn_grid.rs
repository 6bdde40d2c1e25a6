//! Spawn validity grid.
//!
//! Tiles outside the playable bounds or covered by land are invalid
//! spawn points for ships and power-ups.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use pirate_core::constants::*;
use pirate_core::enums::CollegeId;

#[derive(Debug, Clone)]
pub struct SpawnGrid {
    pub x_base: i32,
    pub x_cap: i32,
    pub y_base: i32,
    pub y_cap: i32,
    /// Blocked rows keyed by column.
    pub tile_blocked: HashMap<i32, HashSet<i32>>,
}

impl Default for SpawnGrid {
    fn default() -> Self {
        Self {
            x_base: SPAWN_X_BASE,
            x_cap: SPAWN_X_CAP,
            y_base: SPAWN_Y_BASE,
            y_cap: SPAWN_Y_CAP,
            tile_blocked: HashMap::new(),
        }
    }
}

impl SpawnGrid {
    /// Default bounds with the land around every college blocked.
    pub fn with_college_footprints() -> Self {
        let mut grid = Self::default();
        for college in CollegeId::ALL {
            let (x, y) = college.position();
            grid.block_area(x.floor() as i32, y.floor() as i32, COLLEGE_FOOTPRINT_RADIUS);
        }
        grid
    }

    pub fn block(&mut self, x: i32, y: i32) {
        self.tile_blocked.entry(x).or_default().insert(y);
    }

    /// Block a square of tiles centred on (x, y).
    pub fn block_area(&mut self, x: i32, y: i32, radius: i32) {
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                self.block(x + dx, y + dy);
            }
        }
    }

    /// Whether a ship may spawn on tile (x, y).
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        if x < self.x_base || x >= self.x_cap || y < self.y_base || y >= self.y_cap {
            return false;
        }
        match self.tile_blocked.get(&x) {
            Some(rows) => !rows.contains(&y),
            None => true,
        }
    }

    /// Sample a valid tile near `origin`.
    ///
    /// Offsets are drawn in pixels from `-half_extent_px..half_extent_px`
    /// and converted to world units. Returns `None` after `max_attempts`
    /// rejected samples.
    pub fn random_tile(
        &self,
        rng: &mut ChaCha8Rng,
        origin: (f32, f32),
        half_extent_px: i32,
        max_attempts: u32,
    ) -> Option<(i32, i32)> {
        for _ in 0..max_attempts {
            let off_x = rng.gen_range(0..half_extent_px * 2) - half_extent_px;
            let off_y = rng.gen_range(0..half_extent_px * 2) - half_extent_px;
            let x = (origin.0 + off_x as f32 / PPM).floor() as i32;
            let y = (origin.1 + off_y as f32 / PPM).floor() as i32;
            if self.is_valid(x, y) {
                return Some((x, y));
            }
        }
        None
    }

    /// Sample any valid tile within the grid bounds.
    pub fn random_open_tile(&self, rng: &mut ChaCha8Rng, max_attempts: u32) -> Option<(i32, i32)> {
        for _ in 0..max_attempts {
            let x = rng.gen_range(self.x_base..self.x_cap);
            let y = rng.gen_range(self.y_base..self.y_cap);
            if self.is_valid(x, y) {
                return Some((x, y));
            }
        }
        None
    }
}
