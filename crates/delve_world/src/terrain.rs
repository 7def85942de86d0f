//! # Terrain Baseline
//!
//! The baseline is the tile a cell holds when nothing has ever touched it.
//! It is a pure function of `(x, y)`: no seed, no state, no allocation.
//!
//! ```text
//!   y < G            sky (no tile)
//!   y == G           grass
//!   G < y <= G + D   dirt/stone band, stone more likely with depth
//!   y > G + D        stone
//! ```
//!
//! `G` is the ground level and `D` the band depth. Inside the band a cell is
//! stone when its [`cell_noise`] value falls under a threshold that rises
//! linearly from 0 on the first band row to 1 on the last, so the top row is
//! always dirt and the bottom row always stone.

use crate::config::WorldConfig;
use crate::noise::cell_noise;
use crate::tile::{Tile, TileKind};

/// Default row of the grass surface.
pub const DEFAULT_GROUND_LEVEL: i32 = 10;

/// Default number of rows in the dirt/stone band.
pub const DEFAULT_DIRT_BAND_DEPTH: i32 = 6;

/// Deterministic baseline terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainGenerator {
    ground_level: i32,
    dirt_band_depth: i32,
}

impl TerrainGenerator {
    /// Creates a generator. `dirt_band_depth` below 2 is raised to 2 so the
    /// threshold ramp is always defined.
    #[must_use]
    pub const fn new(ground_level: i32, dirt_band_depth: i32) -> Self {
        Self {
            ground_level,
            dirt_band_depth: if dirt_band_depth < 2 { 2 } else { dirt_band_depth },
        }
    }

    /// Creates a generator from the world section of the config.
    #[must_use]
    pub const fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.ground_level, config.dirt_band_depth)
    }

    /// Row of the grass surface.
    #[inline]
    #[must_use]
    pub const fn ground_level(&self) -> i32 {
        self.ground_level
    }

    /// Number of rows in the dirt/stone band.
    #[inline]
    #[must_use]
    pub const fn dirt_band_depth(&self) -> i32 {
        self.dirt_band_depth
    }

    /// Stone probability for a band row.
    #[inline]
    #[must_use]
    pub fn stone_threshold(&self, y: i32) -> f64 {
        let first = f64::from(self.ground_level) + 1.0;
        (f64::from(y) - first) / f64::from(self.dirt_band_depth - 1)
    }

    /// Baseline tile at `(x, y)`.
    #[must_use]
    pub fn default_tile(&self, x: i32, y: i32) -> Option<Tile> {
        let ground = self.ground_level;
        if y < ground {
            None
        } else if y == ground {
            Some(Tile::new(TileKind::Grass))
        } else if i64::from(y) - i64::from(ground) <= i64::from(self.dirt_band_depth) {
            let kind = if cell_noise(x, y) < self.stone_threshold(y) {
                TileKind::Stone
            } else {
                TileKind::Dirt
            };
            Some(Tile::new(kind))
        } else {
            Some(Tile::new(TileKind::Stone))
        }
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_GROUND_LEVEL, DEFAULT_DIRT_BAND_DEPTH)
    }
}
