//! # World Configuration
//!
//! Terrain shape and generation pass parameters. Every section has defaults
//! matching the stock world, so an empty config file is a valid config.
//!
//! Vertical bounds of the generation passes are given as row offsets below
//! the ground level, so moving the surface moves the caves with it.

use std::ops::{Range, RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::coord::DEFAULT_TILE_SIZE;
use crate::error::{WorldError, WorldResult};
use crate::terrain::{DEFAULT_DIRT_BAND_DEPTH, DEFAULT_GROUND_LEVEL};

/// Terrain shape and generation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Row of the grass surface.
    pub ground_level: i32,
    /// Rows in the dirt/stone transition band. At least 2.
    pub dirt_band_depth: i32,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// One-shot generation passes.
    pub generation: GenerationConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            ground_level: DEFAULT_GROUND_LEVEL,
            dirt_band_depth: DEFAULT_DIRT_BAND_DEPTH,
            tile_size: DEFAULT_TILE_SIZE,
            generation: GenerationConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Checks every value for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> WorldResult<()> {
        if self.tile_size == 0 {
            return Err(invalid("world.tile_size must be positive"));
        }
        if self.dirt_band_depth < 2 {
            return Err(invalid("world.dirt_band_depth must be at least 2"));
        }
        if self.ground_level.checked_add(self.dirt_band_depth).is_none() {
            return Err(invalid("world.ground_level is too large"));
        }
        self.generation.validate()
    }
}

/// Parameters of the one-shot generation passes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Seed for the generation RNG. A fresh seed is drawn when absent.
    pub seed: Option<u64>,
    /// Shallow dirt caves.
    pub dirt_caves: CaveLayerConfig,
    /// Deep stone caves.
    pub stone_caves: CaveLayerConfig,
    /// Surface water flooding.
    pub flood: FloodConfig,
    /// Tree scattering.
    pub trees: TreeConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            dirt_caves: CaveLayerConfig::dirt(),
            stone_caves: CaveLayerConfig::stone(),
            flood: FloodConfig::default(),
            trees: TreeConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Checks every pass section.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> WorldResult<()> {
        self.dirt_caves.validate("dirt_caves")?;
        self.stone_caves.validate("stone_caves")?;
        self.flood.validate()?;
        self.trees.validate()
    }
}

/// One cave layer. Both x and y bounds are inclusive.
///
/// The two layers have different stock values, so a layer section that is
/// present in a config file must list every field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaveLayerConfig {
    /// Whether the pass runs.
    pub enabled: bool,
    /// Leftmost blob center column.
    pub x_min: i32,
    /// Rightmost blob center column.
    pub x_max: i32,
    /// Shallowest blob center row, as an offset below ground.
    pub top: i32,
    /// Deepest blob center row, as an offset below ground.
    pub bottom: i32,
}

impl CaveLayerConfig {
    /// Stock dirt layer: centers 5..=10 rows below ground.
    #[must_use]
    pub const fn dirt() -> Self {
        Self {
            enabled: true,
            x_min: -300,
            x_max: 300,
            top: 5,
            bottom: 10,
        }
    }

    /// Stock stone layer: centers 15..=24 rows below ground.
    #[must_use]
    pub const fn stone() -> Self {
        Self {
            enabled: true,
            x_min: -300,
            x_max: 300,
            top: 15,
            bottom: 24,
        }
    }

    /// Center column range.
    #[must_use]
    pub const fn x_range(&self) -> RangeInclusive<i32> {
        self.x_min..=self.x_max
    }

    /// Center row range for a given ground level.
    #[must_use]
    pub fn y_range(&self, ground_level: i32) -> RangeInclusive<i32> {
        ground_level.saturating_add(self.top)..=ground_level.saturating_add(self.bottom)
    }

    fn validate(&self, section: &str) -> WorldResult<()> {
        if self.x_min > self.x_max {
            return Err(invalid(format!("generation.{section}: x_min > x_max")));
        }
        if self.top > self.bottom {
            return Err(invalid(format!("generation.{section}: top > bottom")));
        }
        Ok(())
    }
}

/// Surface flooding. The x range is half-open, rows are inclusive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloodConfig {
    /// Whether the pass runs.
    pub enabled: bool,
    /// First scanned column.
    pub x_min: i32,
    /// One past the last scanned column.
    pub x_max: i32,
    /// Scanned row, as an offset below ground.
    pub top: i32,
    /// Deepest filled row, as an offset below ground.
    pub bottom: i32,
    /// Narrowest gap that gets filled.
    pub min_width: u32,
}

impl Default for FloodConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            x_min: -300,
            x_max: 300,
            top: 1,
            bottom: 4,
            min_width: crate::flood::DEFAULT_MIN_GAP_WIDTH,
        }
    }
}

impl FloodConfig {
    /// Scanned columns.
    #[must_use]
    pub const fn x_range(&self) -> Range<i32> {
        self.x_min..self.x_max
    }

    fn validate(&self) -> WorldResult<()> {
        if self.x_min > self.x_max {
            return Err(invalid("generation.flood: x_min > x_max"));
        }
        if self.top > self.bottom {
            return Err(invalid("generation.flood: top > bottom"));
        }
        if self.min_width == 0 {
            return Err(invalid("generation.flood: min_width must be positive"));
        }
        Ok(())
    }
}

/// Tree scattering. The x range is half-open.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Whether the pass runs.
    pub enabled: bool,
    /// First candidate column.
    pub x_min: i32,
    /// One past the last candidate column.
    pub x_max: i32,
    /// Per-column planting probability.
    pub chance: f64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            x_min: -50,
            x_max: 150,
            chance: crate::trees::DEFAULT_TREE_CHANCE,
        }
    }
}

impl TreeConfig {
    /// Candidate columns.
    #[must_use]
    pub const fn x_range(&self) -> Range<i32> {
        self.x_min..self.x_max
    }

    fn validate(&self) -> WorldResult<()> {
        if self.x_min > self.x_max {
            return Err(invalid("generation.trees: x_min > x_max"));
        }
        if !(0.0..=1.0).contains(&self.chance) {
            return Err(invalid("generation.trees: chance must be within [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> WorldError {
    WorldError::InvalidConfig(message.into())
}
