//! # World
//!
//! The world is the terrain baseline plus a sparse diff.
//!
//! ## Override Store
//!
//! ```text
//!   key:   TileCoord packed into u64
//!   value: Some(tile)  placed or changed tile
//!          None        carved air where the baseline has a tile
//! ```
//!
//! An entry exists **iff** the cell differs from the baseline. Every write
//! goes through [`World::set_tile`], which drops the entry again when the
//! written value collapses onto the baseline. Memory therefore scales with
//! the number of edits, not with the area explored.

use std::collections::HashMap;

use crate::config::WorldConfig;
use crate::coord::{TileCoord, Viewport, DEFAULT_TILE_SIZE};
use crate::terrain::TerrainGenerator;
use crate::tile::{Tile, TileKind};

/// A tile to draw, with its world pixel position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawTile {
    /// Grid position.
    pub coord: TileCoord,
    /// Left edge in world pixels.
    pub px: f32,
    /// Top edge in world pixels.
    pub py: f32,
    /// Tile content.
    pub tile: Tile,
}

/// Conceptually infinite tile grid.
#[derive(Clone, Debug)]
pub struct World {
    terrain: TerrainGenerator,
    tile_size: u32,
    overrides: HashMap<u64, Option<Tile>>,
}

impl World {
    /// Creates an untouched world over the given baseline.
    #[must_use]
    pub fn new(terrain: TerrainGenerator, tile_size: u32) -> Self {
        Self {
            terrain,
            tile_size: tile_size.max(1),
            overrides: HashMap::new(),
        }
    }

    /// Creates an untouched world from config. Generation passes are run
    /// separately.
    #[must_use]
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(TerrainGenerator::from_config(config), config.tile_size)
    }

    /// Baseline generator.
    #[inline]
    #[must_use]
    pub const fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    /// Row of the grass surface.
    #[inline]
    #[must_use]
    pub const fn ground_level(&self) -> i32 {
        self.terrain.ground_level()
    }

    /// Tile edge length in pixels.
    #[inline]
    #[must_use]
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Current content of `(x, y)`.
    #[inline]
    #[must_use]
    pub fn get_tile(&self, x: i32, y: i32) -> Option<Tile> {
        match self.overrides.get(&TileCoord::new(x, y).pack()) {
            Some(entry) => *entry,
            None => self.terrain.default_tile(x, y),
        }
    }

    /// Writes `(x, y)`. Accepts a [`Tile`], a [`TileKind`], or an
    /// `Option<Tile>` where `None` carves the cell out.
    ///
    /// Returns whether the visible state changed. A water level change
    /// counts as a change.
    pub fn set_tile(&mut self, x: i32, y: i32, value: impl Into<Option<Tile>>) -> bool {
        let value = value.into();
        let previous = self.get_tile(x, y);
        let key = TileCoord::new(x, y).pack();

        if same_kind(value, self.terrain.default_tile(x, y)) {
            self.overrides.remove(&key);
        } else {
            self.overrides.insert(key, value);
        }

        !identical(previous, value)
    }

    /// Carves `(x, y)` out to air, whatever it holds.
    pub fn carve(&mut self, x: i32, y: i32) -> bool {
        self.set_tile(x, y, Option::<Tile>::None)
    }

    /// Places a tile of `kind` at `(x, y)`. Water is placed as a source.
    pub fn add_tile(&mut self, x: i32, y: i32, kind: TileKind) -> bool {
        self.set_tile(x, y, kind)
    }

    /// Digs out `(x, y)` if it holds something diggable.
    ///
    /// Returns the removed tile. Water and empty cells are left alone and
    /// yield `None`.
    pub fn remove_tile(&mut self, x: i32, y: i32) -> Option<Tile> {
        let current = self.get_tile(x, y).filter(|tile| tile.can_interact())?;
        self.carve(x, y);
        Some(current)
    }

    /// Every non-empty tile intersecting `viewport`, column by column.
    #[must_use]
    pub fn draw_region(&self, viewport: &Viewport) -> Vec<DrawTile> {
        let (xs, ys) = viewport.tile_span(self.tile_size);
        let mut out = Vec::with_capacity(xs.len() * ys.len());
        for x in xs {
            for y in ys.clone() {
                if let Some(tile) = self.get_tile(x, y) {
                    let coord = TileCoord::new(x, y);
                    let (px, py) = coord.to_pixel(self.tile_size);
                    out.push(DrawTile { coord, px, py, tile });
                }
            }
        }
        out
    }

    /// Pixel positions of carved cells at or below the surface inside
    /// `viewport`. These get a cave wall backdrop.
    #[must_use]
    pub fn backdrop_region(&self, viewport: &Viewport) -> Vec<(f32, f32)> {
        let (xs, ys) = viewport.tile_span(self.tile_size);
        let ground = self.ground_level();
        let mut out = Vec::new();
        for x in xs {
            for y in ys.clone().filter(|&y| y >= ground) {
                let coord = TileCoord::new(x, y);
                if matches!(self.overrides.get(&coord.pack()), Some(None)) {
                    out.push(coord.to_pixel(self.tile_size));
                }
            }
        }
        out
    }

    /// Every overridden water tile with its level, bottom row first.
    #[must_use]
    pub fn water_tiles(&self) -> Vec<(TileCoord, u8)> {
        let mut water: Vec<(TileCoord, u8)> = self
            .overrides
            .iter()
            .filter_map(|(&key, entry)| {
                let level = entry.and_then(Tile::level)?;
                Some((TileCoord::unpack(key), level))
            })
            .collect();
        water.sort_unstable_by(|(a, _), (b, _)| b.y.cmp(&a.y).then(a.x.cmp(&b.x)));
        water
    }

    /// Number of cells that differ from the baseline.
    #[inline]
    #[must_use]
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Whether `(x, y)` differs from the baseline.
    #[inline]
    #[must_use]
    pub fn has_override(&self, x: i32, y: i32) -> bool {
        self.overrides.contains_key(&TileCoord::new(x, y).pack())
    }

    /// Iterates over every stored override, in no particular order.
    pub fn overrides(&self) -> impl Iterator<Item = (TileCoord, Option<Tile>)> + '_ {
        self.overrides
            .iter()
            .map(|(&key, &entry)| (TileCoord::unpack(key), entry))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(TerrainGenerator::default(), DEFAULT_TILE_SIZE)
    }
}

fn same_kind(a: Option<Tile>, b: Option<Tile>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.same_kind(b),
        (None, None) => true,
        _ => false,
    }
}

fn identical(a: Option<Tile>, b: Option<Tile>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.identical(b),
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKY: i32 = 5;
    const GRASS: i32 = 10;
    const DEEP: i32 = 30;

    #[test]
    fn test_untouched_world_matches_baseline() {
        let world = World::default();
        for x in -10..10 {
            for y in -5..40 {
                assert_eq!(world.get_tile(x, y), world.terrain().default_tile(x, y));
            }
        }
        assert_eq!(world.override_count(), 0);
    }

    #[test]
    fn test_writing_baseline_stores_nothing() {
        let mut world = World::default();
        assert!(!world.set_tile(3, DEEP, TileKind::Stone));
        assert!(!world.set_tile(3, SKY, Option::<Tile>::None));
        assert_eq!(world.override_count(), 0);
    }

    #[test]
    fn test_restoring_baseline_drops_override() {
        let mut world = World::default();
        assert!(world.add_tile(0, SKY, TileKind::Dirt));
        assert!(world.has_override(0, SKY));
        assert!(world.carve(0, SKY));
        assert!(!world.has_override(0, SKY));

        assert!(world.carve(0, DEEP));
        assert_eq!(world.get_tile(0, DEEP), None);
        assert!(world.set_tile(0, DEEP, TileKind::Stone));
        assert_eq!(world.override_count(), 0);
    }

    #[test]
    fn test_set_tile_accepts_kind() {
        let mut world = World::default();
        assert!(world.set_tile(2, SKY, TileKind::Dirt));
        assert_eq!(world.get_tile(2, SKY).map(Tile::kind), Some(TileKind::Dirt));
        assert!(!world.set_tile(2, SKY, TileKind::Dirt));
        assert!(world.set_tile(2, SKY, TileKind::Water));
        assert!(world.get_tile(2, SKY).is_some_and(Tile::is_source));
        assert_eq!(world.override_count(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut world = World::default();
        let removed = world.remove_tile(0, GRASS);
        assert_eq!(removed.map(Tile::kind), Some(TileKind::Grass));
        assert_eq!(world.remove_tile(0, GRASS), None);
        assert_eq!(world.get_tile(0, GRASS), None);
        assert_eq!(world.override_count(), 1);
    }

    #[test]
    fn test_remove_skips_water_and_air() {
        let mut world = World::default();
        world.set_tile(1, SKY, Tile::water(4));
        assert_eq!(world.remove_tile(1, SKY), None);
        assert_eq!(world.get_tile(1, SKY).and_then(Tile::level), Some(4));
        assert_eq!(world.remove_tile(2, SKY), None);
    }

    #[test]
    fn test_water_level_change_is_a_change() {
        let mut world = World::default();
        assert!(world.set_tile(0, SKY, Tile::water(8)));
        assert!(world.set_tile(0, SKY, Tile::water(3)));
        assert!(!world.set_tile(0, SKY, Tile::water(3)));
        assert_eq!(world.override_count(), 1);
    }

    #[test]
    fn test_draw_region_is_column_major() {
        let world = World::default();
        let tiles = world.draw_region(&Viewport::new(0.0, 320.0, 64.0, 64.0));
        let coords: Vec<_> = tiles.iter().map(|t| (t.coord.x, t.coord.y)).collect();
        assert_eq!(coords, vec![(0, 10), (0, 11), (1, 10), (1, 11)]);
        assert_eq!((tiles[1].px, tiles[1].py), (0.0, 352.0));
    }

    #[test]
    fn test_draw_region_skips_air() {
        let mut world = World::default();
        world.carve(0, GRASS);
        let tiles = world.draw_region(&Viewport::new(0.0, 0.0, 32.0, 352.0));
        assert!(tiles.is_empty());
    }

    #[test]
    fn test_backdrop_only_below_surface() {
        let mut world = World::default();
        world.carve(0, GRASS);
        world.carve(0, GRASS + 1);
        world.add_tile(1, SKY, TileKind::Dirt);
        world.carve(1, SKY);
        let backdrop = world.backdrop_region(&Viewport::new(0.0, 0.0, 64.0, 800.0));
        assert_eq!(backdrop, vec![(0.0, 320.0), (0.0, 352.0)]);
    }

    #[test]
    fn test_water_tiles_bottom_first() {
        let mut world = World::default();
        world.set_tile(0, 1, Tile::water(2));
        world.set_tile(5, 3, Tile::source());
        world.set_tile(2, 3, Tile::water(6));
        world.add_tile(9, 2, TileKind::Wood);
        let water = world.water_tiles();
        assert_eq!(
            water,
            vec![
                (TileCoord::new(2, 3), 6),
                (TileCoord::new(5, 3), 8),
                (TileCoord::new(0, 1), 2),
            ]
        );
    }

    #[test]
    fn test_extreme_coordinates() {
        let mut world = World::default();
        assert!(world.add_tile(i32::MIN, i32::MIN, TileKind::Wood));
        assert!(world.carve(i32::MAX, i32::MAX));
        assert_eq!(world.get_tile(i32::MIN, i32::MIN).map(Tile::kind), Some(TileKind::Wood));
        assert_eq!(world.get_tile(i32::MAX, i32::MAX), None);
    }
}
