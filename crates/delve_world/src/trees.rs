//! # Tree Scattering
//!
//! Plants trees on grass columns. Each tree is a wood trunk rising from the
//! row above the ground and a 3x3 leaf canopy centered on the trunk top.
//! The canopy is written last and overwrites whatever it covers, including
//! the top of the trunk and parts of neighbouring trees.

use std::ops::Range;

use rand::Rng;
use tracing::debug;

use crate::tile::TileKind;
use crate::world::World;

/// Default per-column planting probability.
pub const DEFAULT_TREE_CHANCE: f64 = 0.1;

/// Shortest trunk.
pub const MIN_TRUNK_HEIGHT: i32 = 6;

/// Tallest trunk.
pub const MAX_TRUNK_HEIGHT: i32 = 9;

/// Plants trees over `x_range` on columns whose `ground_level` tile is
/// grass. Returns the number of trees planted.
pub fn scatter_trees<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    x_range: Range<i32>,
    ground_level: i32,
    chance: f64,
) -> usize {
    let chance = chance.clamp(0.0, 1.0);
    let mut planted = 0;

    for x in x_range {
        let on_grass = world
            .get_tile(x, ground_level)
            .is_some_and(|tile| tile.kind() == TileKind::Grass);
        if !on_grass || !rng.gen_bool(chance) {
            continue;
        }
        let height = rng.gen_range(MIN_TRUNK_HEIGHT..=MAX_TRUNK_HEIGHT);
        plant_tree(world, x, ground_level, height);
        planted += 1;
    }

    debug!(planted, "trees scattered");
    planted
}

/// Writes one tree with its trunk base at `(x, ground_level - 1)`.
pub fn plant_tree(world: &mut World, x: i32, ground_level: i32, height: i32) {
    for i in 1..=height {
        world.add_tile(x, ground_level.saturating_sub(i), TileKind::Wood);
    }
    let canopy_y = ground_level.saturating_sub(height);
    for cx in x.saturating_sub(1)..=x.saturating_add(1) {
        for cy in canopy_y.saturating_sub(1)..=canopy_y.saturating_add(1) {
            world.add_tile(cx, cy, TileKind::Leaves);
        }
    }
}
