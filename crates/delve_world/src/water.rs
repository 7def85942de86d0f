//! # Water Flow
//!
//! Discrete, gravity-only water simulation advanced once per tick.
//!
//! ## Rules
//!
//! Water tiles are visited bottom row first, so a column of water falls as a
//! unit instead of one cell per tick per layer. For each tile with level `L`:
//!
//! - the cell below is air, or water with a level below `L`: write
//!   `Water(L)` below. A source (`L == 8`) stays put and keeps feeding the
//!   column; any other level leaves its cell empty.
//! - otherwise the tile rests this tick.
//!
//! There is no horizontal spreading. Water that lands on solid ground stays
//! a single column wide.

use tracing::trace;

use crate::tile::{Tile, SOURCE_LEVEL};
use crate::world::World;

/// Counts from one simulation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowStats {
    /// Non-source tiles that moved down one row.
    pub moved: usize,
    /// New tiles written below a source.
    pub spawned: usize,
    /// Tiles that did not move.
    pub settled: usize,
}

impl FlowStats {
    /// Whether anything changed this step.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.moved > 0 || self.spawned > 0
    }
}

/// Advances water by one tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct WaterFlowSimulator;

impl WaterFlowSimulator {
    /// Creates a simulator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs one step over every water tile in `world`.
    pub fn step(&self, world: &mut World) -> FlowStats {
        let mut stats = FlowStats::default();

        for (coord, _) in world.water_tiles() {
            // Earlier moves this step may have replaced the tile.
            let Some(level) = world.get_tile(coord.x, coord.y).and_then(Tile::level) else {
                continue;
            };
            let Some(below_y) = coord.y.checked_add(1) else {
                stats.settled += 1;
                continue;
            };

            let falls = match world.get_tile(coord.x, below_y) {
                None => true,
                Some(below) => below.level().is_some_and(|below_level| below_level < level),
            };
            if !falls {
                stats.settled += 1;
                continue;
            }

            world.set_tile(coord.x, below_y, Tile::water(level));
            if level < SOURCE_LEVEL {
                world.carve(coord.x, coord.y);
                stats.moved += 1;
            } else {
                stats.spawned += 1;
            }
        }

        trace!(
            moved = stats.moved,
            spawned = stats.spawned,
            settled = stats.settled,
            "water step"
        );
        stats
    }
}
