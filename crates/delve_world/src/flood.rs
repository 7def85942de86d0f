//! # Surface Flooding
//!
//! Turns wide openings just below the surface into ponds. A single scan
//! along the top row finds maximal runs of air; runs at least
//! `min_width` wide are filled with source water down to the bottom row.
//! Narrow shafts (cave mouths) stay dry.

use std::ops::Range;

use tracing::debug;

use crate::tile::Tile;
use crate::world::World;

/// Narrowest opening that gets flooded.
pub const DEFAULT_MIN_GAP_WIDTH: u32 = 5;

/// Floods wide gaps in row `y_top` within `x_range`, filling rows
/// `y_top..=y_bottom` of every gap column with source water.
///
/// Returns the number of gaps filled.
pub fn fill_surface_gaps(
    world: &mut World,
    x_range: Range<i32>,
    y_top: i32,
    y_bottom: i32,
    min_width: u32,
) -> usize {
    let mut gaps = 0;
    let mut x = x_range.start;

    while x < x_range.end {
        if world.get_tile(x, y_top).is_some() {
            x += 1;
            continue;
        }

        let start = x;
        while x < x_range.end && world.get_tile(x, y_top).is_none() {
            x += 1;
        }

        let width = u32::try_from(i64::from(x) - i64::from(start)).unwrap_or(u32::MAX);
        if width >= min_width {
            for column in start..x {
                for y in y_top..=y_bottom {
                    world.set_tile(column, y, Tile::source());
                }
            }
            debug!(start, width, "surface gap flooded");
            gaps += 1;
        }
    }
    gaps
}
