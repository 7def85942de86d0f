//! # Coordinates
//!
//! Tile coordinates are unbounded `i32` pairs with y growing downward.
//! Pixel space is tile space scaled by the tile size.
//!
//! ## Packed Keys
//!
//! The override store keys on a single `u64`. `TileCoord` is a plain
//! `#[repr(C)]` pair of `i32`, so it reinterprets losslessly as 8 bytes.
//! The packed value is an in-process key only and is never written out.

use bytemuck::{Pod, Zeroable};

/// Default edge length of one tile in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 32;

/// Integer position of a tile on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(C)]
pub struct TileCoord {
    /// Column. Grows to the right.
    pub x: i32,
    /// Row. Grows downward.
    pub y: i32,
}

impl TileCoord {
    /// Creates a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Packs into a single map key.
    #[inline]
    #[must_use]
    pub fn pack(self) -> u64 {
        bytemuck::cast(self)
    }

    /// Inverse of [`TileCoord::pack`].
    #[inline]
    #[must_use]
    pub fn unpack(key: u64) -> Self {
        bytemuck::cast(key)
    }

    /// Tile containing the pixel `(px, py)`. Floors, so negative pixels map
    /// to negative tiles.
    #[inline]
    #[must_use]
    pub fn from_pixel(px: f32, py: f32, tile_size: u32) -> Self {
        let size = tile_size as f32;
        Self {
            x: (px / size).floor() as i32,
            y: (py / size).floor() as i32,
        }
    }

    /// Top-left pixel of this tile.
    #[inline]
    #[must_use]
    pub fn to_pixel(self, tile_size: u32) -> (f32, f32) {
        let size = tile_size as f32;
        (self.x as f32 * size, self.y as f32 * size)
    }

    /// The tile directly below.
    #[inline]
    #[must_use]
    pub const fn below(self) -> Self {
        Self {
            x: self.x,
            y: self.y.wrapping_add(1),
        }
    }
}

impl From<(i32, i32)> for TileCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Rectangle in pixel space, top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Tile columns and rows whose boxes strictly intersect this rectangle,
    /// as half-open ranges. Tiles that only share an edge are excluded.
    #[must_use]
    pub fn tile_span(&self, tile_size: u32) -> (std::ops::Range<i32>, std::ops::Range<i32>) {
        let size = tile_size as f32;
        let x0 = (self.x / size).floor() as i32;
        let y0 = (self.y / size).floor() as i32;
        let x1 = ((self.x + self.width) / size).ceil() as i32;
        let y1 = ((self.y + self.height) / size).ceil() as i32;
        (x0..x1.max(x0), y0..y1.max(y0))
    }
}
