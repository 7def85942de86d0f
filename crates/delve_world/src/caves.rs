//! # Cave Carving
//!
//! Caves are unions of elliptical blobs carved into the terrain at startup.
//!
//! ## Blob Shape
//!
//! ```text
//!        |          <- entrance rows: a thin strip at the center column
//!        |
//!    #########
//!  #############    <- body: strict ellipse interior
//!    #########
//! ```
//!
//! The top [`ENTRANCE_HEIGHT`] rows of the bounding box carve only a strip,
//! giving each cave a narrow mouth. Dirt caves get a single column; stone
//! caves get `entrance_width / 2` columns on either side of the center.
//!
//! Stone layers sometimes stack a second, smaller blob above a cave and join
//! the two with a one-column shaft.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coord::TileCoord;
use crate::world::World;

/// Rows at the top of a blob that carve only the entrance strip.
pub const ENTRANCE_HEIGHT: i32 = 2;

/// Probability that a stone blob gets a linked upper chamber.
pub const LINKED_CHAMBER_CHANCE: f64 = 0.2;

/// Cave family. Decides blob size, count and entrance shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaveType {
    /// Small, shallow caves with single-column mouths.
    Dirt,
    /// Large, deep caverns.
    Stone,
}

/// Size parameters of one cave family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlobProfile {
    /// Minimum number of blobs per layer.
    pub min_blobs: usize,
    /// One extra blob per this many columns of layer width.
    pub columns_per_blob: usize,
    /// Horizontal radius range.
    pub rx: (i32, i32),
    /// Vertical radius range.
    pub ry: (i32, i32),
    /// Entrance strip width.
    pub entrance_width: i32,
}

impl CaveType {
    /// Stock size parameters.
    #[must_use]
    pub const fn profile(self) -> BlobProfile {
        match self {
            Self::Dirt => BlobProfile {
                min_blobs: 8,
                columns_per_blob: 20,
                rx: (3, 6),
                ry: (2, 4),
                entrance_width: 2,
            },
            Self::Stone => BlobProfile {
                min_blobs: 5,
                columns_per_blob: 30,
                rx: (8, 16),
                ry: (6, 12),
                entrance_width: 1,
            },
        }
    }

    /// Blob count for a layer `width` columns wide.
    #[must_use]
    pub fn blob_count(self, width: i32) -> usize {
        let profile = self.profile();
        let width = usize::try_from(width).unwrap_or(0);
        profile.min_blobs.max(width / profile.columns_per_blob)
    }
}

/// Outcome of one cave layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerReport {
    /// Primary blobs carved.
    pub blobs: usize,
    /// Stone blobs that got a linked upper chamber.
    pub linked: usize,
    /// Cells whose content changed.
    pub cells_carved: usize,
}

/// Carves one blob centered on `center`. Returns the number of cells whose
/// content changed.
///
/// Zero radii carve only the entrance strip; the body test is skipped.
pub fn carve_blob(
    world: &mut World,
    center: TileCoord,
    rx: i32,
    ry: i32,
    entrance_width: i32,
    cave_type: CaveType,
) -> usize {
    let (cx, cy) = (center.x, center.y);
    let top = cy.saturating_sub(ry);
    let entrance_end = top.saturating_add(ENTRANCE_HEIGHT);
    let half_mouth = entrance_width / 2;
    let (rx_f, ry_f) = (f64::from(rx), f64::from(ry));
    let mut carved = 0;

    for y in top..=cy.saturating_add(ry) {
        for x in cx.saturating_sub(rx)..=cx.saturating_add(rx) {
            let hit = if y < entrance_end {
                match cave_type {
                    CaveType::Dirt => x == cx,
                    CaveType::Stone => (i64::from(x) - i64::from(cx)).abs() <= i64::from(half_mouth),
                }
            } else if rx == 0 || ry == 0 {
                false
            } else {
                let dx = f64::from(x) - f64::from(cx);
                let dy = f64::from(y) - f64::from(cy);
                (dx * dx) / (rx_f * rx_f) + (dy * dy) / (ry_f * ry_f) < 1.0
            };
            if hit && world.carve(x, y) {
                carved += 1;
            }
        }
    }
    carved
}

/// Carves a layer of random blobs with centers inside the given inclusive
/// ranges.
pub fn generate_layer<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    x_range: RangeInclusive<i32>,
    y_range: RangeInclusive<i32>,
    cave_type: CaveType,
) -> LayerReport {
    let profile = cave_type.profile();
    let width = x_range.end().saturating_sub(*x_range.start());
    let count = cave_type.blob_count(width);
    let mut report = LayerReport::default();

    if x_range.is_empty() || y_range.is_empty() {
        return report;
    }

    for _ in 0..count {
        let cx = rng.gen_range(x_range.clone());
        let cy = rng.gen_range(y_range.clone());
        let rx = rng.gen_range(profile.rx.0..=profile.rx.1);
        let ry = rng.gen_range(profile.ry.0..=profile.ry.1);
        report.cells_carved += carve_blob(
            world,
            TileCoord::new(cx, cy),
            rx,
            ry,
            profile.entrance_width,
            cave_type,
        );
        report.blobs += 1;

        if cave_type == CaveType::Stone && rng.gen_bool(LINKED_CHAMBER_CHANCE) {
            report.cells_carved += carve_linked_chamber(world, rng, cx, cy, ry);
            report.linked += 1;
        }
    }

    debug!(
        ?cave_type,
        blobs = report.blobs,
        linked = report.linked,
        cells = report.cells_carved,
        "cave layer carved"
    );
    report
}

/// Carves a smaller chamber above the blob at `(cx, cy)` and a shaft from
/// the chamber's floor down to the blob's top row.
fn carve_linked_chamber<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    cx: i32,
    cy: i32,
    ry: i32,
) -> usize {
    let lower_top = cy.saturating_sub(ry);
    let upper_cy = lower_top.saturating_sub(rng.gen_range(2..=4));
    let upper_rx = rng.gen_range(6..=10);
    let upper_ry = rng.gen_range(4..=8);

    let mut carved = carve_blob(
        world,
        TileCoord::new(cx, upper_cy),
        upper_rx,
        upper_ry,
        1,
        CaveType::Stone,
    );
    for y in upper_cy.saturating_add(upper_ry)..=lower_top {
        if world.carve(cx, y) {
            carved += 1;
        }
    }
    carved
}
