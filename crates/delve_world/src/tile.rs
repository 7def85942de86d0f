//! # Tiles
//!
//! A tile is a small `Copy` value: a material kind plus, for water, a fill
//! level. Air is never a tile; it is the absence of one (`Option<Tile>::None`).
//!
//! ## Equality
//!
//! `PartialEq` compares kinds only. Two water tiles are equal whatever their
//! levels, because the level is simulation state rather than identity. Code
//! that cares about the level uses [`Tile::identical`]; code that collapses a
//! write back onto the terrain baseline uses [`Tile::same_kind`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Water level of a full source block. Sources never drain.
pub const SOURCE_LEVEL: u8 = 8;

/// Lowest level a water tile can carry.
pub const MIN_WATER_LEVEL: u8 = 1;

/// Material of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    /// Surface layer, one row thick.
    Grass,
    /// Shallow underground fill.
    Dirt,
    /// Deep underground fill.
    Stone,
    /// Cave wall material.
    CaveStone,
    /// Flowing or source water. Never blocks movement.
    Water,
    /// Tree trunk.
    Wood,
    /// Tree canopy.
    Leaves,
}

impl TileKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Grass,
        Self::Dirt,
        Self::Stone,
        Self::CaveStone,
        Self::Water,
        Self::Wood,
        Self::Leaves,
    ];

    /// Canonical snake_case name, as used in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Dirt => "dirt",
            Self::Stone => "stone",
            Self::CaveStone => "cave_stone",
            Self::Water => "water",
            Self::Wood => "wood",
            Self::Leaves => "leaves",
        }
    }

    /// Whether the player can dig this kind out by direct action.
    #[inline]
    #[must_use]
    pub const fn can_interact(self) -> bool {
        !matches!(self, Self::Water)
    }

    /// Whether this kind blocks movement.
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Self::Water)
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileKind {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| WorldError::UnknownTileKind(s.to_owned()))
    }
}

/// One grid cell's content.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tile {
    kind: TileKind,
    /// Water fill level (1..=8). Always 0 for other kinds.
    level: u8,
}

impl Tile {
    /// Creates a tile of the given kind. Water starts as a full source.
    #[inline]
    #[must_use]
    pub const fn new(kind: TileKind) -> Self {
        match kind {
            TileKind::Water => Self::water(SOURCE_LEVEL),
            _ => Self { kind, level: 0 },
        }
    }

    /// Creates a water tile, clamping `level` into `1..=8`.
    #[inline]
    #[must_use]
    pub const fn water(level: u8) -> Self {
        let level = if level < MIN_WATER_LEVEL {
            MIN_WATER_LEVEL
        } else if level > SOURCE_LEVEL {
            SOURCE_LEVEL
        } else {
            level
        };
        Self {
            kind: TileKind::Water,
            level,
        }
    }

    /// A full water source.
    #[inline]
    #[must_use]
    pub const fn source() -> Self {
        Self::water(SOURCE_LEVEL)
    }

    /// Material kind.
    #[inline]
    #[must_use]
    pub const fn kind(self) -> TileKind {
        self.kind
    }

    /// Water level, or `None` for every other kind.
    #[inline]
    #[must_use]
    pub const fn level(self) -> Option<u8> {
        match self.kind {
            TileKind::Water => Some(self.level),
            _ => None,
        }
    }

    /// Whether this is water.
    #[inline]
    #[must_use]
    pub const fn is_water(self) -> bool {
        matches!(self.kind, TileKind::Water)
    }

    /// Whether this is a water source (level 8).
    #[inline]
    #[must_use]
    pub const fn is_source(self) -> bool {
        self.is_water() && self.level == SOURCE_LEVEL
    }

    /// Whether the player can dig this tile out.
    #[inline]
    #[must_use]
    pub const fn can_interact(self) -> bool {
        self.kind.can_interact()
    }

    /// Whether this tile blocks movement.
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        self.kind.is_solid()
    }

    /// Kind-only comparison. Water levels are ignored.
    #[inline]
    #[must_use]
    pub fn same_kind(self, other: Self) -> bool {
        self.kind == other.kind
    }

    /// Strict comparison of kind and level.
    #[inline]
    #[must_use]
    pub fn identical(self, other: Self) -> bool {
        self.kind == other.kind && self.level == other.level
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.same_kind(*other)
    }
}

impl Eq for Tile {}

impl From<TileKind> for Tile {
    fn from(kind: TileKind) -> Self {
        Self::new(kind)
    }
}

impl From<TileKind> for Option<Tile> {
    fn from(kind: TileKind) -> Self {
        Some(Tile::new(kind))
    }
}
