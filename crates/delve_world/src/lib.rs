//! # DELVE World
//!
//! Tile world model for a side-view sandbox: a deterministic terrain
//! baseline, a sparse diff of player and generator edits on top of it, the
//! one-shot generation passes, and the per-tick water flow.
//!
//! ## Design Principles
//!
//! 1. **Baseline + diff**: untouched cells are computed, never stored
//! 2. **Minimal diff**: a cell is stored only while it differs from the baseline
//! 3. **Unbounded**: every `i32` coordinate pair is valid
//! 4. **Pure**: no rendering, no I/O, no threads
//!
//! ## Core Components
//!
//! - `TerrainGenerator`: grass, dirt/stone band, stone below
//! - `World`: override store, tile queries, visible region
//! - `generate_layer` / `fill_surface_gaps` / `scatter_trees`: generation passes
//! - `WorldGenerator`: runs the passes in order from one seeded RNG
//! - `WaterFlowSimulator`: drip-only vertical water flow
//!
//! ## Example
//!
//! ```rust
//! use delve_world::{TileKind, World, WaterFlowSimulator};
//!
//! let mut world = World::default();
//! assert_eq!(world.get_tile(0, 10).map(|t| t.kind()), Some(TileKind::Grass));
//!
//! world.add_tile(0, 2, TileKind::Water);
//! WaterFlowSimulator::new().step(&mut world);
//! assert!(world.get_tile(0, 3).is_some_and(|t| t.is_water()));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
// Pixel/tile conversions cast between f32 and i32 everywhere.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

pub mod caves;
pub mod config;
pub mod coord;
pub mod error;
pub mod flood;
pub mod generation;
pub mod noise;
pub mod terrain;
pub mod tile;
pub mod trees;
pub mod water;
pub mod world;

pub use caves::{carve_blob, generate_layer, CaveType, LayerReport};
pub use config::{CaveLayerConfig, FloodConfig, GenerationConfig, TreeConfig, WorldConfig};
pub use coord::{TileCoord, Viewport, DEFAULT_TILE_SIZE};
pub use error::{WorldError, WorldResult};
pub use flood::{fill_surface_gaps, DEFAULT_MIN_GAP_WIDTH};
pub use generation::{GenerationReport, WorldGenerator};
pub use terrain::{TerrainGenerator, DEFAULT_DIRT_BAND_DEPTH, DEFAULT_GROUND_LEVEL};
pub use tile::{Tile, TileKind, SOURCE_LEVEL};
pub use trees::{plant_tree, scatter_trees, DEFAULT_TREE_CHANCE};
pub use water::{FlowStats, WaterFlowSimulator};
pub use world::{DrawTile, World};
