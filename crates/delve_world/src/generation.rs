//! # World Generation Pipeline
//!
//! Runs the one-shot passes over a fresh world, in a fixed order:
//!
//! 1. dirt caves
//! 2. stone caves
//! 3. surface flooding (sees the dirt cave mouths)
//! 4. trees (sees the final surface)
//!
//! Every pass draws from one `ChaCha8Rng`. With a configured seed the result
//! is fully reproducible; without one a fresh seed is drawn and reported so
//! an interesting world can be regenerated later.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, info_span};

use crate::caves::{generate_layer, CaveType, LayerReport};
use crate::config::WorldConfig;
use crate::flood::fill_surface_gaps;
use crate::trees::scatter_trees;
use crate::world::World;

/// Summary of one generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Seed the RNG was built from.
    pub seed: u64,
    /// Dirt cave layer outcome.
    pub dirt_caves: LayerReport,
    /// Stone cave layer outcome.
    pub stone_caves: LayerReport,
    /// Surface gaps turned into ponds.
    pub ponds: usize,
    /// Trees planted.
    pub trees: usize,
    /// Overrides stored once every pass has run.
    pub overrides: usize,
}

/// Applies the configured generation passes to a world.
#[derive(Clone, Debug, Default)]
pub struct WorldGenerator {
    config: WorldConfig,
}

impl WorldGenerator {
    /// Creates a generator.
    #[must_use]
    pub const fn new(config: WorldConfig) -> Self {
        Self { config }
    }

    /// The config in use.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Seed a run will use: the configured one, or a fresh random one.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.config
            .generation
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen())
    }

    /// Builds a world from the config and runs every pass over it.
    #[must_use]
    pub fn build(&self) -> (World, GenerationReport) {
        let mut world = World::from_config(&self.config);
        let report = self.generate(&mut world);
        (world, report)
    }

    /// Runs every enabled pass over `world`.
    pub fn generate(&self, world: &mut World) -> GenerationReport {
        let seed = self.resolve_seed();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate_with(world, &mut rng, seed)
    }

    fn generate_with(&self, world: &mut World, rng: &mut ChaCha8Rng, seed: u64) -> GenerationReport {
        let ground = world.ground_level();
        let passes = &self.config.generation;
        let mut report = GenerationReport {
            seed,
            ..GenerationReport::default()
        };

        if passes.dirt_caves.enabled {
            let _span = info_span!("caves", layer = "dirt").entered();
            report.dirt_caves = generate_layer(
                world,
                rng,
                passes.dirt_caves.x_range(),
                passes.dirt_caves.y_range(ground),
                CaveType::Dirt,
            );
        }

        if passes.stone_caves.enabled {
            let _span = info_span!("caves", layer = "stone").entered();
            report.stone_caves = generate_layer(
                world,
                rng,
                passes.stone_caves.x_range(),
                passes.stone_caves.y_range(ground),
                CaveType::Stone,
            );
        }

        if passes.flood.enabled {
            let _span = info_span!("flood").entered();
            report.ponds = fill_surface_gaps(
                world,
                passes.flood.x_range(),
                ground.saturating_add(passes.flood.top),
                ground.saturating_add(passes.flood.bottom),
                passes.flood.min_width,
            );
        }

        if passes.trees.enabled {
            let _span = info_span!("trees").entered();
            report.trees = scatter_trees(world, rng, passes.trees.x_range(), ground, passes.trees.chance);
        }

        report.overrides = world.override_count();
        info!(
            seed,
            dirt_blobs = report.dirt_caves.blobs,
            stone_blobs = report.stone_caves.blobs,
            linked = report.stone_caves.linked,
            ponds = report.ponds,
            trees = report.trees,
            overrides = report.overrides,
            "world generated"
        );
        report
    }
}
