//! # DELVE Game Session
//!
//! One running game: the world, the player, the camera and the tick.
//!
//! ```text
//! Tick N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. POINTER EDITS                                                    │
//! │    └─ Dig / place under the mouse, emit TileDug / TilePlaced        │
//! │                                                                     │
//! │ 2. WATER                                                            │
//! │    └─ One flow step over the state left by tick N-1 and the edits   │
//! │                                                                     │
//! │ 3. PLAYER                                                           │
//! │    ├─ Fly toggle, horizontal move + collision                       │
//! │    ├─ Gravity + vertical collision (sees post-water state)          │
//! │    └─ Swim / jump                                                   │
//! │                                                                     │
//! │ 4. CAMERA                                                           │
//! │    └─ Dead-zone follow                                              │
//! │                                                                     │
//! │ 5. VISIBLE REGION                                                   │
//! │    └─ Count tiles the presentation layer will draw                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::{Duration, Instant};

use delve_world::{
    DrawTile, FlowStats, GenerationReport, TileCoord, WaterFlowSimulator, World, WorldGenerator,
};
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::events::{EventBus, EventReceiver, EventSender, GameEvent, DEFAULT_EVENT_CAPACITY};
use crate::input::{FrameInput, PointerCommand};
use crate::physics::{PhysicsConfig, Player, PlayerStep};

/// Target tick time for 60 ticks per second.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// Rows above the ground where the player spawns.
pub const SPAWN_HEIGHT: i32 = 2;

/// Timing of one tick's phases, in microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Whole tick.
    pub total_us: u64,
    /// Pointer edits.
    pub edits_us: u64,
    /// Water step.
    pub water_us: u64,
    /// Player update and camera.
    pub player_us: u64,
    /// Visible region query.
    pub query_us: u64,
}

/// Outcome of one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number, starting at 0.
    pub tick: u64,
    /// Pointer commands that changed the world.
    pub edits: usize,
    /// Water step counts.
    pub flow: FlowStats,
    /// Player step flags.
    pub player: PlayerStep,
    /// Tiles in the camera viewport.
    pub visible_tiles: usize,
    /// Phase timings.
    pub timing: FrameStats,
}

/// A running game.
pub struct GameSession {
    world: World,
    player: Player,
    camera: Camera,
    physics: PhysicsConfig,
    water: WaterFlowSimulator,
    events: EventBus,
    sender: EventSender,
    generation: GenerationReport,
    tick_count: u64,
    stats: FrameStatsAccumulator,
}

impl GameSession {
    /// Generates a world and spawns the player above the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: &GameConfig) -> GameResult<Self> {
        config.validate()?;
        let (world, generation) = WorldGenerator::new(config.world.clone()).build();
        Ok(Self::with_world(world, generation, config))
    }

    /// Starts a session over an existing world. No generation is run and no
    /// validation is done.
    #[must_use]
    pub fn with_world(world: World, generation: GenerationReport, config: &GameConfig) -> Self {
        let spawn_row = world.ground_level().saturating_sub(SPAWN_HEIGHT);
        let (_, spawn_y) = TileCoord::new(0, spawn_row).to_pixel(world.tile_size());
        let player = Player::new(0.0, spawn_y);

        let camera = Camera::centered_on(&player, config.camera.clone());

        let events = EventBus::new(DEFAULT_EVENT_CAPACITY);
        let sender = events.sender();

        info!(x = player.x, y = player.y, seed = generation.seed, "session started");

        Self {
            world,
            player,
            camera,
            physics: config.physics.clone(),
            water: WaterFlowSimulator::new(),
            events,
            sender,
            generation,
            tick_count: 0,
            stats: FrameStatsAccumulator::new(),
        }
    }

    /// Runs one tick.
    pub fn tick(&mut self, input: &FrameInput, pointer: &[PointerCommand]) -> TickReport {
        let start = Instant::now();
        let mut report = TickReport {
            tick: self.tick_count,
            ..TickReport::default()
        };

        for command in pointer {
            if self.apply_pointer(command) {
                report.edits += 1;
            }
        }
        let edits_done = Instant::now();

        report.flow = self.water.step(&mut self.world);
        let water_done = Instant::now();

        report.player = self.player.update(&self.world, input, &self.physics);
        if report.player.fly_toggled {
            let enabled = self.player.fly_mode;
            debug!(enabled, "fly mode toggled");
            self.sender.send(GameEvent::FlyModeToggled { enabled });
        }
        self.camera.follow(&self.player);
        let player_done = Instant::now();

        report.visible_tiles = self.world.draw_region(&self.camera.viewport()).len();
        let end = Instant::now();

        report.timing = FrameStats {
            total_us: micros(end - start),
            edits_us: micros(edits_done - start),
            water_us: micros(water_done - edits_done),
            player_us: micros(player_done - water_done),
            query_us: micros(end - player_done),
        };
        self.stats.record(report.timing);
        if report.timing.total_us > TARGET_FRAME_TIME.as_micros() as u64 {
            warn!(tick = report.tick, total_us = report.timing.total_us, "tick over budget");
        }

        self.tick_count += 1;
        report
    }

    fn apply_pointer(&mut self, command: &PointerCommand) -> bool {
        let (sx, sy) = command.screen_pos();
        let coord = self.camera.screen_to_tile(sx, sy, self.world.tile_size());
        match *command {
            PointerCommand::Dig { .. } => {
                let Some(tile) = self.world.remove_tile(coord.x, coord.y) else {
                    return false;
                };
                debug!(x = coord.x, y = coord.y, kind = %tile.kind(), "tile dug");
                self.sender.send(GameEvent::TileDug { coord, tile });
                true
            }
            PointerCommand::Place { kind, .. } => {
                if !self.world.add_tile(coord.x, coord.y, kind) {
                    return false;
                }
                debug!(x = coord.x, y = coord.y, %kind, "tile placed");
                self.sender.send(GameEvent::TilePlaced { coord, kind });
                true
            }
        }
    }

    /// Tiles to draw this frame.
    #[must_use]
    pub fn visible_tiles(&self) -> Vec<DrawTile> {
        self.world.draw_region(&self.camera.viewport())
    }

    /// Carved cells in view that get a cave wall backdrop.
    #[must_use]
    pub fn visible_backdrop(&self) -> Vec<(f32, f32)> {
        self.world.backdrop_region(&self.camera.viewport())
    }

    /// A new handle on the event channel.
    #[must_use]
    pub fn event_receiver(&self) -> EventReceiver {
        self.events.receiver()
    }

    /// The world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access, for scripted edits.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player access, for teleports and tests.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// The camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Ticks run so far.
    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// How the world was generated.
    #[must_use]
    pub const fn generation(&self) -> &GenerationReport {
        &self.generation
    }

    /// Accumulated tick timings.
    #[must_use]
    pub const fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// Accumulator for tick timings.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Ticks recorded.
    pub frames_recorded: u64,
    /// Sum of whole-tick times.
    pub total_us_sum: u64,
    /// Sum of water step times.
    pub water_us_sum: u64,
    /// Sum of player update times.
    pub player_us_sum: u64,
    /// Sum of visible region times.
    pub query_us_sum: u64,
    /// Fastest tick.
    pub min_frame_us: u64,
    /// Slowest tick.
    pub max_frame_us: u64,
    /// Ticks over the 60 Hz budget.
    pub frames_over_budget: u64,
}

impl FrameStatsAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            water_us_sum: 0,
            player_us_sum: 0,
            query_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
        }
    }

    /// Records one tick.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum = self.total_us_sum.saturating_add(stats.total_us);
        self.water_us_sum = self.water_us_sum.saturating_add(stats.water_us);
        self.player_us_sum = self.player_us_sum.saturating_add(stats.player_us);
        self.query_us_sum = self.query_us_sum.saturating_add(stats.query_us);
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);

        if stats.total_us > TARGET_FRAME_TIME.as_micros() as u64 {
            self.frames_over_budget += 1;
        }
    }

    /// Average tick time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Ticks per second the average tick time allows.
    #[must_use]
    pub fn avg_fps(&self) -> f64 {
        let avg_ms = self.avg_frame_ms();
        if avg_ms <= 0.0 {
            return 0.0;
        }
        1000.0 / avg_ms
    }

    /// Share of ticks over budget.
    #[must_use]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }

    /// Logs a summary at info level.
    pub fn log_summary(&self) {
        if self.frames_recorded == 0 {
            info!("no ticks recorded");
            return;
        }
        let per_tick = |sum: u64| (sum as f64 / self.frames_recorded as f64) / 1000.0;
        info!(
            ticks = self.frames_recorded,
            avg_ms = format_args!("{:.3}", self.avg_frame_ms()),
            min_ms = format_args!("{:.3}", self.min_frame_us as f64 / 1000.0),
            max_ms = format_args!("{:.3}", self.max_frame_us as f64 / 1000.0),
            over_budget = self.frames_over_budget,
            "tick timing"
        );
        info!(
            water_ms = format_args!("{:.3}", per_tick(self.water_us_sum)),
            player_ms = format_args!("{:.3}", per_tick(self.player_us_sum)),
            query_ms = format_args!("{:.3}", per_tick(self.query_us_sum)),
            "tick breakdown"
        );
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
