//! # DELVE
//!
//! The game crate: the player, the camera and the tick, on top of the
//! `delve_world` tile model.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          GameSession                             │
//! │                                                                  │
//! │  FrameInput ──┐                                                  │
//! │  Pointer ─────┼──> edits ──> water ──> player ──> camera ──> view │
//! │               │      │                   │                       │
//! │               │      └───────┬───────────┘                       │
//! │               │              v                                   │
//! │               │          EventBus ──────────> presentation       │
//! │                                                                  │
//! │  delve_world: World, WaterFlowSimulator, WorldGenerator          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `physics`: Player controller and AABB collision
//! - `input`: Actions, per-tick input, pointer commands
//! - `camera`: Dead-zone follow camera
//! - `events`: Session-to-presentation event channel
//! - `session`: Tick orchestration and timing
//! - `config`: TOML game config
//! - `logging`: `tracing` subscriber setup

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

pub mod camera;
pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod logging;
pub mod physics;
pub mod session;

pub use delve_world as world;

pub use camera::{Camera, CameraConfig};
pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use events::{EventBus, EventReceiver, EventSender, GameEvent};
pub use input::{Action, ActionSet, FrameInput, PointerCommand};
pub use logging::{init_tracing, LogConfig, LogLevel};
pub use physics::{Aabb, Facing, PhysicsConfig, Player, PlayerStep, PLAYER_HEIGHT, PLAYER_WIDTH};
pub use session::{FrameStats, FrameStatsAccumulator, GameSession, TickReport};
