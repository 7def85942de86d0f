//! # DELVE Physics System
//!
//! Kinematic player controller against the tile grid.
//!
//! Features:
//! - Gravity with a terminal velocity
//! - Per-axis AABB collision against solid tiles
//! - Swimming: buoyancy and a swim stroke inside water
//! - Fly mode: free movement, no collision
//!
//! All units are pixels and pixels per tick. Y grows downward, so falling
//! means positive `vel_y`.

use std::ops::RangeInclusive;

use delve_world::World;
use serde::{Deserialize, Serialize};

use crate::input::{Action, FrameInput};

/// Player hitbox width (pixels).
pub const PLAYER_WIDTH: f32 = 24.0;
/// Player hitbox height (pixels).
pub const PLAYER_HEIGHT: f32 = 48.0;

// ============================================================================
// AABB (Axis-Aligned Bounding Box)
// ============================================================================

/// Axis-aligned box in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Top-left corner.
    pub min: [f32; 2],
    /// Bottom-right corner.
    pub max: [f32; 2],
}

impl Aabb {
    /// Creates a box from its corners.
    #[must_use]
    pub const fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    /// Creates a box from a top-left corner and a size.
    #[must_use]
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: [x, y],
            max: [x + width, y + height],
        }
    }

    /// The box covered by tile `(tx, ty)`.
    #[must_use]
    pub fn from_tile(tx: i32, ty: i32, tile_size: u32) -> Self {
        let size = tile_size as f32;
        Self::from_rect(tx as f32 * size, ty as f32 * size, size, size)
    }

    /// Strict overlap test. Boxes that only share an edge do not intersect.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min[0] < other.max[0]
            && self.max[0] > other.min[0]
            && self.min[1] < other.max[1]
            && self.max[1] > other.min[1]
    }

    /// Tile columns and rows touched by this box, inclusive. A box edge
    /// lying exactly on a tile boundary still includes the next tile; the
    /// strict [`Aabb::intersects`] test discards it.
    #[must_use]
    pub fn tile_span(&self, tile_size: u32) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
        let size = tile_size as f32;
        let x0 = (self.min[0] / size).floor() as i32;
        let x1 = (self.max[0] / size).floor() as i32;
        let y0 = (self.min[1] / size).floor() as i32;
        let y1 = (self.max[1] / size).floor() as i32;
        (x0..=x1, y0..=y1)
    }
}

// ============================================================================
// CONFIG
// ============================================================================

/// Movement tuning. Speeds are pixels per tick, accelerations pixels per
/// tick squared.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Walking speed.
    pub move_speed: f32,
    /// Flying speed on each axis.
    pub fly_speed: f32,
    /// Downward acceleration.
    pub gravity: f32,
    /// Upward speed at the start of a jump.
    pub jump_velocity: f32,
    /// Fastest fall. Keeps a fall from skipping a whole tile in one tick.
    pub terminal_velocity: f32,
    /// Upward speed while swimming.
    pub swim_impulse: f32,
    /// Downward acceleration in water.
    pub buoyant_gravity: f32,
    /// Fastest sink in water.
    pub max_sink_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            fly_speed: 5.0,
            gravity: 0.5,
            jump_velocity: 10.0,
            terminal_velocity: 24.0,
            swim_impulse: 1.5,
            buoyant_gravity: 0.2,
            max_sink_speed: 1.5,
        }
    }
}

// ============================================================================
// PLAYER
// ============================================================================

/// Direction the player faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    /// Facing left.
    Left,
    /// Facing right.
    #[default]
    Right,
}

/// What happened during one [`Player::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerStep {
    /// Fly mode was switched this tick.
    pub fly_toggled: bool,
    /// The player was touching water.
    pub in_water: bool,
    /// The player jumped off the ground.
    pub jumped: bool,
}

/// The player character.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Left edge (pixels).
    pub x: f32,
    /// Top edge (pixels).
    pub y: f32,
    /// Vertical speed, positive is down.
    pub vel_y: f32,
    /// Standing on a solid tile.
    pub on_ground: bool,
    /// Free flight without collision.
    pub fly_mode: bool,
    /// Facing direction.
    pub facing: Facing,
    /// Moved horizontally this tick.
    pub walking: bool,
    /// Ticks spent walking, for the walk cycle.
    pub stride: u32,
}

impl Player {
    /// Creates a player with its top-left corner at `(x, y)`.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vel_y: 0.0,
            on_ground: false,
            fly_mode: false,
            facing: Facing::Right,
            walking: false,
            stride: 0,
        }
    }

    /// The player's hitbox.
    #[inline]
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Center of the hitbox.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + PLAYER_WIDTH / 2.0, self.y + PLAYER_HEIGHT / 2.0)
    }

    /// Walk cycle frame for a cycle of `frames` frames, each shown for
    /// `ticks_per_frame` ticks.
    #[must_use]
    pub fn stride_frame(&self, ticks_per_frame: u32, frames: u32) -> u32 {
        (self.stride / ticks_per_frame.max(1)) % frames.max(1)
    }

    /// Advances the player by one tick.
    pub fn update(&mut self, world: &World, input: &FrameInput, config: &PhysicsConfig) -> PlayerStep {
        let mut step = PlayerStep::default();

        if input.was_pressed(Action::ToggleFly) {
            self.fly_mode = !self.fly_mode;
            step.fly_toggled = true;
        }

        if self.fly_mode {
            self.fly(input, config);
            return step;
        }

        let tile_size = world.tile_size();

        // Horizontal: left wins over right.
        let dx = if input.is_held(Action::Left) {
            self.facing = Facing::Left;
            -config.move_speed
        } else if input.is_held(Action::Right) {
            self.facing = Facing::Right;
            config.move_speed
        } else {
            0.0
        };
        self.x += dx;
        if dx != 0.0 {
            self.resolve_horizontal(world, dx, tile_size);
        }

        // Vertical.
        self.vel_y = (self.vel_y + config.gravity).min(config.terminal_velocity);
        self.y += self.vel_y;
        self.on_ground = false;
        let (xs, ys) = self.aabb().tile_span(tile_size);
        self.resolve_vertical(world, &xs, &ys, tile_size);

        // Water, over the rows covered after the vertical move.
        step.in_water = xs.clone().any(|tx| {
            ys.clone()
                .any(|ty| world.get_tile(tx, ty).is_some_and(|tile| tile.is_water()))
        });
        if step.in_water {
            self.on_ground = false;
            if input.is_held(Action::Jump) {
                self.vel_y = -config.swim_impulse;
            } else {
                self.vel_y = (self.vel_y + config.buoyant_gravity).min(config.max_sink_speed);
            }
        }

        if self.on_ground && input.is_held(Action::Jump) {
            self.vel_y = -config.jump_velocity;
            self.on_ground = false;
            step.jumped = true;
        }

        self.walking = dx != 0.0;
        if self.walking {
            self.stride = self.stride.wrapping_add(1);
        }

        step
    }

    fn fly(&mut self, input: &FrameInput, config: &PhysicsConfig) {
        let axis = |negative: Action, positive: Action| {
            if input.is_held(positive) {
                config.fly_speed
            } else if input.is_held(negative) {
                -config.fly_speed
            } else {
                0.0
            }
        };
        self.x += axis(Action::Left, Action::Right);
        self.y += axis(Action::Up, Action::Down);
        self.walking = false;
    }

    fn resolve_horizontal(&mut self, world: &World, dx: f32, tile_size: u32) {
        let (xs, ys) = self.aabb().tile_span(tile_size);
        for tx in xs {
            for ty in ys.clone() {
                if !blocks(world, tx, ty) {
                    continue;
                }
                let tile = Aabb::from_tile(tx, ty, tile_size);
                if self.aabb().intersects(&tile) {
                    if dx > 0.0 {
                        self.x = tile.min[0] - PLAYER_WIDTH;
                    } else {
                        self.x = tile.max[0];
                    }
                }
            }
        }
    }

    fn resolve_vertical(
        &mut self,
        world: &World,
        xs: &RangeInclusive<i32>,
        ys: &RangeInclusive<i32>,
        tile_size: u32,
    ) {
        for tx in xs.clone() {
            for ty in ys.clone() {
                if !blocks(world, tx, ty) {
                    continue;
                }
                let tile = Aabb::from_tile(tx, ty, tile_size);
                if !self.aabb().intersects(&tile) {
                    continue;
                }
                if self.vel_y > 0.0 {
                    self.y = tile.min[1] - PLAYER_HEIGHT;
                    self.vel_y = 0.0;
                    self.on_ground = true;
                } else if self.vel_y < 0.0 {
                    self.y = tile.max[1];
                    self.vel_y = 0.0;
                }
            }
        }
    }
}

fn blocks(world: &World, tx: i32, ty: i32) -> bool {
    world.get_tile(tx, ty).is_some_and(|tile| tile.is_solid())
}
