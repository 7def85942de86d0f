//! # Camera
//!
//! Dead-zone follow camera. The view only scrolls when the player leaves a
//! box inset `margin` pixels from every screen edge.

use delve_world::{TileCoord, Viewport};
use serde::{Deserialize, Serialize};

use crate::physics::{Player, PLAYER_HEIGHT, PLAYER_WIDTH};

/// Camera settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Screen width in pixels.
    pub viewport_width: f32,
    /// Screen height in pixels.
    pub viewport_height: f32,
    /// Dead-zone inset from each screen edge.
    pub margin: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            margin: 200.0,
        }
    }
}

/// Top-left world pixel of the screen plus its size.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Left edge in world pixels.
    pub x: f32,
    /// Top edge in world pixels.
    pub y: f32,
    config: CameraConfig,
}

impl Camera {
    /// Creates a camera at the world origin.
    #[must_use]
    pub const fn new(config: CameraConfig) -> Self {
        Self { x: 0.0, y: 0.0, config }
    }

    /// Creates a camera with the player in the middle of the screen.
    #[must_use]
    pub fn centered_on(player: &Player, config: CameraConfig) -> Self {
        let (cx, cy) = player.center();
        Self {
            x: cx - config.viewport_width / 2.0,
            y: cy - config.viewport_height / 2.0,
            config,
        }
    }

    /// Settings in use.
    #[must_use]
    pub const fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Scrolls just enough to keep the player inside the dead zone.
    pub fn follow(&mut self, player: &Player) {
        let CameraConfig {
            viewport_width: width,
            viewport_height: height,
            margin,
        } = self.config;

        let screen_x = player.x - self.x;
        let screen_y = player.y - self.y;

        if screen_x < margin {
            self.x = player.x - margin;
        } else if screen_x + PLAYER_WIDTH > width - margin {
            self.x = player.x + PLAYER_WIDTH - (width - margin);
        }
        if screen_y < margin {
            self.y = player.y - margin;
        } else if screen_y + PLAYER_HEIGHT > height - margin {
            self.y = player.y + PLAYER_HEIGHT - (height - margin);
        }
    }

    /// The visible world rectangle.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        Viewport::new(
            self.x,
            self.y,
            self.config.viewport_width,
            self.config.viewport_height,
        )
    }

    /// World pixel under a screen pixel.
    #[must_use]
    pub fn screen_to_world(&self, sx: f32, sy: f32) -> (f32, f32) {
        (sx + self.x, sy + self.y)
    }

    /// Tile under a screen pixel.
    #[must_use]
    pub fn screen_to_tile(&self, sx: f32, sy: f32, tile_size: u32) -> TileCoord {
        let (wx, wy) = self.screen_to_world(sx, sy);
        TileCoord::from_pixel(wx, wy, tile_size)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
