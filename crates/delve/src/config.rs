//! # Game Configuration
//!
//! One TOML file, one section per concern. Every section and every field is
//! optional; missing values take the stock defaults.
//!
//! ```toml
//! [world]
//! ground_level = 10
//!
//! [world.generation]
//! seed = 42
//!
//! [physics]
//! gravity = 0.5
//!
//! [camera]
//! margin = 200.0
//!
//! [log]
//! level = "debug"
//! ```

use std::path::Path;

use delve_world::{WorldConfig, WorldError};
use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::error::{GameError, GameResult};
use crate::logging::LogConfig;
use crate::physics::PhysicsConfig;

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Terrain and generation.
    pub world: WorldConfig,
    /// Player movement.
    pub physics: PhysicsConfig,
    /// Follow camera.
    pub camera: CameraConfig,
    /// Logging.
    pub log: LogConfig,
}

impl GameConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ConfigParse`] for malformed TOML and
    /// [`GameError::World`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> GameResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Io`] if the file cannot be read, otherwise as
    /// [`GameConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::World`] naming the first bad value.
    pub fn validate(&self) -> GameResult<()> {
        self.world.validate()?;

        let physics = &self.physics;
        let speeds = [
            ("physics.move_speed", physics.move_speed),
            ("physics.fly_speed", physics.fly_speed),
            ("physics.gravity", physics.gravity),
            ("physics.jump_velocity", physics.jump_velocity),
            ("physics.swim_impulse", physics.swim_impulse),
            ("physics.buoyant_gravity", physics.buoyant_gravity),
            ("physics.max_sink_speed", physics.max_sink_speed),
        ];
        for (name, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be a non-negative number")));
            }
        }
        if !(physics.terminal_velocity.is_finite() && physics.terminal_velocity > 0.0) {
            return Err(invalid("physics.terminal_velocity must be positive"));
        }

        let camera = &self.camera;
        if camera.viewport_width <= 0.0 || camera.viewport_height <= 0.0 {
            return Err(invalid("camera viewport must have a positive size"));
        }
        if camera.margin < 0.0
            || camera.margin * 2.0 > camera.viewport_width
            || camera.margin * 2.0 > camera.viewport_height
        {
            return Err(invalid("camera.margin must fit twice inside the viewport"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> GameError {
    GameError::World(WorldError::InvalidConfig(message.into()))
}
