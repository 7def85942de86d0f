//! # Game Error Types
//!
//! Everything that can go wrong outside the simulation: reading the config
//! file, parsing it, and the world-level checks it feeds into.

use std::path::PathBuf;

use delve_world::WorldError;
use thiserror::Error;

/// Errors raised while setting up a game.
#[derive(Error, Debug)]
pub enum GameError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for a game config.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A world-level check failed.
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Result type for game setup.
pub type GameResult<T> = Result<T, GameError>;
