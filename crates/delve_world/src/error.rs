//! # World Error Types
//!
//! The simulation itself never fails: any `i32` coordinate pair is valid and
//! every pass runs to completion. Errors only arise at the edges, when a
//! caller names a tile kind that does not exist or hands over a config that
//! cannot describe a world.

use thiserror::Error;

/// Errors that can occur while building or addressing a world.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// A tile kind name did not match any known kind.
    #[error("unknown tile kind: {0:?}")]
    UnknownTileKind(String),

    /// A world or generation config value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
