// error.rs - Error types for the grid store and life engine

use thiserror::Error;

/// Errors raised by [`GridStore`](crate::GridStore) and [`LifeEngine`](crate::LifeEngine).
#[derive(Debug, Error)]
pub enum LifeError {
    /// Construction or resize with a zero width or height.
    #[error("invalid grid dimension {width}x{height}: both must be positive")]
    InvalidDimension { width: usize, height: usize },

    /// Read, write or toggle outside the current grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Alive probability outside `[0, 1]`.
    #[error("alive probability {0} is not within [0, 1]")]
    InvalidProbability(f64),

    /// A configuration value that cannot drive the engine.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// The row-task runtime could not be started.
    #[error("failed to start row-task runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type Result<T, E = LifeError> = std::result::Result<T, E>;
