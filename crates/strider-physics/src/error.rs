//! Error types for physics world configuration and body construction.

use thiserror::Error;

/// Errors from validating [`WorldSettings`](crate::WorldSettings) at world
/// construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Solver iteration count must be at least 1.
    #[error("solver iterations must be at least 1, got {0}")]
    InvalidIterations(u32),

    /// Solver tolerance must be a positive finite number.
    #[error("solver tolerance must be positive, got {0}")]
    InvalidTolerance(f32),

    /// Timestep frequency must be at least 1 Hz.
    #[error("timestep frequency must be at least 1 Hz, got {0}")]
    InvalidTimestep(u32),
}

/// Errors from constructing character collision shapes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// Capsule radius must be strictly positive.
    #[error("capsule radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    /// Capsule cylinder height must be strictly positive.
    #[error("capsule cylinder height must be positive, got {0}")]
    NonPositiveHeight(f32),
}
