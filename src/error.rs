use thiserror::Error;

/// Errors raised where untrusted input enters the simulation.
///
/// The solver itself never fails; these only guard configuration, body
/// insertion and frame timing.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid body radius {0}: must be finite and not negative")]
    InvalidRadius(f32),

    #[error("body of radius {radius} does not fit in an arena of radius {arena_radius}")]
    BodyDoesNotFit { radius: f32, arena_radius: f32 },

    #[error("cluster size {0} is outside 1..={max}", max = crate::config::MAX_CLUSTER_SIZE)]
    InvalidClusterSize(u32),

    #[error("sub-step count must be at least 1")]
    ZeroSubSteps,

    #[error("invalid arena radius {0}: must be finite and positive")]
    InvalidArena(f32),

    #[error("invalid frame time {0}: must be finite and not negative")]
    InvalidTimestep(f32),

    #[error("non-finite value for {0}")]
    NonFinite(&'static str),

    #[error("failed to parse simulation config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
