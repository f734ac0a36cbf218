//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// Every check that can produce one of these runs before the agent touches
/// its weights, traces or pending transition.
#[derive(Error, Debug)]
pub enum Error {
    /// The agent has no hyperparameters yet.
    #[error("agent is not configured, call configure before starting an episode")]
    NotConfigured,

    /// Hyperparameters are fixed once set.
    #[error("agent is already configured")]
    AlreadyConfigured,

    /// `step` or `end` was called without a preceding `start`.
    #[error("no episode in progress, call start before step or end")]
    EpisodeNotStarted,

    /// A hyperparameter is outside its valid range.
    #[error("invalid hyperparameter {name} = {value}: {reason}")]
    InvalidHyperparameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A tile index does not fit in the weight table.
    #[error("tile index {index} out of range for table of size {size}")]
    TileOutOfRange { index: usize, size: usize },

    /// The state does not have the number of dimensions the coder expects.
    #[error("state has {got} dimensions, expected {expected}")]
    StateDimension { expected: usize, got: usize },

    /// A state component is NaN or infinite.
    #[error("state component {index} is not finite: {value}")]
    InvalidState { index: usize, value: f64 },

    /// Rewards must be finite.
    #[error("reward must be finite, got {0}")]
    InvalidReward(f64),

    /// The tile coder configuration is unusable.
    #[error("invalid tile coder: {0}")]
    InvalidTileCoder(String),

    /// A weight table with the wrong shape was supplied.
    #[error("weight table has shape {got:?}, expected {expected:?}")]
    WeightShape {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// The environment must be reset before it accepts actions.
    #[error("environment is not ready to receive actions")]
    EnvNotReady,

    #[error("plotting failed: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, Error>;
