//! Error types for traces, configuration and playback

use thiserror::Error;

use crate::operation::OperationKind;

/// A malformed operation or one that does not fit the array
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("operation must target 1 or 2 indices, got {0}")]
    IndexCount(usize),

    #[error("overwrite operation carries no value")]
    MissingValue,

    #[error("{0:?} operation must not carry a value")]
    UnexpectedValue(OperationKind),
}

/// Out-of-range or unreadable configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("speed {0} outside of [1, 300]")]
    Speed(u32),

    #[error("array size {0} outside of [10, 100]")]
    Size(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Rejected playback requests and failed runs
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("a run is already active")]
    AlreadyActive,

    #[error("no run is active")]
    NotRunning,

    #[error("playback is not paused")]
    NotPaused,

    #[error("step mode is unavailable while auto-play is active")]
    AutoPlayActive,

    #[error("trace generation failed: {0}")]
    Generation(String),

    #[error("invalid trace: {0}")]
    InvalidTrace(#[from] TraceError),
}
