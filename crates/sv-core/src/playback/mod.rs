use std::time::Duration;

use serde::{Deserialize, Serialize};

mod engine;
mod run;
mod subscriber;

pub use engine::PlaybackController;
pub use run::PlaybackRun;
pub use subscriber::PlaybackSubscriber;

use crate::operation::Operation;
use crate::state::{PlaybackMode, SessionId};

/// How often a paused run re-checks its flags
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Final state of an auto-play run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackOutcome {
    Completed,
    Cancelled,
}

/// Passed to subscribers after every applied operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackFrame {
    pub session_id: SessionId,
    pub operation: Operation,
    /// Cursor after the operation was applied
    pub cursor: usize,
    pub trace_len: usize,
    pub mode: PlaybackMode,
}
