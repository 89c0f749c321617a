use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::operation::{Operation, OperationTrace};
use crate::projection::{self, AnnotationMap};
use crate::Value;

/// Session identifier type
pub type SessionId = uuid::Uuid;

/// Lifecycle of a single visualization run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackMode {
    #[default]
    Idle,
    Running,
    Paused,
    Cancelled,
    Completed,
    /// Trace generation failed; the working array was left untouched
    Failed,
}

impl PlaybackMode {
    /// Running or paused
    pub fn is_active(self) -> bool {
        matches!(self, PlaybackMode::Running | PlaybackMode::Paused)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PlaybackMode::Cancelled | PlaybackMode::Completed | PlaybackMode::Failed)
    }
}

/// Playback speed in `[1, 300]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Speed(u16);

impl Speed {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 300;

    pub fn new(speed: u32) -> Result<Self, ConfigError> {
        if (Self::MIN as u32..=Self::MAX as u32).contains(&speed) {
            Ok(Self(speed as u16))
        } else {
            Err(ConfigError::Speed(speed))
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Inter-operation delay, `301 - speed` milliseconds
    pub fn delay(self) -> Duration {
        Duration::from_millis(u64::from(Self::MAX + 1 - self.0))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(100)
    }
}

impl TryFrom<u32> for Speed {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Speed> for u32 {
    fn from(speed: Speed) -> Self {
        u32::from(speed.0)
    }
}

/// The mutable context bound to one visualization run
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    original: Vec<Value>,
    working: Vec<Value>,
    trace: OperationTrace,
    cursor: usize,
    annotations: AnnotationMap,
    mode: PlaybackMode,
    speed: Speed,
}

impl Session {
    /// Create a session around a freshly generated array
    pub fn new(original: Vec<Value>, speed: Speed) -> Self {
        Self {
            id: SessionId::new_v4(),
            working: original.clone(),
            annotations: AnnotationMap::new(original.len()),
            original,
            trace: OperationTrace::default(),
            cursor: 0,
            mode: PlaybackMode::Idle,
            speed,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn original(&self) -> &[Value] {
        &self.original
    }

    pub fn working(&self) -> &[Value] {
        &self.working
    }

    pub fn trace(&self) -> &OperationTrace {
        &self.trace
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn annotations(&self) -> &AnnotationMap {
        &self.annotations
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub(crate) fn set_mode(&mut self, mode: PlaybackMode) {
        self.mode = mode;
    }

    /// `(cursor, trace length)`
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.trace.len())
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.trace.len()
    }

    /// Bind a trace for a fresh run from the original array
    pub(crate) fn load(&mut self, trace: OperationTrace) {
        self.working.clone_from(&self.original);
        self.annotations.clear();
        self.trace = trace;
        self.cursor = 0;
    }

    /// Roll back to the original array in the idle state
    pub(crate) fn reset(&mut self) {
        self.load(OperationTrace::default());
        self.mode = PlaybackMode::Idle;
    }

    /// Apply the operation at the cursor and advance past it
    pub(crate) fn apply_next(&mut self) -> Option<Operation> {
        let op = *self.trace.get(self.cursor)?;
        self.annotations = projection::apply(&op, &self.annotations, &mut self.working);
        self.cursor += 1;
        Some(op)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            working: self.working.clone(),
            annotations: self.annotations.clone(),
            cursor: self.cursor,
            trace_len: self.trace.len(),
            mode: self.mode,
            speed: self.speed,
        }
    }
}

/// Everything the rendering layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub working: Vec<Value>,
    pub annotations: AnnotationMap,
    pub cursor: usize,
    pub trace_len: usize,
    pub mode: PlaybackMode,
    pub speed: Speed,
}
