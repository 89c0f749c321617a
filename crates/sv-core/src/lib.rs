//! Core functionality for the sorting visualizer
//!
//! This crate provides the operation trace model, the state projection that
//! turns trace position into display state, and the playback controller that
//! replays traces under user control.

pub mod error;
pub mod events;
pub mod operation;
pub mod playback;
pub mod projection;
pub mod state;

use std::panic::{self, AssertUnwindSafe};

// Re-export commonly used types
pub use error::{ConfigError, PlaybackError, TraceError};
pub use operation::{Indices, Operation, OperationKind, OperationTrace, TraceRecorder};
pub use playback::{
    PlaybackController, PlaybackFrame, PlaybackOutcome, PlaybackRun, PlaybackSubscriber,
};
pub use projection::{Annotation, AnnotationMap};
pub use state::{PlaybackMode, Session, SessionId, SessionSnapshot, Speed};

/// Element type of the arrays being sorted
pub type Value = u32;

/// Trait for instrumented algorithms that turn an input into a trace
pub trait TraceGenerator: Send + Sync {
    /// Display name used in logs and reports
    fn name(&self) -> &str;

    /// Produce the operation trace for `input`
    ///
    /// Implementations work on a private copy and never mutate `input`.
    fn generate(&self, input: &[Value]) -> anyhow::Result<OperationTrace>;
}

/// Run a generator, turning a panic into an error
pub fn generate_isolated(generator: &dyn TraceGenerator, input: &[Value]) -> anyhow::Result<OperationTrace> {
    match panic::catch_unwind(AssertUnwindSafe(|| generator.generate(input))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(anyhow::anyhow!("{} panicked: {}", generator.name(), message))
        }
    }
}
