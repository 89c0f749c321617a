//! Auto-play run: the cooperative replay loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::engine::RunStep;
use super::{PlaybackController, PlaybackOutcome, PAUSE_POLL_INTERVAL};

/// Pause and cancel flags owned by exactly one run
#[derive(Debug, Default)]
pub(crate) struct RunFlags {
    paused: AtomicBool,
    cancelled: AtomicBool,
}

impl RunFlags {
    pub(crate) fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub(crate) fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// Handle to a started run; `drive` replays its trace
#[must_use = "a run does nothing until driven"]
pub struct PlaybackRun {
    controller: PlaybackController,
    pub(crate) flags: Arc<RunFlags>,
}

impl PlaybackRun {
    pub(crate) fn new(controller: PlaybackController, flags: Arc<RunFlags>) -> Self {
        Self { controller, flags }
    }

    /// Apply operations in trace order until the trace ends or the run is cancelled
    ///
    /// Cancellation is observed before each operation and on waking from a
    /// pause wait.
    pub async fn drive(self) -> PlaybackOutcome {
        loop {
            if self.flags.is_cancelled() {
                return self.cancelled();
            }

            while self.flags.is_paused() && !self.flags.is_cancelled() {
                tokio::time::sleep(PAUSE_POLL_INTERVAL).await;
            }

            if self.flags.is_cancelled() {
                return self.cancelled();
            }

            match self.controller.apply_for_run(&self.flags) {
                RunStep::Continue { delay } => tokio::time::sleep(delay).await,
                RunStep::Finished(outcome) => return outcome,
            }
        }
    }

    fn cancelled(&self) -> PlaybackOutcome {
        debug!("Run observed cancellation");
        PlaybackOutcome::Cancelled
    }
}
