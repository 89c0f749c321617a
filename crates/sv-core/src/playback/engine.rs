//! Playback controller implementation

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, error, info};

use super::run::{PlaybackRun, RunFlags};
use super::{PlaybackFrame, PlaybackOutcome, PlaybackSubscriber, PAUSE_POLL_INTERVAL};
use crate::error::PlaybackError;
use crate::events::{events, EventBus};
use crate::operation::{Operation, OperationTrace};
use crate::state::{PlaybackMode, Session, SessionId, SessionSnapshot, Speed};
use crate::{generate_isolated, TraceGenerator, Value};

/// Controller state stored internally
struct ControllerState {
    session: Session,
    /// Flags of the run currently allowed to apply operations
    run: Option<Arc<RunFlags>>,
}

/// Outcome of one loop iteration, decided under the state lock
pub(crate) enum RunStep {
    Continue { delay: Duration },
    Finished(PlaybackOutcome),
}

/// Replays operation traces against a single session
///
/// Clones share the same session.
#[derive(Clone)]
pub struct PlaybackController {
    state: Arc<RwLock<ControllerState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn PlaybackSubscriber>>>>,
    events: Arc<EventBus>,
}

impl PlaybackController {
    /// Create a controller around an initial array
    pub fn new(original: Vec<Value>, speed: Speed) -> Self {
        Self::with_event_bus(original, speed, Arc::new(EventBus::new()))
    }

    pub fn with_event_bus(original: Vec<Value>, speed: Speed, events: Arc<EventBus>) -> Self {
        let session = Session::new(original, speed);
        info!("Created session {} with {} elements", session.id(), session.original().len());

        Self {
            state: Arc::new(RwLock::new(ControllerState { session, run: None })),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            events,
        }
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Replace the session with a freshly generated array
    pub fn generate_array(&self, original: Vec<Value>) -> Result<SessionId, PlaybackError> {
        let mut state = self.state.write();
        if state.session.mode().is_active() {
            return Err(PlaybackError::AlreadyActive);
        }

        let len = original.len();
        let speed = state.session.speed();
        state.session = Session::new(original, speed);
        state.run = None;
        let session_id = state.session.id();
        drop(state);

        info!("Created session {} with {} elements", session_id, len);
        self.events.publish(events::SessionCreated { session_id, len });
        Ok(session_id)
    }

    /// Run a generator against the session's original array
    ///
    /// Failures, including panics, move the session to `Failed` without
    /// touching the working array.
    pub fn generate_trace(&self, generator: &dyn TraceGenerator) -> Result<OperationTrace, PlaybackError> {
        let (session_id, input) = {
            let state = self.state.read();
            if state.session.mode().is_active() {
                return Err(PlaybackError::AlreadyActive);
            }
            (state.session.id(), state.session.original().to_vec())
        };

        let result = generate_isolated(generator, &input)
            .and_then(|trace| trace.validate(input.len()).map(|_| trace).map_err(anyhow::Error::from));

        match result {
            Ok(trace) => {
                debug!("{} produced {} operations", generator.name(), trace.len());
                Ok(trace)
            }
            Err(err) => {
                let message = format!("{err:#}");
                error!("{} failed: {}", generator.name(), message);
                {
                    let mut state = self.state.write();
                    if state.session.id() == session_id && !state.session.mode().is_active() {
                        state.session.set_mode(PlaybackMode::Failed);
                        state.run = None;
                    }
                }
                self.events.publish(events::GenerationFailed {
                    session_id,
                    generator: generator.name().to_string(),
                    error: message.clone(),
                });
                Err(PlaybackError::Generation(message))
            }
        }
    }

    /// Begin an auto-play run of `trace` from the original array
    pub fn start(&self, trace: OperationTrace) -> Result<PlaybackRun, PlaybackError> {
        let mut state = self.state.write();
        if state.session.mode().is_active() {
            return Err(PlaybackError::AlreadyActive);
        }
        trace.validate(state.session.original().len())?;

        let trace_len = trace.len();
        state.session.load(trace);
        state.session.set_mode(PlaybackMode::Running);

        let flags = Arc::new(RunFlags::default());
        state.run = Some(flags.clone());
        let session_id = state.session.id();
        drop(state);

        info!("Started playback of {} operations", trace_len);
        self.events.publish(events::PlaybackStarted { session_id, trace_len });
        Ok(PlaybackRun::new(self.clone(), flags))
    }

    /// Generate a trace and start playing it
    pub fn run_generator(&self, generator: &dyn TraceGenerator) -> Result<PlaybackRun, PlaybackError> {
        let trace = self.generate_trace(generator)?;
        self.start(trace)
    }

    pub fn pause(&self) -> Result<(), PlaybackError> {
        let mut state = self.state.write();
        if state.session.mode() != PlaybackMode::Running {
            return Err(PlaybackError::NotRunning);
        }
        if let Some(flags) = &state.run {
            flags.set_paused(true);
        }
        state.session.set_mode(PlaybackMode::Paused);
        let (session_id, cursor) = (state.session.id(), state.session.cursor());
        drop(state);

        debug!("Paused at operation {}", cursor);
        self.events.publish(events::PlaybackPaused { session_id, cursor });
        Ok(())
    }

    pub fn resume(&self) -> Result<(), PlaybackError> {
        let mut state = self.state.write();
        if state.session.mode() != PlaybackMode::Paused {
            return Err(PlaybackError::NotPaused);
        }
        if let Some(flags) = &state.run {
            flags.set_paused(false);
        }
        state.session.set_mode(PlaybackMode::Running);
        let (session_id, cursor) = (state.session.id(), state.session.cursor());
        drop(state);

        debug!("Resumed at operation {}", cursor);
        self.events.publish(events::PlaybackResumed { session_id, cursor });
        Ok(())
    }

    /// Pause a running run or resume a paused one
    pub fn toggle_pause(&self) -> Result<PlaybackMode, PlaybackError> {
        match self.mode() {
            PlaybackMode::Running => self.pause().map(|_| PlaybackMode::Paused),
            PlaybackMode::Paused => self.resume().map(|_| PlaybackMode::Running),
            _ => Err(PlaybackError::NotRunning),
        }
    }

    /// Stop the active run, freezing the cursor and working array
    pub fn cancel(&self) -> Result<(), PlaybackError> {
        let mut state = self.state.write();
        if !state.session.mode().is_active() {
            return Err(PlaybackError::NotRunning);
        }
        if let Some(flags) = state.run.take() {
            flags.cancel();
        }
        state.session.set_mode(PlaybackMode::Cancelled);
        let (session_id, cursor) = (state.session.id(), state.session.cursor());
        drop(state);

        info!("Cancelled playback at operation {}", cursor);
        self.events.publish(events::PlaybackCancelled { session_id, cursor });
        Ok(())
    }

    /// Cancel any active run and roll back to the original array
    pub fn reset(&self) {
        let mut state = self.state.write();
        if let Some(flags) = state.run.take() {
            flags.cancel();
        }
        state.session.reset();
        let session_id = state.session.id();
        drop(state);

        info!("Reset session {}", session_id);
        self.events.publish(events::SessionReset { session_id });
    }

    /// Takes effect at the next inter-operation delay
    pub fn set_speed(&self, speed: Speed) {
        self.state.write().session.set_speed(speed);
    }

    /// Bind `trace` for caller-driven stepping
    pub fn load_for_stepping(&self, trace: OperationTrace) -> Result<(), PlaybackError> {
        let mut state = self.state.write();
        if state.session.mode().is_active() {
            return Err(PlaybackError::AlreadyActive);
        }
        trace.validate(state.session.original().len())?;

        debug!("Loaded {} operations for stepping", trace.len());
        state.session.load(trace);
        state.session.set_mode(PlaybackMode::Idle);
        state.run = None;
        Ok(())
    }

    /// Apply exactly the operation at the cursor
    ///
    /// Returns `None` once the trace is exhausted or the run has ended.
    pub fn advance_one(&self) -> Result<Option<Operation>, PlaybackError> {
        let mut state = self.state.write();
        match state.session.mode() {
            PlaybackMode::Running | PlaybackMode::Paused => return Err(PlaybackError::AutoPlayActive),
            mode if mode.is_terminal() => return Ok(None),
            _ => {}
        }

        let Some(operation) = state.session.apply_next() else {
            return Ok(None);
        };
        let finished = state.session.is_finished();
        if finished {
            state.session.set_mode(PlaybackMode::Completed);
        }
        let frame = Self::frame(&state.session, operation);
        drop(state);

        self.notify_subscribers(&frame);
        if finished {
            self.events.publish(events::PlaybackCompleted {
                session_id: frame.session_id,
                trace_len: frame.trace_len,
            });
        }
        Ok(Some(operation))
    }

    /// One iteration of an auto-play run
    pub(crate) fn apply_for_run(&self, flags: &RunFlags) -> RunStep {
        let mut state = self.state.write();

        // Checked under the lock so nothing applies after cancel() returns
        if flags.is_cancelled() {
            return RunStep::Finished(PlaybackOutcome::Cancelled);
        }
        if flags.is_paused() {
            return RunStep::Continue { delay: PAUSE_POLL_INTERVAL };
        }

        let applied = state.session.apply_next();
        let finished = state.session.is_finished();
        if finished {
            state.session.set_mode(PlaybackMode::Completed);
            state.run = None;
        }
        let frame = applied.map(|op| Self::frame(&state.session, op));
        let delay = state.session.speed().delay();
        let (session_id, trace_len) = (state.session.id(), state.session.trace().len());
        drop(state);

        if let Some(frame) = &frame {
            self.notify_subscribers(frame);
        }

        if finished {
            info!("Playback completed after {} operations", trace_len);
            self.events.publish(events::PlaybackCompleted { session_id, trace_len });
            RunStep::Finished(PlaybackOutcome::Completed)
        } else {
            RunStep::Continue { delay }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.read().session.snapshot()
    }

    pub fn mode(&self) -> PlaybackMode {
        self.state.read().session.mode()
    }

    /// `(cursor, trace length)`
    pub fn progress(&self) -> (usize, usize) {
        self.state.read().session.progress()
    }

    pub fn working(&self) -> Vec<Value> {
        self.state.read().session.working().to_vec()
    }

    pub fn original(&self) -> Vec<Value> {
        self.state.read().session.original().to_vec()
    }

    pub fn session_id(&self) -> SessionId {
        self.state.read().session.id()
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn PlaybackSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    fn frame(session: &Session, operation: Operation) -> PlaybackFrame {
        PlaybackFrame {
            session_id: session.id(),
            operation,
            cursor: session.cursor(),
            trace_len: session.trace().len(),
            mode: session.mode(),
        }
    }

    /// Notify all subscribers of an applied operation
    fn notify_subscribers(&self, frame: &PlaybackFrame) {
        let live: Vec<Arc<dyn PlaybackSubscriber>> = {
            let mut subscribers = self.subscribers.write();

            // Remove any dead weak references
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for subscriber in live {
            subscriber.on_frame(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{OperationKind, TraceRecorder};
    use parking_lot::Mutex;

    /// Swaps adjacent pairs of a two-element input into order
    struct PairSorter;

    impl TraceGenerator for PairSorter {
        fn name(&self) -> &str {
            "Pair Sort"
        }

        fn generate(&self, input: &[Value]) -> anyhow::Result<OperationTrace> {
            let mut recorder = TraceRecorder::new();
            if input.len() == 2 {
                recorder.compare(0, 1);
                if input[0] > input[1] {
                    recorder.swap(0, 1);
                }
            }
            recorder.sorted_all(input.len());
            Ok(recorder.finish())
        }
    }

    struct Failing;

    impl TraceGenerator for Failing {
        fn name(&self) -> &str {
            "Failing"
        }

        fn generate(&self, _input: &[Value]) -> anyhow::Result<OperationTrace> {
            anyhow::bail!("boom")
        }
    }

    struct Panicking;

    impl TraceGenerator for Panicking {
        fn name(&self) -> &str {
            "Panicking"
        }

        fn generate(&self, _input: &[Value]) -> anyhow::Result<OperationTrace> {
            panic!("generator bug")
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: Mutex<Vec<PlaybackFrame>>,
    }

    impl PlaybackSubscriber for Recorder {
        fn on_frame(&self, frame: &PlaybackFrame) {
            self.frames.lock().push(frame.clone());
        }
    }

    fn fast() -> Speed {
        Speed::new(300).unwrap()
    }

    /// Nine operations, long enough to interrupt mid-run
    fn long_trace() -> OperationTrace {
        let mut recorder = TraceRecorder::new();
        for _ in 0..3 {
            recorder.swap(0, 1);
            recorder.swap(1, 2);
        }
        recorder.sorted_all(3);
        recorder.finish()
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_play_completes() {
        let controller = PlaybackController::new(vec![5, 2], fast());
        let run = controller.run_generator(&PairSorter).unwrap();
        assert_eq!(controller.mode(), PlaybackMode::Running);

        assert_eq!(run.drive().await, PlaybackOutcome::Completed);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.working, vec![2, 5]);
        assert_eq!(snapshot.mode, PlaybackMode::Completed);
        assert_eq!((snapshot.cursor, snapshot.trace_len), (4, 4));
        assert!(snapshot.annotations.all_sorted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_trace_completes_immediately() {
        let controller = PlaybackController::new(vec![1, 2], fast());
        let run = controller.start(OperationTrace::default()).unwrap();
        assert_eq!(run.drive().await, PlaybackOutcome::Completed);
        assert_eq!(controller.mode(), PlaybackMode::Completed);
        assert_eq!(controller.working(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_rejected_while_active() {
        let controller = PlaybackController::new(vec![2, 1], fast());
        let _run = controller.start(long_trace_for(2)).unwrap();

        assert!(matches!(controller.start(OperationTrace::default()), Err(PlaybackError::AlreadyActive)));
        controller.pause().unwrap();
        assert!(matches!(controller.start(OperationTrace::default()), Err(PlaybackError::AlreadyActive)));
        assert!(matches!(controller.generate_array(vec![1]), Err(PlaybackError::AlreadyActive)));
    }

    fn long_trace_for(len: usize) -> OperationTrace {
        let mut recorder = TraceRecorder::new();
        for _ in 0..4 {
            recorder.swap(0, 1);
        }
        recorder.sorted_all(len);
        recorder.finish()
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_resume_matches_uninterrupted() {
        let uninterrupted = PlaybackController::new(vec![1, 2, 3], Speed::new(200).unwrap());
        uninterrupted.start(long_trace()).unwrap().drive().await;

        let controller = PlaybackController::new(vec![1, 2, 3], Speed::new(200).unwrap());
        let handle = tokio::spawn(controller.start(long_trace()).unwrap().drive());

        tokio::time::sleep(Duration::from_millis(250)).await;
        controller.pause().unwrap();
        let (paused_at, _) = controller.progress();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(controller.progress().0, paused_at);
        assert_eq!(controller.mode(), PlaybackMode::Paused);

        controller.resume().unwrap();
        assert_eq!(handle.await.unwrap(), PlaybackOutcome::Completed);
        assert_eq!(controller.working(), uninterrupted.working());
        assert_eq!(controller.working(), long_trace().replay(&[1, 2, 3]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_freezes_cursor_and_array() {
        let controller = PlaybackController::new(vec![1, 2, 3], Speed::new(200).unwrap());
        let trace = long_trace();
        let handle = tokio::spawn(controller.start(trace.clone()).unwrap().drive());

        tokio::time::sleep(Duration::from_millis(250)).await;
        controller.cancel().unwrap();
        let (cursor, _) = controller.progress();
        assert!(cursor > 0 && cursor < trace.len());

        assert_eq!(handle.await.unwrap(), PlaybackOutcome::Cancelled);
        assert_eq!(controller.progress().0, cursor);
        assert_eq!(controller.mode(), PlaybackMode::Cancelled);

        let prefix = OperationTrace::from(trace.operations()[..cursor].to_vec());
        assert_eq!(controller.working(), prefix.replay(&[1, 2, 3]));
        assert_eq!(controller.advance_one().unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_while_paused_wakes_run() {
        let controller = PlaybackController::new(vec![1, 2, 3], fast());
        let run = controller.start(long_trace()).unwrap();
        controller.pause().unwrap();
        let handle = tokio::spawn(run.drive());

        tokio::time::sleep(PAUSE_POLL_INTERVAL * 3).await;
        controller.cancel().unwrap();

        assert_eq!(handle.await.unwrap(), PlaybackOutcome::Cancelled);
        assert_eq!(controller.progress().0, 0);
        assert_eq!(controller.working(), vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_rolls_back_and_allows_restart() {
        let controller = PlaybackController::new(vec![1, 2, 3], Speed::new(200).unwrap());
        let stale = tokio::spawn(controller.start(long_trace()).unwrap().drive());
        tokio::time::sleep(Duration::from_millis(250)).await;

        controller.reset();
        assert_eq!(controller.mode(), PlaybackMode::Idle);
        assert_eq!(controller.working(), vec![1, 2, 3]);
        assert_eq!(controller.progress(), (0, 0));

        let fresh = controller.start(long_trace()).unwrap();
        assert_eq!(stale.await.unwrap(), PlaybackOutcome::Cancelled);
        assert_eq!(fresh.drive().await, PlaybackOutcome::Completed);
        assert_eq!(controller.working(), long_trace().replay(&[1, 2, 3]));
    }

    #[test]
    fn test_step_mode_applies_one_at_a_time() {
        let controller = PlaybackController::new(vec![5, 2], fast());
        let recorder = Arc::new(Recorder::default());
        controller.add_subscriber(recorder.clone());

        let trace = controller.generate_trace(&PairSorter).unwrap();
        controller.load_for_stepping(trace).unwrap();

        assert_eq!(controller.advance_one().unwrap(), Some(Operation::compare(0, 1)));
        assert_eq!(controller.working(), vec![5, 2]);
        assert_eq!(controller.advance_one().unwrap(), Some(Operation::swap(0, 1)));
        assert_eq!(controller.working(), vec![2, 5]);
        assert_eq!(controller.mode(), PlaybackMode::Idle);

        while controller.advance_one().unwrap().is_some() {}
        assert_eq!(controller.mode(), PlaybackMode::Completed);
        assert_eq!(controller.progress(), (4, 4));

        let frames = recorder.frames.lock();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[3].operation.kind, OperationKind::Sorted);
        assert_eq!(frames[3].mode, PlaybackMode::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_step_rejected_during_auto_play() {
        let controller = PlaybackController::new(vec![2, 1], fast());
        let _run = controller.start(long_trace_for(2)).unwrap();
        assert!(matches!(controller.advance_one(), Err(PlaybackError::AutoPlayActive)));
    }

    #[test]
    fn test_generator_failure_marks_failed() {
        let controller = PlaybackController::new(vec![3, 1, 2], fast());
        let failures = Arc::new(Mutex::new(Vec::new()));
        let seen = failures.clone();
        controller.events().subscribe(move |failed: &events::GenerationFailed| {
            seen.lock().push(failed.error.clone());
        });

        assert!(matches!(controller.generate_trace(&Failing), Err(PlaybackError::Generation(_))));
        assert_eq!(controller.mode(), PlaybackMode::Failed);
        assert_eq!(controller.working(), vec![3, 1, 2]);

        assert!(matches!(controller.run_generator(&Panicking), Err(PlaybackError::Generation(_))));
        assert_eq!(controller.working(), vec![3, 1, 2]);
        assert_eq!(failures.lock().len(), 2);

        // Failed is terminal for that run only
        assert!(controller.start(OperationTrace::default()).is_ok());
    }

    #[test]
    fn test_start_rejects_out_of_bounds_trace() {
        let controller = PlaybackController::new(vec![1, 2], fast());
        let trace = OperationTrace::from(vec![Operation::swap(0, 2)]);
        assert!(matches!(controller.start(trace), Err(PlaybackError::InvalidTrace(_))));
        assert_eq!(controller.mode(), PlaybackMode::Idle);
    }

    #[test]
    fn test_completion_listener_can_reset_controller() {
        let controller = PlaybackController::new(vec![2, 1], fast());
        let resets = Arc::new(Mutex::new(Vec::new()));

        let inner = controller.clone();
        controller.events().subscribe(move |_: &events::PlaybackCompleted| inner.reset());
        let seen = resets.clone();
        controller.events().subscribe(move |reset: &events::SessionReset| {
            seen.lock().push(reset.session_id);
        });

        controller.load_for_stepping(OperationTrace::from(vec![Operation::swap(0, 1)])).unwrap();
        let worker = {
            let controller = controller.clone();
            std::thread::spawn(move || controller.advance_one())
        };
        let deadline = std::time::Instant::now() + Duration::from_secs(3);
        while !worker.is_finished() && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(worker.is_finished(), "advance_one blocked inside a completion listener");

        assert_eq!(worker.join().unwrap().unwrap(), Some(Operation::swap(0, 1)));
        assert_eq!(controller.mode(), PlaybackMode::Idle);
        assert_eq!(controller.working(), vec![2, 1]);
        assert_eq!(*resets.lock(), vec![controller.session_id()]);
    }

    #[test]
    fn test_paused_run_applies_nothing() {
        let controller = PlaybackController::new(vec![1, 2, 3], fast());
        let run = controller.start(long_trace()).unwrap();
        controller.pause().unwrap();

        assert!(matches!(
            controller.apply_for_run(&run.flags),
            RunStep::Continue { delay } if delay == PAUSE_POLL_INTERVAL
        ));
        assert_eq!(controller.progress().0, 0);

        controller.resume().unwrap();
        assert!(matches!(controller.apply_for_run(&run.flags), RunStep::Continue { .. }));
        assert_eq!(controller.progress().0, 1);
    }

    #[test]
    fn test_pause_requires_running() {
        let controller = PlaybackController::new(vec![1], fast());
        assert!(matches!(controller.pause(), Err(PlaybackError::NotRunning)));
        assert!(matches!(controller.resume(), Err(PlaybackError::NotPaused)));
        assert!(matches!(controller.cancel(), Err(PlaybackError::NotRunning)));
        assert!(controller.toggle_pause().is_err());
    }
}
