//! Typed lifecycle notifications for sessions and playback runs

use std::any::{Any, TypeId};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

/// Marker for values that can travel over an [`EventBus`]
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

type Listener = Arc<dyn Fn(&dyn Event) + Send + Sync>;

/// Fans lifecycle events out to listeners registered per event type
///
/// Listeners run after the registry lock is released, so a listener may
/// publish again or call back into the controller that raised the event.
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<AHashMap<TypeId, Vec<Listener>>>,
}

/// Session and playback lifecycle events
pub mod events {
    use super::Event;
    use crate::state::SessionId;

    /// A new array replaced the session
    #[derive(Debug, Clone)]
    pub struct SessionCreated {
        pub session_id: SessionId,
        pub len: usize,
    }

    /// An auto-play run started
    #[derive(Debug, Clone)]
    pub struct PlaybackStarted {
        pub session_id: SessionId,
        pub trace_len: usize,
    }

    #[derive(Debug, Clone)]
    pub struct PlaybackPaused {
        pub session_id: SessionId,
        pub cursor: usize,
    }

    #[derive(Debug, Clone)]
    pub struct PlaybackResumed {
        pub session_id: SessionId,
        pub cursor: usize,
    }

    /// The last operation of the trace was applied
    #[derive(Debug, Clone)]
    pub struct PlaybackCompleted {
        pub session_id: SessionId,
        pub trace_len: usize,
    }

    /// The run was cancelled with the cursor frozen here
    #[derive(Debug, Clone)]
    pub struct PlaybackCancelled {
        pub session_id: SessionId,
        pub cursor: usize,
    }

    /// The session was rolled back to its original array
    #[derive(Debug, Clone)]
    pub struct SessionReset {
        pub session_id: SessionId,
    }

    /// A trace generator failed
    #[derive(Debug, Clone)]
    pub struct GenerationFailed {
        pub session_id: SessionId,
        pub generator: String,
        pub error: String,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        SessionCreated,
        PlaybackStarted,
        PlaybackPaused,
        PlaybackResumed,
        PlaybackCompleted,
        PlaybackCancelled,
        SessionReset,
        GenerationFailed
    );
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for every published `E`
    pub fn subscribe<E, F>(&self, listener: F)
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let erased: Listener = Arc::new(move |event: &dyn Event| {
            if let Some(event) = event.as_any().downcast_ref::<E>() {
                listener(event);
            }
        });
        self.listeners.write().entry(TypeId::of::<E>()).or_default().push(erased);
    }

    /// Number of listeners registered for `E`
    pub fn listener_count<E: Event>(&self) -> usize {
        self.listeners.read().get(&TypeId::of::<E>()).map_or(0, Vec::len)
    }

    pub fn publish<E: Event>(&self, event: E) {
        let listeners = self.listeners.read().get(&TypeId::of::<E>()).cloned();
        let Some(listeners) = listeners else {
            return;
        };

        for listener in listeners {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_publish_reaches_matching_listeners_only() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        bus.subscribe(move |_: &events::SessionReset| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(events::SessionReset { session_id: uuid::Uuid::nil() });
        bus.publish(events::PlaybackPaused { session_id: uuid::Uuid::nil(), cursor: 3 });

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count::<events::SessionReset>(), 1);
        assert_eq!(bus.listener_count::<events::PlaybackPaused>(), 0);
    }

    #[test]
    fn test_listener_can_publish_and_subscribe() {
        let bus = Arc::new(EventBus::new());
        let resets = Arc::new(AtomicUsize::new(0));

        let chained = Arc::downgrade(&bus);
        bus.subscribe(move |paused: &events::PlaybackPaused| {
            if let Some(bus) = chained.upgrade() {
                bus.subscribe(|_: &events::PlaybackResumed| {});
                bus.publish(events::SessionReset { session_id: paused.session_id });
            }
        });
        let counter = resets.clone();
        bus.subscribe(move |_: &events::SessionReset| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(events::PlaybackPaused { session_id: uuid::Uuid::nil(), cursor: 0 });

        assert_eq!(resets.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count::<events::PlaybackResumed>(), 1);
    }
}
