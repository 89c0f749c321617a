//! Playback subscriber trait

use super::PlaybackFrame;

/// Trait for components that redraw as operations are applied
pub trait PlaybackSubscriber: Send + Sync {
    /// Called after each operation, with no playback lock held
    fn on_frame(&self, frame: &PlaybackFrame);
}
