//! Host collaborator abstraction.
//!
//! Round engines never render, decode audio or own a clock. Everything they
//! need from the surrounding application goes through the three traits in this
//! module, which lets tests drive the engines with a virtual clock.

mod mock;

use std::time::Duration;

use crate::content::AudioRef;

#[doc(hidden)]
pub use mock::{MockHost, ViewEvent, fire_next, settle};

/// Handle of a scheduled callback, issued by a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Audio playback.
pub trait AudioService {
    /// Start playing `audio`. Must not block.
    fn play(&mut self, audio: &AudioRef);

    /// Duration of the clip most recently started by [`play`](Self::play).
    fn last_played_duration(&self) -> Duration;
}

/// Invalidation hints for whatever renders the active items.
pub trait ViewAdapter {
    fn notify_item_changed(&mut self, position: usize);

    fn notify_all_changed(&mut self);

    /// Whether the game window is in the foreground. Celebration and
    /// feedback cues are skipped while it is not.
    fn has_focus(&self) -> bool {
        true
    }
}

/// One-shot timers.
///
/// When a timer elapses the host calls the owning engine's `on_timer` with
/// the id returned here.
pub trait Scheduler {
    fn schedule_after(&mut self, delay: Duration) -> TimerId;

    fn cancel(&mut self, timer: TimerId);
}

/// Everything a round engine needs from its environment.
pub trait Host: AudioService + ViewAdapter + Scheduler {}

impl<T: AudioService + ViewAdapter + Scheduler> Host for T {}
