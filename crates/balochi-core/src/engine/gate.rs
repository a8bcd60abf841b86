use std::fmt::Debug;
use std::time::Duration;

use tracing::{debug, warn};

use crate::content::AudioRef;
use crate::host::{Host, TimerId};

/// Input latch of one game session.
///
/// Closed while a selection is being resolved or an intro is playing. A
/// selection is only accepted by the call that finds the gate open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionGate {
    open: bool,
}

impl SelectionGate {
    pub fn closed() -> Self {
        Self { open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Close the gate if it is open. Returns whether this call closed it.
    pub fn try_close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[derive(Debug)]
struct Pending<D> {
    timer: TimerId,
    action: D,
}

/// State shared by every round engine: the host, the gate, and the single
/// deferred action slot.
#[derive(Debug)]
pub(crate) struct EngineCore<H, D> {
    host: H,
    gate: SelectionGate,
    pending: Option<Pending<D>>,
}

impl<H: Host, D: Debug> EngineCore<H, D> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            gate: SelectionGate::closed(),
            pending: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn gate(&self) -> SelectionGate {
        self.gate
    }

    /// Check-and-clear the gate for a user selection.
    pub fn try_accept(&mut self) -> bool {
        if self.gate.try_close() {
            return true;
        }
        debug!("Selection ignored, gate closed");
        false
    }

    pub fn open_gate(&mut self) {
        self.gate.open();
    }

    pub fn close_gate(&mut self) {
        self.gate.close();
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Play `audio` and return its reported duration.
    pub fn play(&mut self, audio: &AudioRef) -> Duration {
        self.host.play(audio);
        self.host.last_played_duration()
    }

    /// Play `audio` only while the view has focus. Returns zero when skipped.
    pub fn play_if_focused(&mut self, audio: &AudioRef) -> Duration {
        if self.host.has_focus() {
            self.play(audio)
        } else {
            debug!("Skipped {} without focus", audio);
            Duration::ZERO
        }
    }

    /// Play every cue in order and return the longest duration.
    pub fn play_all<'a>(&mut self, cues: impl IntoIterator<Item = &'a AudioRef>) -> Duration {
        cues.into_iter()
            .map(|audio| self.play(audio))
            .max()
            .unwrap_or_default()
    }

    /// Schedule `action` to run after `delay`, replacing any pending action.
    pub fn defer(&mut self, delay: Duration, action: D) {
        if let Some(old) = self.pending.take() {
            warn!("Replacing pending {:?} with {:?}", old.action, action);
            self.host.cancel(old.timer);
        }
        let timer = self.host.schedule_after(delay);
        debug!("Deferred {:?} by {:?} ({:?})", action, delay, timer);
        self.pending = Some(Pending { timer, action });
    }

    /// Take the pending action if `timer` is the pending timer.
    pub fn fire(&mut self, timer: TimerId) -> Option<D> {
        match self.pending.take() {
            Some(pending) if pending.timer == timer => {
                debug!("Firing {:?}", pending.action);
                Some(pending.action)
            }
            other => {
                debug!("Ignoring stale timer {:?}", timer);
                self.pending = other;
                None
            }
        }
    }

    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("Cancelling pending {:?}", pending.action);
            self.host.cancel(pending.timer);
        }
    }

    pub fn notify_item(&mut self, position: usize) {
        self.host.notify_item_changed(position);
    }

    pub fn notify_all(&mut self) {
        self.host.notify_all_changed();
    }
}
