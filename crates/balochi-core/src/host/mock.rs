//! Virtual-clock host for tests and simulations
//!
//! Records every played cue and view notification, and keeps scheduled
//! timers in a queue that only advances when asked to. No real time passes.

use std::collections::HashMap;
use std::time::Duration;

use crate::content::{AudioRef, ContentPack};
use crate::engine::Session;
use crate::host::{AudioService, Scheduler, TimerId, ViewAdapter};

/// Upper bound on timers fired by a single [`settle`] call.
const SETTLE_LIMIT: usize = 10_000;

/// View notification recorded by [`MockHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    ItemChanged(usize),
    AllChanged,
}

/// Host with a virtual clock
#[derive(Debug, Clone)]
pub struct MockHost {
    now: Duration,
    next_id: u64,
    timers: Vec<(Duration, TimerId)>,
    durations: HashMap<AudioRef, Duration>,
    default_duration: Duration,
    last_duration: Duration,
    played: Vec<AudioRef>,
    events: Vec<ViewEvent>,
    focused: bool,
}

impl MockHost {
    /// Create a focused host where every clip lasts one second
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            timers: Vec::new(),
            durations: HashMap::new(),
            default_duration: Duration::from_secs(1),
            last_duration: Duration::ZERO,
            played: Vec::new(),
            events: Vec::new(),
            focused: true,
        }
    }

    /// Create a host that reports the clip durations listed in `pack`
    pub fn from_pack(pack: &ContentPack) -> Self {
        let mut host = Self::new();
        for (audio, &ms) in &pack.durations {
            host.durations.insert(audio.clone(), Duration::from_millis(ms));
        }
        host
    }

    /// Set the duration reported for one clip
    pub fn with_duration(mut self, audio: impl Into<AudioRef>, ms: u64) -> Self {
        self.durations.insert(audio.into(), Duration::from_millis(ms));
        self
    }

    /// Set the duration reported for clips without an explicit entry
    pub fn with_default_duration(mut self, ms: u64) -> Self {
        self.default_duration = Duration::from_millis(ms);
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn played(&self) -> &[AudioRef] {
        &self.played
    }

    /// Played clips as plain names, in order
    pub fn played_names(&self) -> Vec<&str> {
        self.played.iter().map(AudioRef::as_str).collect()
    }

    /// How many times `name` has been played
    pub fn play_count(&self, name: &str) -> usize {
        self.played.iter().filter(|a| a.as_str() == name).count()
    }

    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Forget recorded plays and view events
    pub fn clear_log(&mut self) {
        self.played.clear();
        self.events.clear();
    }

    /// Number of scheduled timers that have neither fired nor been cancelled
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|&(at, _)| at).min()
    }

    /// Pop the earliest pending timer and advance the clock to its deadline
    pub fn next_due(&mut self) -> Option<TimerId> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, (at, id))| (*at, *id))
            .map(|(i, _)| i)?;
        let (at, id) = self.timers.remove(index);
        self.now = self.now.max(at);
        Some(id)
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioService for MockHost {
    fn play(&mut self, audio: &AudioRef) {
        self.last_duration = self
            .durations
            .get(audio)
            .copied()
            .unwrap_or(self.default_duration);
        self.played.push(audio.clone());
    }

    fn last_played_duration(&self) -> Duration {
        self.last_duration
    }
}

impl ViewAdapter for MockHost {
    fn notify_item_changed(&mut self, position: usize) {
        self.events.push(ViewEvent::ItemChanged(position));
    }

    fn notify_all_changed(&mut self) {
        self.events.push(ViewEvent::AllChanged);
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}

impl Scheduler for MockHost {
    fn schedule_after(&mut self, delay: Duration) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;
        self.timers.push((self.now + delay, id));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.retain(|&(_, id)| id != timer);
    }
}

/// Fire the earliest pending timer of `session`, if any.
pub fn fire_next<S: Session<Host = MockHost>>(session: &mut S) -> bool {
    match session.host_mut().next_due() {
        Some(timer) => {
            session.on_timer(timer);
            true
        }
        None => false,
    }
}

/// Fire timers until none are pending, i.e. until the session waits for input.
pub fn settle<S: Session<Host = MockHost>>(session: &mut S) {
    for _ in 0..SETTLE_LIMIT {
        if !fire_next(session) {
            return;
        }
    }
    tracing::warn!("session did not settle after {} timers", SETTLE_LIMIT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations() {
        let mut host = MockHost::new()
            .with_default_duration(250)
            .with_duration("colors_red", 1200);

        host.play(&AudioRef::from("colors_red"));
        assert_eq!(host.last_played_duration(), Duration::from_millis(1200));
        host.play(&AudioRef::from("colors_blue"));
        assert_eq!(host.last_played_duration(), Duration::from_millis(250));
        assert_eq!(host.played_names(), ["colors_red", "colors_blue"]);
    }

    #[test]
    fn test_from_pack_durations() {
        let mut host = MockHost::from_pack(&ContentPack::builtin().unwrap());
        host.play(&AudioRef::from("celebration_long"));
        assert_eq!(host.last_played_duration(), Duration::from_millis(4200));
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let mut host = MockHost::new();
        let late = host.schedule_after(Duration::from_millis(900));
        let early = host.schedule_after(Duration::from_millis(100));
        assert_eq!(host.pending_timers(), 2);
        assert_eq!(host.next_deadline(), Some(Duration::from_millis(100)));

        assert_eq!(host.next_due(), Some(early));
        assert_eq!(host.now(), Duration::from_millis(100));
        assert_eq!(host.next_due(), Some(late));
        assert_eq!(host.now(), Duration::from_millis(900));
        assert_eq!(host.next_due(), None);
    }

    #[test]
    fn test_cancel_removes_timer() {
        let mut host = MockHost::new();
        let timer = host.schedule_after(Duration::from_millis(10));
        host.cancel(timer);
        assert_eq!(host.pending_timers(), 0);
        assert_eq!(host.next_due(), None);
        assert_eq!(host.now(), Duration::ZERO);
    }

    #[test]
    fn test_view_events_and_focus() {
        let mut host = MockHost::new();
        assert!(host.has_focus());
        host.notify_item_changed(3);
        host.notify_all_changed();
        assert_eq!(host.events(), [ViewEvent::ItemChanged(3), ViewEvent::AllChanged]);

        host.set_focus(false);
        assert!(!host.has_focus());
        host.clear_log();
        assert!(host.events().is_empty());
    }
}
