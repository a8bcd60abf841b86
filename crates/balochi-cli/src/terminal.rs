//! Real-time host for interactive sessions.

use std::collections::{HashMap, VecDeque};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use balochi_core::{AudioRef, AudioService, ContentPack, Scheduler, TimerId, ViewAdapter};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

const DEFAULT_CLIP: Duration = Duration::from_millis(1000);
const CUE_HISTORY: usize = 4;

/// Host that "plays" audio by listing the cue and schedules timers on the
/// wall clock.
pub struct TerminalHost {
    durations: HashMap<AudioRef, Duration>,
    last_duration: Duration,
    timers: Vec<(Instant, TimerId)>,
    next_id: u64,
    dirty: bool,
    cues: VecDeque<(AudioRef, Duration)>,
}

impl TerminalHost {
    pub fn from_pack(pack: &ContentPack) -> Self {
        Self {
            durations: pack
                .durations
                .iter()
                .map(|(audio, &ms)| (audio.clone(), Duration::from_millis(ms)))
                .collect(),
            last_duration: Duration::ZERO,
            timers: Vec::new(),
            next_id: 1,
            dirty: true,
            cues: VecDeque::with_capacity(CUE_HISTORY),
        }
    }

    /// Most recent cues, oldest first.
    pub fn recent_cues(&self) -> impl Iterator<Item = &(AudioRef, Duration)> {
        self.cues.iter()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|&(at, _)| at).min()
    }

    /// Pop one timer whose deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<TimerId> {
        let index = self.timers.iter().position(|&(at, _)| at <= now)?;
        Some(self.timers.swap_remove(index).1)
    }

    /// Whether the view needs a redraw. Clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl AudioService for TerminalHost {
    fn play(&mut self, audio: &AudioRef) {
        let duration = self.durations.get(audio).copied().unwrap_or(DEFAULT_CLIP);
        self.last_duration = duration;
        if self.cues.len() == CUE_HISTORY {
            self.cues.pop_front();
        }
        self.cues.push_back((audio.clone(), duration));
        self.dirty = true;
    }

    fn last_played_duration(&self) -> Duration {
        self.last_duration
    }
}

impl ViewAdapter for TerminalHost {
    fn notify_item_changed(&mut self, _position: usize) {
        self.dirty = true;
    }

    fn notify_all_changed(&mut self) {
        self.dirty = true;
    }
}

impl Scheduler for TerminalHost {
    fn schedule_after(&mut self, delay: Duration) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;
        self.timers.push((Instant::now() + delay, id));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.retain(|&(_, id)| id != timer);
    }
}

/// Raw mode on an alternate screen, restored on drop.
pub struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self { stdout })
    }

    pub fn stdout(&mut self) -> &mut Stdout {
        &mut self.stdout
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
