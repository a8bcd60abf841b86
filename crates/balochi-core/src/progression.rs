//! Level and goal progression policies.
//!
//! Each game family moves its level (or goal) differently:
//! - memory climbs a fixed ladder and stays at the top,
//! - audio-match alternates between two round sizes,
//! - counting walks through its goals and starts over after the last one,
//! - repetition has no level, only a cursor rolling through the pool.

use tracing::info;

use crate::config::levels;

/// Outcome of a single [`Progression::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to a new value.
    Stepped { from: usize, to: usize },
    /// Already at the top, value unchanged.
    Clamped(usize),
    /// Completed the last value and started over.
    Wrapped { from: usize, to: usize },
}

impl Advance {
    /// Value in effect after the advance.
    pub fn current(&self) -> usize {
        match *self {
            Advance::Stepped { to, .. } | Advance::Wrapped { to, .. } => to,
            Advance::Clamped(level) => level,
        }
    }

    pub fn is_wrap(&self) -> bool {
        matches!(self, Advance::Wrapped { .. })
    }
}

pub trait Progression {
    fn current(&self) -> usize;

    fn advance(&mut self) -> Advance;
}

/// Memory pair-count ladder `2, 3, 4, 5, 6, 7`.
#[derive(Debug, Clone, Default)]
pub struct MemoryLadder {
    step: usize,
}

impl MemoryLadder {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn is_top(&self) -> bool {
        self.step + 1 == levels::MEMORY_LADDER.len()
    }
}

impl Progression for MemoryLadder {
    fn current(&self) -> usize {
        levels::MEMORY_LADDER[self.step]
    }

    fn advance(&mut self) -> Advance {
        let from = self.current();
        if self.is_top() {
            return Advance::Clamped(from);
        }
        self.step += 1;
        let to = self.current();
        info!("Memory level {} -> {}", from, to);
        Advance::Stepped { from, to }
    }
}

/// Alternates between two values every round, starting at `low`.
#[derive(Debug, Clone)]
pub struct Oscillator {
    low: usize,
    high: usize,
    current: usize,
}

impl Oscillator {
    pub fn new(low: usize, high: usize) -> Self {
        Self {
            low,
            high,
            current: low,
        }
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(levels::GUESS_LOW, levels::GUESS_HIGH)
    }
}

impl Progression for Oscillator {
    fn current(&self) -> usize {
        self.current
    }

    fn advance(&mut self) -> Advance {
        let from = self.current;
        self.current = if from == self.low { self.high } else { self.low };
        Advance::Stepped {
            from,
            to: self.current,
        }
    }
}

/// Counting goals `first..=max`, wrapping back to `first`.
#[derive(Debug, Clone)]
pub struct CountingGoal {
    first: usize,
    max: usize,
    goal: usize,
}

impl CountingGoal {
    pub fn new(first: usize, max: usize) -> Self {
        Self {
            first,
            max,
            goal: first,
        }
    }

    /// Whether completing the current goal wraps around.
    pub fn is_last(&self) -> bool {
        self.goal >= self.max
    }
}

impl Default for CountingGoal {
    fn default() -> Self {
        Self::new(levels::COUNTING_FIRST_GOAL, levels::COUNTING_MAX_GOAL)
    }
}

impl Progression for CountingGoal {
    fn current(&self) -> usize {
        self.goal
    }

    fn advance(&mut self) -> Advance {
        let from = self.goal;
        if self.is_last() {
            self.goal = self.first;
            info!("Counting goal {} completed, starting over", from);
            return Advance::Wrapped {
                from,
                to: self.goal,
            };
        }
        self.goal += 1;
        Advance::Stepped { from, to: self.goal }
    }
}

/// Rolling start index of the repetition game.
///
/// Hands out `step`-sized runs in pool order. A run may cross the end of the
/// pool and continue from its start, so every item is shown once per pass even
/// when the pool length is not a multiple of `step`.
#[derive(Debug, Clone)]
pub struct RollingCursor {
    next: usize,
    step: usize,
}

/// One run handed out by [`RollingCursor::take`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    /// True when the cursor restarted from the beginning of the pool.
    pub wrapped: bool,
}

impl RollingCursor {
    pub fn new(step: usize) -> Self {
        Self { next: 0, step }
    }

    /// Next run of a pool of `pool_len` items. `wrapped` is set on the first
    /// run of every pass after the first.
    pub fn take(&mut self, pool_len: usize) -> Run {
        if pool_len == 0 {
            return Run {
                start: 0,
                wrapped: false,
            };
        }
        let wrapped = self.next >= pool_len;
        self.next %= pool_len;
        let start = self.next;
        self.next += self.step;
        Run { start, wrapped }
    }
}
