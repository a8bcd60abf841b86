//! Configuration and tuning constants.
//!
//! This module contains:
//! - `Config` - user settings loaded from TOML (timing, cue names, hotspot table)
//! - Level and goal constants for every game family
//! - Timing and hotspot defaults

mod settings;

pub use settings::*;

/// Level and goal ladders.
pub mod levels {
    /// Memory pair counts, one entry per level.
    pub const MEMORY_LADDER: [usize; 6] = [2, 3, 4, 5, 6, 7];

    /// Audio-match round sizes. Rounds alternate low, high, low, ...
    pub const GUESS_LOW: usize = 2;
    pub const GUESS_HIGH: usize = 4;

    /// Counting goals run 1..=COUNTING_MAX_GOAL, then start over.
    pub const COUNTING_FIRST_GOAL: usize = 1;
    pub const COUNTING_MAX_GOAL: usize = 10;

    /// Items per repetition round.
    pub const REPETITION_ROUND_SIZE: usize = 2;

    /// Largest memory level, i.e. the minimum pool size for the memory game.
    pub const fn memory_top() -> usize {
        MEMORY_LADDER[MEMORY_LADDER.len() - 1]
    }

    /// Grid columns used to lay out a memory round of `pairs` pairs.
    pub const fn memory_columns(pairs: usize) -> usize {
        match pairs {
            0..=2 => 2,
            3 => 3,
            4 | 5 => 4,
            _ => 5,
        }
    }
}

/// Timing defaults.
pub mod timing {
    /// Delay (in ms) between a round's entrance and its intro cue or gate reopening.
    pub const DEFAULT_INTRO_DELAY_MS: u64 = 800;
}

/// Hotspot matching defaults.
pub mod hotspot {
    /// Maximum per-channel difference (0-255) for a sampled color to match.
    pub const DEFAULT_TOLERANCE: u8 = 25;
}
