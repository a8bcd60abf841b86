//! Round engines, one per game family.
//!
//! Every engine owns its host, a [`SelectionGate`] and at most one pending
//! timer. User input enters through [`RoundEngine::select_at`]; the host
//! reports elapsed timers through [`Session::on_timer`].
//!
//! A round always starts with the gate closed. It opens once the round's
//! intro (or entrance delay) has finished.

mod gate;
mod guess;
mod memory;
mod sequential;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::host::{Host, TimerId};

pub use gate::SelectionGate;
pub(crate) use gate::EngineCore;
pub use guess::GuessGame;
pub use memory::{MemoryGame, Selection};
pub use sequential::{
    Counting, CountingGame, Repetition, RepetitionGame, RevealRule, SequentialGame,
};

/// Game families.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum GameKind {
    Memory,
    AudioMatch,
    Repetition,
    Counting,
    Face,
}

/// A running game bound to a host.
pub trait Session {
    type Host: Host;

    fn host(&self) -> &Self::Host;

    fn host_mut(&mut self) -> &mut Self::Host;

    /// Called by the host when a timer returned by its scheduler elapses.
    /// Timers other than the session's pending one are ignored.
    fn on_timer(&mut self, timer: TimerId);

    /// Cancel the pending timer, if any. Call before tearing the session down.
    fn cancel_pending(&mut self);

    /// Whether a selection made now would be accepted.
    fn is_accepting(&self) -> bool;

    fn has_pending(&self) -> bool;
}

/// A session presenting a grid of selectable items.
pub trait RoundEngine: Session {
    type Item;

    /// Items of the current round, in display order.
    fn active_items(&self) -> &[Self::Item];

    /// Select the item at `position`. Ignored while the gate is closed, for
    /// positions out of range and for items already consumed or paired.
    fn select_at(&mut self, position: usize);

    /// Current level (memory, audio-match), goal (counting) or round size (repetition).
    fn level(&self) -> usize;
}
