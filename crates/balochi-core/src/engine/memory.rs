use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{Config, CueConfig, levels};
use crate::content::{Card, ImageRef, Pool};
use crate::engine::{EngineCore, RoundEngine, Session};
use crate::error::Result;
use crate::host::{Host, TimerId};
use crate::progression::{MemoryLadder, Progression};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    Reopen,
    Evaluate,
}

/// A card revealed during the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub image: ImageRef,
    pub position: usize,
}

/// Pair-matching game.
///
/// Each level deals `level` pairs of face-down cards. A turn reveals two
/// cards; equal images at different positions stay paired, anything else is
/// turned back over. Matching every pair of the round climbs the level ladder
/// (`2..=7`, staying at 7) and deals a new round.
#[derive(Debug)]
pub struct MemoryGame<H> {
    core: EngineCore<H, Deferred>,
    pool: Pool,
    ladder: MemoryLadder,
    cards: Vec<Card>,
    first: Option<Selection>,
    second: Option<Selection>,
    matched: usize,
    cues: CueConfig,
    intro_delay: Duration,
}

impl<H: Host> MemoryGame<H> {
    pub fn new(host: H, pool: Pool, config: &Config) -> Result<Self> {
        pool.require("memory", levels::memory_top())?;

        let mut game = Self {
            core: EngineCore::new(host),
            pool,
            ladder: MemoryLadder::new(),
            cards: Vec::new(),
            first: None,
            second: None,
            matched: 0,
            cues: config.cues.clone(),
            intro_delay: config.intro_delay(),
        };
        game.deal(Duration::ZERO);
        Ok(game)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Pairs matched in the current round.
    pub fn matched_pairs(&self) -> usize {
        self.matched
    }

    /// Grid width for the current level.
    pub fn columns(&self) -> usize {
        levels::memory_columns(self.ladder.current())
    }

    pub fn selections(&self) -> (Option<&Selection>, Option<&Selection>) {
        (self.first.as_ref(), self.second.as_ref())
    }

    /// Turn the card at `position` face up.
    pub fn reveal_card(&mut self, position: usize) {
        let Some(card) = self.cards.get(position) else {
            warn!("Memory position {} out of range ({} cards)", position, self.cards.len());
            return;
        };
        if card.is_paired() {
            debug!("Card {} already paired", position);
            return;
        }
        if !self.core.try_accept() {
            return;
        }

        let card = &mut self.cards[position];
        let image = card.flip_up().clone();
        let audio = card.audio().clone();
        self.core.notify_item(position);
        let duration = self.core.play(&audio);

        let selection = Selection { image, position };
        if self.first.is_none() {
            self.first = Some(selection);
            self.core.defer(duration, Deferred::Reopen);
        } else {
            self.second = Some(selection);
            self.core.defer(duration, Deferred::Evaluate);
        }
    }

    fn evaluate(&mut self) {
        let (Some(first), Some(second)) = (self.first.take(), self.second.take()) else {
            self.core.open_gate();
            return;
        };

        if first.image == second.image && first.position != second.position {
            for position in [first.position, second.position] {
                self.cards[position].mark_paired();
                self.core.notify_item(position);
            }
            self.matched += 1;
            debug!("Pair {} matched ({}/{})", first.image, self.matched, self.ladder.current());

            if self.matched == self.ladder.current() {
                self.complete_level();
                return;
            }
        } else {
            for position in [first.position, second.position] {
                self.cards[position].flip_down();
                self.core.notify_item(position);
            }
        }
        self.core.open_gate();
    }

    fn complete_level(&mut self) {
        let advance = self.ladder.advance();
        info!("Memory level {} complete: {:?}", self.matched, advance);
        let celebration = self.core.play_if_focused(&self.cues.celebration_short);
        self.deal(celebration);
    }

    /// Deal a fresh round for the current level. The gate stays closed until
    /// the entrance delay and any celebration have passed.
    fn deal(&mut self, celebration: Duration) {
        self.cards = self.pool.memory_round(self.ladder.current());
        self.first = None;
        self.second = None;
        self.matched = 0;

        self.core.close_gate();
        self.core.notify_all();
        let delay = self.intro_delay.max(celebration);
        self.core.defer(delay, Deferred::Reopen);
    }
}

impl<H: Host> Session for MemoryGame<H> {
    type Host = H;

    fn host(&self) -> &H {
        self.core.host()
    }

    fn host_mut(&mut self) -> &mut H {
        self.core.host_mut()
    }

    fn on_timer(&mut self, timer: TimerId) {
        match self.core.fire(timer) {
            Some(Deferred::Reopen) => self.core.open_gate(),
            Some(Deferred::Evaluate) => self.evaluate(),
            None => {}
        }
    }

    fn cancel_pending(&mut self) {
        self.core.cancel_pending();
    }

    fn is_accepting(&self) -> bool {
        self.core.gate().is_open()
    }

    fn has_pending(&self) -> bool {
        self.core.has_pending()
    }
}

impl<H: Host> RoundEngine for MemoryGame<H> {
    type Item = Card;

    fn active_items(&self) -> &[Card] {
        &self.cards
    }

    fn select_at(&mut self, position: usize) {
        self.reveal_card(position);
    }

    fn level(&self) -> usize {
        self.ladder.current()
    }
}
