use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{Config, CueConfig, levels};
use crate::content::{AudioRef, Item, Pool};
use crate::engine::{EngineCore, RoundEngine, Session};
use crate::error::Result;
use crate::host::{Host, TimerId};
use crate::progression::{Oscillator, Progression};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    Intro,
    Reopen,
    Evaluate(usize),
}

/// Audio-match game: find the item whose sound was just played.
///
/// Round sizes alternate between 2 and 4 items whatever the outcome. A wrong
/// guess only plays the error cue; the round stays as it is.
#[derive(Debug)]
pub struct GuessGame<H> {
    core: EngineCore<H, Deferred>,
    pool: Pool,
    sizes: Oscillator,
    items: Vec<Item>,
    correct: AudioRef,
    rounds: usize,
    cues: CueConfig,
    intro_delay: Duration,
}

impl<H: Host> GuessGame<H> {
    pub fn new(host: H, pool: Pool, config: &Config) -> Result<Self> {
        pool.require("audio-match", levels::GUESS_HIGH)?;

        let mut game = Self {
            core: EngineCore::new(host),
            pool,
            sizes: Oscillator::default(),
            items: Vec::new(),
            correct: AudioRef::default(),
            rounds: 0,
            cues: config.cues.clone(),
            intro_delay: config.intro_delay(),
        };
        game.start_round(Duration::ZERO);
        Ok(game)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Audio the player has to find this round.
    pub fn correct_audio(&self) -> &AudioRef {
        &self.correct
    }

    /// Rounds won so far.
    pub fn rounds_won(&self) -> usize {
        self.rounds
    }

    /// Play the round's prompt again (the speaker button).
    pub fn replay_prompt(&mut self) {
        if !self.core.try_accept() {
            return;
        }
        let duration = self.core.play(&self.correct);
        self.core.defer(duration, Deferred::Reopen);
    }

    /// Deal the next round. Its intro waits for the entrance delay and for
    /// `feedback`, the cue that ended the previous round.
    fn start_round(&mut self, feedback: Duration) {
        let round = self.pool.guess_round(self.sizes.current());
        self.items = round.items;
        self.correct = round.correct;
        debug!("Audio-match round of {}, answer {}", self.items.len(), self.correct);

        self.core.close_gate();
        self.core.notify_all();
        let delay = self.intro_delay.max(feedback);
        self.core.defer(delay, Deferred::Intro);
    }

    fn play_intro(&mut self) {
        let duration = self.core.play_if_focused(&self.correct);
        self.core.defer(duration, Deferred::Reopen);
    }

    fn evaluate(&mut self, position: usize) {
        let Some(item) = self.items.get(position) else {
            self.core.open_gate();
            return;
        };

        if item.audio() == &self.correct {
            let feedback = self.core.play_if_focused(&self.cues.correct_answer);
            self.rounds += 1;
            let advance = self.sizes.advance();
            info!("Audio-match round {} won, next size {}", self.rounds, advance.current());
            self.start_round(feedback);
        } else {
            debug!("Wrong guess {} (answer {})", item.audio(), self.correct);
            self.core.play_if_focused(&self.cues.wrong_answer);
            self.core.open_gate();
        }
    }
}

impl<H: Host> Session for GuessGame<H> {
    type Host = H;

    fn host(&self) -> &H {
        self.core.host()
    }

    fn host_mut(&mut self) -> &mut H {
        self.core.host_mut()
    }

    fn on_timer(&mut self, timer: TimerId) {
        match self.core.fire(timer) {
            Some(Deferred::Intro) => self.play_intro(),
            Some(Deferred::Reopen) => self.core.open_gate(),
            Some(Deferred::Evaluate(position)) => self.evaluate(position),
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

impl<H: Host> RoundEngine for GuessGame<H> {
    type Item = Item;

    fn active_items(&self) -> &[Item] {
        &self.items
    }

    fn select_at(&mut self, position: usize) {
        let Some(item) = self.items.get(position) else {
            warn!("Audio-match position {} out of range ({} items)", position, self.items.len());
            return;
        };
        if !self.core.try_accept() {
            return;
        }
        let audio = item.audio().clone();
        self.core.notify_item(position);
        let duration = self.core.play(&audio);
        self.core.defer(duration, Deferred::Evaluate(position));
    }

    fn level(&self) -> usize {
        self.sizes.current()
    }
}
