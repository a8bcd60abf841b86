//! Sequential-reveal games.
//!
//! Repetition and counting share one engine: every tap consumes an item and
//! the round ends once the target number of items has been consumed. What
//! differs is held by a [`RevealRule`]: how a round is drawn, what a tap
//! sounds like and how progress moves on.

use std::fmt::Debug;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{Config, CueConfig, levels};
use crate::content::{AudioRef, Item, Pool, Template};
use crate::engine::{EngineCore, RoundEngine, Session};
use crate::error::Result;
use crate::host::{Host, TimerId};
use crate::progression::{CountingGoal, Progression, RollingCursor};

/// Per-game policy of a [`SequentialGame`].
pub trait RevealRule: Debug {
    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Smallest pool the rule can work with.
    fn required(&self) -> usize;

    /// Draw the next round's items.
    fn next_round(&mut self, pool: &Pool) -> Vec<Item>;

    /// Items to consume before the round is complete.
    fn target(&self) -> usize;

    /// Cue for the `count`-th tap (1-based) of the round.
    fn tap_cue(&self, item: &Item, count: usize) -> AudioRef;

    /// Advance after a completed round. Returns the celebration to play, if any.
    fn complete(&mut self, cues: &CueConfig) -> Option<AudioRef>;

    /// Intro cue of the current round.
    fn intro(&self) -> Option<&AudioRef> {
        None
    }
}

/// Two consecutive pool items per round, with a spoken intro.
#[derive(Debug, Clone)]
pub struct Repetition {
    intros: Vec<AudioRef>,
    cursor: RollingCursor,
    next_intro: usize,
    current_intro: Option<AudioRef>,
    start: usize,
}

impl Repetition {
    pub fn new(intros: Vec<AudioRef>) -> Self {
        Self {
            intros,
            cursor: RollingCursor::new(levels::REPETITION_ROUND_SIZE),
            next_intro: 0,
            current_intro: None,
            start: 0,
        }
    }

    /// Pool index of the current round's first item.
    pub fn round_start(&self) -> usize {
        self.start
    }
}

impl RevealRule for Repetition {
    fn name(&self) -> &'static str {
        "repetition"
    }

    fn required(&self) -> usize {
        levels::REPETITION_ROUND_SIZE
    }

    fn next_round(&mut self, pool: &Pool) -> Vec<Item> {
        let run = self.cursor.take(pool.len());
        if run.wrapped {
            debug!("Repetition pool exhausted, starting over");
            self.next_intro = 0;
        }
        self.current_intro = self.intros.get(self.next_intro).cloned();
        self.next_intro += 1;

        let round = pool.sequential_round(run.start, levels::REPETITION_ROUND_SIZE);
        self.start = round.start;
        round.items
    }

    fn target(&self) -> usize {
        levels::REPETITION_ROUND_SIZE
    }

    fn tap_cue(&self, item: &Item, _count: usize) -> AudioRef {
        item.audio().clone()
    }

    fn complete(&mut self, _cues: &CueConfig) -> Option<AudioRef> {
        None
    }

    fn intro(&self) -> Option<&AudioRef> {
        self.current_intro.as_ref()
    }
}

/// Goal `n` shows `n` copies of one template; tapping them counts aloud.
#[derive(Debug, Clone)]
pub struct Counting {
    numerals: Vec<Template>,
    goal: CountingGoal,
}

impl Counting {
    /// `numerals[n - 1]` is the numeral template for `n`.
    pub fn new(numerals: Vec<Template>) -> Self {
        Self {
            numerals,
            goal: CountingGoal::default(),
        }
    }

    /// Numeral shown next to the items for the current goal.
    pub fn numeral(&self) -> Option<&Template> {
        self.numerals.get(self.goal.current() - 1)
    }
}

impl RevealRule for Counting {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn required(&self) -> usize {
        1
    }

    fn next_round(&mut self, pool: &Pool) -> Vec<Item> {
        let goal = self.goal.current();
        pool.repeated_round(goal - 1, goal)
    }

    fn target(&self) -> usize {
        self.goal.current()
    }

    fn tap_cue(&self, item: &Item, count: usize) -> AudioRef {
        if count < self.goal.current() {
            if let Some(numeral) = count.checked_sub(1).and_then(|i| self.numerals.get(i)) {
                return numeral.audio.clone();
            }
        }
        item.audio().clone()
    }

    fn complete(&mut self, cues: &CueConfig) -> Option<AudioRef> {
        let advance = self.goal.advance();
        info!("Counting goal now {}", advance.current());
        if advance.is_wrap() {
            Some(cues.celebration_long.clone())
        } else {
            Some(cues.celebration_short.clone())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    Intro,
    Reopen,
    Evaluate(usize),
}

/// Tap-to-reveal game driven by a [`RevealRule`].
#[derive(Debug)]
pub struct SequentialGame<H, R> {
    core: EngineCore<H, Deferred>,
    pool: Pool,
    rule: R,
    items: Vec<Item>,
    consumed: usize,
    cues: CueConfig,
    intro_delay: Duration,
}

pub type RepetitionGame<H> = SequentialGame<H, Repetition>;
pub type CountingGame<H> = SequentialGame<H, Counting>;

impl<H: Host, R: RevealRule> SequentialGame<H, R> {
    pub fn new(host: H, pool: Pool, rule: R, config: &Config) -> Result<Self> {
        pool.require(rule.name(), rule.required())?;

        let mut game = Self {
            core: EngineCore::new(host),
            pool,
            rule,
            items: Vec::new(),
            consumed: 0,
            cues: config.cues.clone(),
            intro_delay: config.intro_delay(),
        };
        game.start_round(Duration::ZERO);
        Ok(game)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// Items consumed in the current round.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    fn start_round(&mut self, celebration: Duration) {
        self.items = self.rule.next_round(&self.pool);
        self.consumed = 0;
        debug!("{} round of {}", self.rule.name(), self.items.len());

        self.core.close_gate();
        self.core.notify_all();
        if self.rule.intro().is_some() {
            self.core.defer(self.intro_delay, Deferred::Intro);
        } else {
            let delay = self.intro_delay.max(celebration);
            self.core.defer(delay, Deferred::Reopen);
        }
    }

    fn play_intro(&mut self) {
        let duration = match self.rule.intro() {
            Some(intro) => self.core.play(intro),
            None => Duration::ZERO,
        };
        self.core.defer(duration, Deferred::Reopen);
    }

    fn evaluate(&mut self, position: usize) {
        self.core.notify_item(position);
        if self.consumed < self.rule.target() {
            self.core.open_gate();
            return;
        }

        let celebration = match self.rule.complete(&self.cues) {
            Some(cue) => self.core.play_if_focused(&cue),
            None => Duration::ZERO,
        };
        self.start_round(celebration);
    }
}

impl<H: Host> CountingGame<H> {
    pub fn counting(host: H, pool: Pool, numerals: Vec<Template>, config: &Config) -> Result<Self> {
        Self::new(host, pool, Counting::new(numerals), config)
    }

    pub fn numeral(&self) -> Option<&Template> {
        self.rule.numeral()
    }

    /// Play the current goal's numeral again.
    pub fn replay_numeral(&mut self) {
        let Some(audio) = self.rule.numeral().map(|n| n.audio.clone()) else {
            return;
        };
        if !self.core.try_accept() {
            return;
        }
        let duration = self.core.play(&audio);
        self.core.defer(duration, Deferred::Reopen);
    }
}

impl<H: Host> RepetitionGame<H> {
    pub fn repetition(host: H, pool: Pool, intros: Vec<AudioRef>, config: &Config) -> Result<Self> {
        Self::new(host, pool, Repetition::new(intros), config)
    }
}

impl<H: Host, R: RevealRule> Session for SequentialGame<H, R> {
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

impl<H: Host, R: RevealRule> RoundEngine for SequentialGame<H, R> {
    type Item = Item;

    fn active_items(&self) -> &[Item] {
        &self.items
    }

    fn select_at(&mut self, position: usize) {
        let Some(item) = self.items.get(position) else {
            warn!(
                "{} position {} out of range ({} items)",
                self.rule.name(),
                position,
                self.items.len()
            );
            return;
        };
        if item.is_consumed() {
            debug!("Item {} already consumed", position);
            return;
        }
        if !self.core.try_accept() {
            return;
        }

        self.consumed += 1;
        let cue = self.rule.tap_cue(item, self.consumed);
        self.items[position].consume();
        let duration = self.core.play(&cue);
        self.core.defer(duration, Deferred::Evaluate(position));
    }

    fn level(&self) -> usize {
        self.rule.target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MockHost, settle};

    fn fruit() -> Vec<Template> {
        ["apple", "banana", "carrot", "lemon", "mango"]
            .iter()
            .map(|f| Template::new(format!("fruitveggies_{f}"), format!("fruitveggies_{f}")))
            .collect()
    }

    fn counting_items() -> Vec<Template> {
        [
            "one_strawberry",
            "two_carrots",
            "three_lemons",
            "four_mangos",
            "five_oranges",
            "six_apples",
            "seven_tomatoes",
            "eight_watermelons",
            "nine_strawberries",
            "ten_apples",
        ]
        .iter()
        .map(|c| Template::new(format!("numbers_{c}"), format!("numbers_{c}")))
        .collect()
    }

    fn numerals() -> Vec<Template> {
        [
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        ]
        .iter()
        .map(|n| Template::new(format!("numbers_{n}"), format!("numbers_{n}")))
        .collect()
    }

    fn intros() -> Vec<AudioRef> {
        vec![AudioRef::from("intro_a"), AudioRef::from("intro_b")]
    }

    fn repetition() -> RepetitionGame<MockHost> {
        let pool = Pool::seeded(fruit(), Some(0)).unwrap();
        let config = Config::default();
        let mut game =
            RepetitionGame::repetition(MockHost::new(), pool, intros(), &config).unwrap();
        settle(&mut game);
        game
    }

    fn counting() -> CountingGame<MockHost> {
        let pool = Pool::seeded(counting_items(), Some(0)).unwrap();
        let mut game =
            CountingGame::counting(MockHost::new(), pool, numerals(), &Config::default()).unwrap();
        settle(&mut game);
        game
    }

    fn clear_round<R: RevealRule>(game: &mut SequentialGame<MockHost, R>) {
        for position in 0..game.items().len() {
            game.select_at(position);
            settle(game);
        }
    }

    #[test]
    fn test_repetition_intro_gates_first_round() {
        let pool = Pool::seeded(fruit(), Some(0)).unwrap();
        let config = Config::default();
        let mut game =
            RepetitionGame::repetition(MockHost::new(), pool, intros(), &config).unwrap();
        assert!(!game.is_accepting());
        game.select_at(0);
        assert!(game.items().iter().all(|i| !i.is_consumed()));

        settle(&mut game);
        assert_eq!(game.host().played_names(), ["intro_a"]);
        assert!(game.is_accepting());
    }

    #[test]
    fn test_repetition_rounds_follow_pool_order() {
        let mut game = repetition();
        let mut starts = vec![game.rule().round_start()];
        let mut first_items = vec![game.items()[0].audio().to_string()];
        for _ in 0..3 {
            clear_round(&mut game);
            starts.push(game.rule().round_start());
            first_items.push(game.items()[0].audio().to_string());
        }
        assert_eq!(starts, [0, 2, 4, 1]);
        assert_eq!(
            first_items,
            [
                "fruitveggies_apple",
                "fruitveggies_carrot",
                "fruitveggies_mango",
                "fruitveggies_banana"
            ]
        );
    }

    #[test]
    fn test_repetition_odd_pool_shows_every_item() {
        let mut game = repetition();
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.extend(game.items().iter().map(|i| i.audio().to_string()));
            clear_round(&mut game);
        }
        let expected: Vec<String> = fruit().iter().map(|t| t.audio.to_string()).collect();
        assert_eq!(&seen[..5], &expected[..]);
        // The third round crosses the end of the pool
        assert_eq!(seen[5], expected[0]);
    }

    #[test]
    fn test_repetition_intro_index_resets_on_wrap() {
        let mut game = repetition();
        clear_round(&mut game);
        assert_eq!(game.rule().intro().map(AudioRef::as_str), Some("intro_b"));

        // Third round of the pass has no intro left
        clear_round(&mut game);
        assert_eq!(game.rule().round_start(), 4);
        assert_eq!(game.rule().intro(), None);

        // Second pass starts over with the first intro
        clear_round(&mut game);
        assert_eq!(game.rule().round_start(), 1);
        assert_eq!(game.rule().intro().map(AudioRef::as_str), Some("intro_a"));
    }

    #[test]
    fn test_repetition_consumed_item_ignored() {
        let mut game = repetition();
        game.select_at(0);
        settle(&mut game);
        game.host_mut().clear_log();

        game.select_at(0);
        assert!(game.is_accepting());
        assert!(game.host().played().is_empty());
        assert_eq!(game.consumed(), 1);
    }

    #[test]
    fn test_repetition_gate_blocks_second_tap() {
        let mut game = repetition();
        game.select_at(0);
        game.select_at(1);
        assert!(game.items()[0].is_consumed());
        assert!(!game.items()[1].is_consumed());
        assert_eq!(game.consumed(), 1);
    }

    #[test]
    fn test_counting_round_repeats_one_template() {
        let mut game = counting();
        for _ in 0..2 {
            clear_round(&mut game);
        }
        assert_eq!(game.level(), 3);
        assert_eq!(game.items().len(), 3);
        assert!(
            game.items()
                .iter()
                .all(|i| i.audio().as_str() == "numbers_three_lemons")
        );
        assert_eq!(game.numeral().map(|n| n.audio.as_str()), Some("numbers_three"));
    }

    #[test]
    fn test_counting_taps_count_aloud() {
        let mut game = counting();
        clear_round(&mut game);
        clear_round(&mut game);
        game.host_mut().clear_log();

        // Goal 3, tapped out of order
        for position in [2, 0, 1] {
            game.select_at(position);
            settle(&mut game);
        }
        let played = game.host().played_names();
        assert_eq!(
            &played[..3],
            ["numbers_one", "numbers_two", "numbers_three_lemons"]
        );
        assert_eq!(played[3], "celebration_short");
        assert_eq!(game.level(), 4);
        assert_eq!(game.consumed(), 0);
    }

    #[test]
    fn test_counting_wraps_with_long_celebration() {
        let mut game = counting();
        let mut goals = vec![game.level()];
        for _ in 0..11 {
            clear_round(&mut game);
            goals.push(game.level());
        }
        assert_eq!(goals, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 1, 2]);
        assert_eq!(game.host().play_count("celebration_long"), 1);
        assert_eq!(game.host().play_count("celebration_short"), 10);
    }

    #[test]
    fn test_counting_gate_waits_for_celebration() {
        let pool = Pool::seeded(counting_items(), Some(0)).unwrap();
        let host = MockHost::new().with_duration("celebration_short", 2500);
        let mut game = CountingGame::counting(host, pool, numerals(), &Config::default()).unwrap();
        settle(&mut game);

        game.select_at(0);
        let evaluate = game.host_mut().next_due().unwrap();
        game.on_timer(evaluate);
        let completed_at = game.host().now();
        assert!(!game.is_accepting());

        settle(&mut game);
        assert_eq!(game.host().now() - completed_at, Duration::from_millis(2500));
        assert!(game.is_accepting());
    }

    #[test]
    fn test_replay_numeral() {
        let mut game = counting();
        game.host_mut().clear_log();

        game.replay_numeral();
        assert_eq!(game.host().played_names(), ["numbers_one"]);
        assert!(!game.is_accepting());
        settle(&mut game);
        assert!(game.is_accepting());
    }

    #[test]
    fn test_counting_without_numerals_uses_item_audio() {
        let pool = Pool::seeded(counting_items(), Some(0)).unwrap();
        let mut game =
            CountingGame::counting(MockHost::new(), pool, Vec::new(), &Config::default()).unwrap();
        settle(&mut game);
        clear_round(&mut game);
        game.host_mut().clear_log();

        game.select_at(0);
        assert_eq!(game.host().played_names(), ["numbers_two_carrots"]);
    }
}
