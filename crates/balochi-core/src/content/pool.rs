use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::content::{AudioRef, Card, Item, Template};
use crate::error::{Error, Result};

/// Round produced for the guess game.
#[derive(Debug, Clone)]
pub struct GuessRound {
    pub items: Vec<Item>,
    /// Audio of the item the player has to find.
    pub correct: AudioRef,
}

/// Round produced for the sequential games.
#[derive(Debug, Clone)]
pub struct SequentialRound {
    pub items: Vec<Item>,
    /// Pool index the round actually started at (0 after a wrap).
    pub start: usize,
}

/// Session-scoped set of content templates.
///
/// The pool is only ever reordered, never edited. Rounds are built from
/// copies of its templates.
#[derive(Debug, Clone)]
pub struct Pool {
    templates: Vec<Template>,
    rng: ChaCha8Rng,
}

impl Pool {
    pub fn new(templates: Vec<Template>) -> Result<Self> {
        Self::seeded(templates, None)
    }

    /// Create a pool with a fixed shuffle seed, or an OS seed when `None`.
    pub fn seeded(templates: Vec<Template>, seed: Option<u64>) -> Result<Self> {
        if templates.is_empty() {
            return Err(Error::EmptyPool);
        }
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Ok(Self { templates, rng })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Fail unless the pool holds at least `required` templates.
    pub fn require(&self, game: &'static str, required: usize) -> Result<()> {
        Error::check_pool(game, required, self.len())
    }

    /// Shuffle the pool, take `pairs` templates and deal two cards for each,
    /// then shuffle the dealt cards.
    pub fn memory_round(&mut self, pairs: usize) -> Vec<Card> {
        let pairs = self.clamp("memory", pairs);
        self.templates.shuffle(&mut self.rng);

        let mut cards: Vec<Card> = self.templates[..pairs]
            .iter()
            .flat_map(|t| [Card::from_template(t), Card::from_template(t)])
            .collect();
        cards.shuffle(&mut self.rng);
        cards
    }

    /// Shuffle the pool and take `size` items. The first drawn item is the
    /// correct answer; the items are shuffled again so its position is random.
    pub fn guess_round(&mut self, size: usize) -> GuessRound {
        let size = self.clamp("audio-match", size);
        self.templates.shuffle(&mut self.rng);

        let mut items: Vec<Item> = self.templates[..size]
            .iter()
            .map(Item::from_template)
            .collect();
        let correct = items[0].audio().clone();
        items.shuffle(&mut self.rng);

        GuessRound { items, correct }
    }

    /// Take `size` consecutive templates in source order starting at `start`,
    /// continuing from the beginning when the run passes the end of the pool.
    pub fn sequential_round(&self, start: usize, size: usize) -> SequentialRound {
        let size = self.clamp("repetition", size);
        let start = start % self.len();

        let items = self
            .templates
            .iter()
            .cycle()
            .skip(start)
            .take(size)
            .map(Item::from_template)
            .collect();

        SequentialRound { items, start }
    }

    /// `copies` independent items of the template at `index` (modulo pool size).
    pub fn repeated_round(&self, index: usize, copies: usize) -> Vec<Item> {
        let template = &self.templates[index % self.len()];
        (0..copies).map(|_| Item::from_template(template)).collect()
    }

    fn clamp(&self, game: &str, size: usize) -> usize {
        if size > self.len() {
            warn!(
                "{} round needs {} templates but the pool has {}",
                game,
                size,
                self.len()
            );
            return self.len();
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn colors() -> Vec<Template> {
        [
            "red", "green", "blue", "yellow", "orange", "brown", "black", "white", "grey",
        ]
        .iter()
        .map(|c| Template::new(format!("colors_memory_{c}"), format!("colors_{c}")))
        .collect()
    }

    #[test]
    fn test_empty_pool_rejected() {
        assert!(matches!(Pool::new(Vec::new()), Err(Error::EmptyPool)));
    }

    #[test]
    fn test_require() {
        let pool = Pool::seeded(colors(), Some(1)).unwrap();
        assert!(pool.require("memory", 7).is_ok());
        assert!(matches!(
            pool.require("memory", 10),
            Err(Error::PoolTooSmall {
                required: 10,
                available: 9,
                ..
            })
        ));
    }

    #[test]
    fn test_memory_round_has_exact_pairs() {
        let mut pool = Pool::seeded(colors(), Some(7)).unwrap();
        for pairs in 2..=7 {
            let cards = pool.memory_round(pairs);
            assert_eq!(cards.len(), pairs * 2);

            let mut counts: HashMap<&str, usize> = HashMap::new();
            for card in &cards {
                *counts.entry(card.image().as_str()).or_default() += 1;
                assert!(!card.is_face_up());
                assert!(!card.is_paired());
            }
            assert_eq!(counts.len(), pairs);
            assert!(counts.values().all(|&n| n == 2));
        }
    }

    #[test]
    fn test_memory_round_clamped_to_pool() {
        let mut pool = Pool::seeded(colors()[..3].to_vec(), Some(7)).unwrap();
        assert_eq!(pool.memory_round(5).len(), 6);
    }

    #[test]
    fn test_guess_round_contains_correct_answer() {
        let mut pool = Pool::seeded(colors(), Some(3)).unwrap();
        for size in [2, 4] {
            let round = pool.guess_round(size);
            assert_eq!(round.items.len(), size);
            let hits = round
                .items
                .iter()
                .filter(|i| i.audio() == &round.correct)
                .count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_guess_round_seed_is_reproducible() {
        let mut a = Pool::seeded(colors(), Some(99)).unwrap();
        let mut b = Pool::seeded(colors(), Some(99)).unwrap();
        let ra = a.guess_round(4);
        let rb = b.guess_round(4);
        assert_eq!(ra.items, rb.items);
        assert_eq!(ra.correct, rb.correct);
    }

    #[test]
    fn test_sequential_round_preserves_order() {
        let pool = Pool::seeded(colors(), Some(0)).unwrap();
        let round = pool.sequential_round(2, 2);
        assert_eq!(round.start, 2);
        assert_eq!(round.items[0].audio().as_str(), "colors_blue");
        assert_eq!(round.items[1].audio().as_str(), "colors_yellow");
    }

    #[test]
    fn test_sequential_round_crosses_end() {
        let pool = Pool::seeded(colors(), Some(0)).unwrap();
        let last = pool.templates[8].audio.clone();

        let round = pool.sequential_round(8, 2);
        assert_eq!(round.start, 8);
        assert_eq!(round.items[0].audio(), &last);
        assert_eq!(round.items[1].audio().as_str(), "colors_red");

        let round = pool.sequential_round(9, 2);
        assert_eq!(round.start, 0);
        assert_eq!(round.items[0].audio().as_str(), "colors_red");
    }

    #[test]
    fn test_repeated_round_copies_one_template() {
        let pool = Pool::seeded(colors(), Some(0)).unwrap();
        let items = pool.repeated_round(2, 3);
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.audio().as_str() == "colors_blue"));

        // Index wraps around the pool
        let items = pool.repeated_round(10, 1);
        assert_eq!(items[0].audio().as_str(), "colors_green");
    }
}
