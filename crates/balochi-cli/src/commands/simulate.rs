//! Scripted play on a virtual clock.

use anyhow::{Result, bail};
use balochi_core::host::{MockHost, settle};
use balochi_core::{
    CountingGame, GameKind, GuessGame, MemoryGame, RepetitionGame, RevealRule, RoundEngine,
    SequentialGame, Session,
};
use owo_colors::OwoColorize;

use super::Context;

pub fn run(
    ctx: &Context,
    game: GameKind,
    category: Option<&str>,
    rounds: usize,
    mistakes: bool,
) -> Result<()> {
    let (category, pool) = ctx.pool(game, category)?;
    let host = MockHost::from_pack(&ctx.pack);
    println!(
        "{} {} / {}, {} rounds{}",
        "simulating".bold(),
        game,
        category.name,
        rounds,
        if mistakes { " with mistakes" } else { "" }
    );

    match game {
        GameKind::Memory => {
            let mut game = MemoryGame::new(host, pool, &ctx.config)?;
            memory(&mut game, rounds, mistakes);
        }
        GameKind::AudioMatch => {
            let mut game = GuessGame::new(host, pool, &ctx.config)?;
            guess(&mut game, rounds, mistakes);
        }
        GameKind::Repetition => {
            let intros = category.intros.clone();
            let mut game = RepetitionGame::repetition(host, pool, intros, &ctx.config)?;
            sequential(&mut game, rounds, mistakes);
        }
        GameKind::Counting => {
            let numerals = category.numerals.clone();
            let mut game = CountingGame::counting(host, pool, numerals, &ctx.config)?;
            sequential(&mut game, rounds, mistakes);
        }
        GameKind::Face => bail!("the face game has no rounds, use `balochi face --tap X,Y`"),
    }
    Ok(())
}

fn trace<G: RoundEngine<Host = MockHost>>(round: usize, before: usize, game: &G) {
    let after = game.level();
    let arrow = if after > before {
        format!("{:>2} -> {:<2}", before, after).green().to_string()
    } else if after < before {
        format!("{:>2} -> {:<2}", before, after).yellow().to_string()
    } else {
        format!("{:>2} -> {:<2}", before, after)
    };
    println!(
        "round {:>3}  {}  {}",
        round + 1,
        arrow,
        format!("t={:.1}s", game.host().now().as_secs_f64()).dimmed()
    );
}

fn memory(game: &mut MemoryGame<MockHost>, rounds: usize, mistakes: bool) {
    for round in 0..rounds {
        settle(game);
        let before = game.level();

        if mistakes {
            let cards = game.cards();
            if let Some(other) = cards.iter().position(|c| c.image() != cards[0].image()) {
                for position in [0, other] {
                    game.select_at(position);
                    settle(game);
                }
            }
        }

        for _ in 0..before {
            let cards = game.cards();
            let Some(first) = cards.iter().position(|c| !c.is_paired()) else {
                break;
            };
            let Some(second) = cards
                .iter()
                .enumerate()
                .skip(first + 1)
                .find(|(_, c)| !c.is_paired() && c.image() == cards[first].image())
                .map(|(i, _)| i)
            else {
                break;
            };
            for position in [first, second] {
                game.select_at(position);
                settle(game);
            }
        }
        trace(round, before, &*game);
    }
    game.cancel_pending();
}

fn guess(game: &mut GuessGame<MockHost>, rounds: usize, mistakes: bool) {
    for round in 0..rounds {
        settle(game);
        let before = game.level();

        if mistakes {
            let correct = game.correct_audio().clone();
            if let Some(wrong) = game.items().iter().position(|i| i.audio() != &correct) {
                game.select_at(wrong);
                settle(game);
            }
        }

        let correct = game.correct_audio().clone();
        if let Some(right) = game.items().iter().position(|i| i.audio() == &correct) {
            game.select_at(right);
            settle(game);
        }
        trace(round, before, &*game);
    }
    game.cancel_pending();
}

fn sequential<R: RevealRule>(
    game: &mut SequentialGame<MockHost, R>,
    rounds: usize,
    mistakes: bool,
) {
    for round in 0..rounds {
        settle(game);
        let before = game.level();

        for position in 0..before {
            game.select_at(position);
            if mistakes && position == 0 && before > 1 {
                // A second tap on a consumed item is ignored.
                settle(game);
                game.select_at(position);
            }
            settle(game);
        }
        trace(round, before, &*game);
    }
    game.cancel_pending();
}

#[cfg(test)]
mod tests {
    use balochi_core::{Config, ContentPack, Pool};

    use super::*;

    fn pool(pack: &ContentPack, category: &str, kind: GameKind) -> Pool {
        pack.category(category).unwrap().pool_for(kind, Some(3)).unwrap()
    }

    #[test]
    fn test_memory_run_ends_without_pending_timer() {
        let pack = ContentPack::builtin().unwrap();
        let host = MockHost::from_pack(&pack);
        let pool = pool(&pack, "colors", GameKind::Memory);
        let mut game = MemoryGame::new(host, pool, &Config::default()).unwrap();

        memory(&mut game, 3, true);
        assert_eq!(game.level(), 5);
        assert!(!game.has_pending());
        assert_eq!(game.host().pending_timers(), 0);
    }

    #[test]
    fn test_guess_run_ends_without_pending_timer() {
        let pack = ContentPack::builtin().unwrap();
        let host = MockHost::from_pack(&pack);
        let pool = pool(&pack, "colors", GameKind::AudioMatch);
        let mut game = GuessGame::new(host, pool, &Config::default()).unwrap();

        guess(&mut game, 3, true);
        assert_eq!(game.rounds_won(), 3);
        assert!(!game.has_pending());
        assert_eq!(game.host().pending_timers(), 0);
    }

    #[test]
    fn test_counting_run_ends_without_pending_timer() {
        let pack = ContentPack::builtin().unwrap();
        let numbers = pack.category("numbers").unwrap();
        let host = MockHost::from_pack(&pack);
        let pool = pool(&pack, "numbers", GameKind::Counting);
        let mut game =
            CountingGame::counting(host, pool, numbers.numerals.clone(), &Config::default())
                .unwrap();

        sequential(&mut game, 4, true);
        assert_eq!(game.level(), 5);
        assert!(!game.has_pending());
        assert_eq!(game.host().pending_timers(), 0);
    }
}
