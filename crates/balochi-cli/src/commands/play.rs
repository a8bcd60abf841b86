//! Interactive play in the terminal.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use balochi_core::{CountingGame, GameKind, GuessGame, MemoryGame, RepetitionGame, RoundEngine};
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use owo_colors::OwoColorize;
use tracing::info;

use super::Context;
use crate::render;
use crate::terminal::{TerminalGuard, TerminalHost};

/// Longest wait for input before timers are checked again.
const MAX_POLL: Duration = Duration::from_millis(250);

/// A session the terminal loop can drive.
trait Playable: RoundEngine<Host = TerminalHost> {
    /// The speaker button.
    fn replay(&mut self);

    fn board(&self) -> String;

    fn status(&self) -> String;
}

impl Playable for MemoryGame<TerminalHost> {
    fn replay(&mut self) {}

    fn board(&self) -> String {
        render::cards(self.cards(), self.columns())
    }

    fn status(&self) -> String {
        format!("level {}  pairs {}/{}", self.level(), self.matched_pairs(), self.level())
    }
}

impl Playable for GuessGame<TerminalHost> {
    fn replay(&mut self) {
        self.replay_prompt();
    }

    fn board(&self) -> String {
        render::items(self.items())
    }

    fn status(&self) -> String {
        format!("{} pictures  rounds won {}", self.level(), self.rounds_won())
    }
}

impl Playable for RepetitionGame<TerminalHost> {
    fn replay(&mut self) {}

    fn board(&self) -> String {
        render::items(self.items())
    }

    fn status(&self) -> String {
        format!(
            "round from #{}  tapped {}/{}",
            self.rule().round_start() + 1,
            self.consumed(),
            self.level()
        )
    }
}

impl Playable for CountingGame<TerminalHost> {
    fn replay(&mut self) {
        self.replay_numeral();
    }

    fn board(&self) -> String {
        render::items(self.items())
    }

    fn status(&self) -> String {
        let numeral = self
            .numeral()
            .map(|n| n.image.as_str().to_string())
            .unwrap_or_default();
        format!("count to {} {}  tapped {}", self.level(), numeral, self.consumed())
    }
}

pub fn run(ctx: &Context, game: GameKind, category: Option<&str>) -> Result<()> {
    let (category, pool) = ctx.pool(game, category)?;
    let host = TerminalHost::from_pack(&ctx.pack);
    info!("Playing {} with category {}", game, category.name);
    let title = format!("{} / {}", game, category.name);

    match game {
        GameKind::Memory => drive(MemoryGame::new(host, pool, &ctx.config)?, &title),
        GameKind::AudioMatch => drive(GuessGame::new(host, pool, &ctx.config)?, &title),
        GameKind::Repetition => drive(
            RepetitionGame::repetition(host, pool, category.intros.clone(), &ctx.config)?,
            &title,
        ),
        GameKind::Counting => drive(
            CountingGame::counting(host, pool, category.numerals.clone(), &ctx.config)?,
            &title,
        ),
        GameKind::Face => {
            bail!("the face game is tapped by coordinates, use `balochi face --tap X,Y`")
        }
    }
}

fn drive<G: Playable>(mut game: G, title: &str) -> Result<()> {
    let mut term = TerminalGuard::enter()?;

    loop {
        let now = Instant::now();
        while let Some(timer) = game.host_mut().take_due(now) {
            game.on_timer(timer);
            game.host_mut().mark_dirty();
        }

        if game.host_mut().take_dirty() {
            draw(term.stdout(), title, &game)?;
        }

        let wait = game
            .host()
            .next_deadline()
            .map(|at| at.saturating_duration_since(Instant::now()).min(MAX_POLL))
            .unwrap_or(MAX_POLL);
        if !event::poll(wait)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Esc => break,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Char(' ') => game.replay(),
            KeyCode::Char(key) => {
                if let Some(position) = render::position_for(key) {
                    game.select_at(position);
                }
            }
            _ => {}
        }
        game.host_mut().mark_dirty();
    }

    game.cancel_pending();
    Ok(())
}

fn draw<G: Playable, W: Write>(out: &mut W, title: &str, game: &G) -> Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    write!(out, "{}\r\n\r\n", title.bold())?;
    write!(out, "{}\r\n", game.board())?;

    let turn = if game.is_accepting() {
        "your turn".green().to_string()
    } else {
        "listen...".yellow().to_string()
    };
    write!(out, "{}  {}\r\n\r\n", game.status(), turn)?;

    for (cue, duration) in game.host().recent_cues() {
        let length = format!("{}ms", duration.as_millis());
        write!(out, "  {} {} {}\r\n", "♪".cyan(), cue, length.dimmed())?;
    }
    write!(out, "\r\n{}\r\n", "a-z select, space replay, esc quit".dimmed())?;
    out.flush()?;
    Ok(())
}
