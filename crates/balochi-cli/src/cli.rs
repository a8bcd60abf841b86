//! CLI argument definitions for balochi.

use std::path::PathBuf;

use balochi_core::GameKind;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "balochi")]
#[command(about = "Balochi vocabulary mini-games", version)]
pub struct Args {
    /// Settings file (TOML)
    #[arg(long, value_name = "FILE", env = "BALOCHI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Content pack (TOML, or JSON with a .json extension)
    #[arg(long, value_name = "FILE", env = "BALOCHI_CONTENT")]
    pub content: Option<PathBuf>,

    /// Shuffle seed (overrides the settings file)
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List content categories and the games they support
    List {
        /// Print the whole content pack as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play a game in the terminal
    Play {
        /// memory, audio-match, repetition or counting
        game: GameKind,
        /// Content category (default: first one that supports the game)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Run a scripted player on a virtual clock and print the level trace
    Simulate {
        /// memory, audio-match, repetition or counting
        game: GameKind,
        /// Content category (default: first one that supports the game)
        #[arg(short, long)]
        category: Option<String>,
        /// Number of rounds to play
        #[arg(short, long, default_value = "10")]
        rounds: usize,
        /// Make one wrong move per round
        #[arg(long)]
        mistakes: bool,
    },
    /// Tap the built-in face overlay
    Face {
        /// Tap position as X,Y (repeatable)
        #[arg(long = "tap", value_name = "X,Y", value_parser = parse_point, required = true)]
        taps: Vec<(u32, u32)>,
    },
}

/// Parse an `X,Y` pair.
pub fn parse_point(s: &str) -> Result<(u32, u32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid X coordinate '{}'", x))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid Y coordinate '{}'", y))?;
    Ok((x, y))
}
