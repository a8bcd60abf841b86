mod cli;
mod commands;
mod render;
mod terminal;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Default to warnings only when RUST_LOG is unset
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("balochi=warn,balochi_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = commands::Context::load(
        args.config.as_deref(),
        args.content.as_deref(),
        args.seed,
    )?;

    match args.command {
        Command::List { json } => commands::list::run(&ctx, json),
        Command::Play { game, category } => commands::play::run(&ctx, game, category.as_deref()),
        Command::Simulate {
            game,
            category,
            rounds,
            mistakes,
        } => commands::simulate::run(&ctx, game, category.as_deref(), rounds, mistakes),
        Command::Face { taps } => commands::face::run(&ctx, &taps),
    }
}
