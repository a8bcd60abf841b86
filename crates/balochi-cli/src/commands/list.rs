use anyhow::Result;
use balochi_core::GameKind;
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;

use super::Context;

pub fn run(ctx: &Context, json: bool) -> Result<()> {
    if json {
        println!("{}", ctx.pack.to_json()?);
        return Ok(());
    }

    for category in &ctx.pack.categories {
        let games: Vec<&'static str> = GameKind::iter()
            .filter(|kind| category.supports(*kind))
            .map(Into::into)
            .collect();
        let games = if games.is_empty() {
            "-".dimmed().to_string()
        } else {
            games.join(", ")
        };
        println!(
            "{:<14} {:>3} templates {:>3} sequence  {}",
            category.name.bold(),
            category.templates.len(),
            category.sequence.len(),
            games
        );
    }
    println!("{:<14} tap the built-in overlay with `balochi face`", "face game".bold());
    Ok(())
}
