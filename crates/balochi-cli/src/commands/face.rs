use anyhow::Result;
use balochi_core::host::{MockHost, settle};
use balochi_core::hotspot::{FACE_REGIONS, Region};
use balochi_core::{FaceGame, PixelSampler, Raster, Session};
use owo_colors::OwoColorize;

use super::Context;

/// Topmost region of the built-in face under `(x, y)`.
fn region_at(x: u32, y: u32) -> Option<&'static Region> {
    let regions: &'static [Region] = &FACE_REGIONS;
    regions
        .iter()
        .rev()
        .find(|r| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
}

pub fn run(ctx: &Context, taps: &[(u32, u32)]) -> Result<()> {
    let host = MockHost::from_pack(&ctx.pack);
    let mut game = FaceGame::new(host, Raster::face(), ctx.config.hotspot.matcher());

    for &(x, y) in taps {
        let area = region_at(x, y).map(|r| r.name).unwrap_or("background");
        let color = match game.sampler().sample(x, y) {
            Some(color) => color.to_string(),
            None => "outside".to_string(),
        };

        let before = game.host().played().len();
        game.tap(x, y);
        let cues = &game.host().played()[before..];
        let heard = if cues.is_empty() {
            "no hotspot".dimmed().to_string()
        } else {
            cues.iter()
                .map(|c| c.as_str().cyan().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("({:>2},{:>2}) {:<10} {:<8} {}", x, y, area, color, heard);
        settle(&mut game);
    }
    Ok(())
}
