//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod face;
pub mod list;
pub mod play;
pub mod simulate;

use std::path::Path;

use anyhow::{Context as _, Result, bail};
use balochi_core::{Category, Config, ContentPack, GameKind, Pool};
use tracing::info;

/// Settings and content shared by every command.
pub struct Context {
    pub config: Config,
    pub pack: ContentPack,
}

impl Context {
    pub fn load(config: Option<&Path>, content: Option<&Path>, seed: Option<u64>) -> Result<Self> {
        let mut config = match config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => Config::default(),
        };
        if seed.is_some() {
            config.seed = seed;
        }

        let pack = match content {
            Some(path) => {
                let pack = ContentPack::load(path)
                    .with_context(|| format!("failed to load content from {}", path.display()))?;
                info!("Loaded {} categories from {}", pack.categories.len(), path.display());
                pack
            }
            None => ContentPack::builtin().context("built-in content pack is invalid")?,
        };

        Ok(Self { config, pack })
    }

    /// Pick the category for `kind` and build its pool.
    pub fn pool(&self, kind: GameKind, category: Option<&str>) -> Result<(&Category, Pool)> {
        let category = match category {
            Some(name) => self.pack.category(name)?,
            None => match self.pack.first_supporting(kind) {
                Some(category) => category,
                None => bail!("no category supports {}", kind),
            },
        };
        if !category.supports(kind) {
            bail!("category '{}' has no content for {}", category.name, kind);
        }
        let pool = category.pool_for(kind, self.config.seed)?;
        Ok((category, pool))
    }
}
