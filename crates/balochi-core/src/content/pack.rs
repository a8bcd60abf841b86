use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::levels;
use crate::content::{AudioRef, Pool, Template};
use crate::engine::GameKind;
use crate::error::{Error, Result};

const BUILTIN_PACK: &str = include_str!("builtin.toml");

/// One content category (colors, family, ...) and the material each game draws from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Memory and audio-match templates
    #[serde(default)]
    pub templates: Vec<Template>,
    /// Repetition and counting templates, in presentation order
    #[serde(default)]
    pub sequence: Vec<Template>,
    /// Repetition intro cue per round
    #[serde(default)]
    pub intros: Vec<AudioRef>,
    /// Counting numerals, `numerals[n - 1]` is the numeral for n
    #[serde(default)]
    pub numerals: Vec<Template>,
}

impl Category {
    /// Whether this category has enough material to run `kind`.
    pub fn supports(&self, kind: GameKind) -> bool {
        match kind {
            GameKind::Memory => self.templates.len() >= levels::memory_top(),
            GameKind::AudioMatch => self.templates.len() >= levels::GUESS_HIGH,
            GameKind::Repetition => self.sequence.len() >= levels::REPETITION_ROUND_SIZE,
            GameKind::Counting => !self.sequence.is_empty() && !self.numerals.is_empty(),
            GameKind::Face => false,
        }
    }

    /// Build the pool `kind` draws its rounds from.
    pub fn pool_for(&self, kind: GameKind, seed: Option<u64>) -> Result<Pool> {
        let templates = match kind {
            GameKind::Memory | GameKind::AudioMatch => self.templates.clone(),
            GameKind::Repetition | GameKind::Counting => self.sequence.clone(),
            GameKind::Face => Vec::new(),
        };
        Pool::seeded(templates, seed)
    }
}

/// Collection of categories plus the clip durations hosts report for cues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPack {
    /// Clip durations in milliseconds
    #[serde(default)]
    pub durations: BTreeMap<AudioRef, u64>,
    #[serde(default, rename = "category")]
    pub categories: Vec<Category>,
}

impl ContentPack {
    /// The pack compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Self::parse_toml(BUILTIN_PACK)
    }

    /// Load a pack from file. `.json` files are read as JSON, anything else as TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_toml(&content)
        }
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ContentParseError(e.message().to_string()))
    }

    pub fn parse_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn category(&self, name: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::CategoryNotFound(name.to_string()))
    }

    /// First category able to run `kind`.
    pub fn first_supporting(&self, kind: GameKind) -> Option<&Category> {
        self.categories.iter().find(|c| c.supports(kind))
    }

    pub fn duration_of(&self, audio: &AudioRef) -> Option<Duration> {
        self.durations.get(audio).map(|&ms| Duration::from_millis(ms))
    }
}
