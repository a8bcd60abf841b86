use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{hotspot, timing};
use crate::content::AudioRef;
use crate::error::Result;
use crate::hotspot::{HotspotEntry, HotspotMatcher, MatchPolicy, default_table};

/// User settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed shuffle seed; rounds are reproducible when set
    pub seed: Option<u64>,
    pub timing: TimingConfig,
    pub cues: CueConfig,
    pub hotspot: HotspotConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub intro_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            intro_delay_ms: timing::DEFAULT_INTRO_DELAY_MS,
        }
    }
}

/// Fixed feedback cues shared by all games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueConfig {
    pub celebration_short: AudioRef,
    pub celebration_long: AudioRef,
    pub correct_answer: AudioRef,
    pub wrong_answer: AudioRef,
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            celebration_short: AudioRef::from("celebration_short"),
            celebration_long: AudioRef::from("celebration_long"),
            correct_answer: AudioRef::from("correct_answer"),
            wrong_answer: AudioRef::from("wrong_answer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotspotConfig {
    pub tolerance: u8,
    pub policy: MatchPolicy,
    pub table: Vec<HotspotEntry>,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            tolerance: hotspot::DEFAULT_TOLERANCE,
            policy: MatchPolicy::default(),
            table: default_table(),
        }
    }
}

impl HotspotConfig {
    pub fn matcher(&self) -> HotspotMatcher {
        HotspotMatcher::new(self.table.clone(), self.tolerance, self.policy)
    }
}

impl Config {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn intro_delay(&self) -> Duration {
        Duration::from_millis(self.timing.intro_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::Error;
    use crate::hotspot::Rgb;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.intro_delay(), Duration::from_millis(800));
        assert_eq!(config.cues.celebration_long.as_str(), "celebration_long");
        assert_eq!(config.hotspot.tolerance, 25);
        assert_eq!(config.hotspot.policy, MatchPolicy::FirstMatch);
        assert_eq!(config.hotspot.table.len(), 10);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse(
            r##"
seed = 42

[timing]
intro_delay_ms = 300

[cues]
wrong_answer = "buzzer"

[hotspot]
policy = "all-matches"
table = [{ color = "#102030", audio = "chin" }]
"##,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.intro_delay(), Duration::from_millis(300));
        assert_eq!(config.cues.wrong_answer.as_str(), "buzzer");
        assert_eq!(config.cues.correct_answer.as_str(), "correct_answer");
        assert_eq!(config.hotspot.policy, MatchPolicy::AllMatches);
        assert_eq!(config.hotspot.tolerance, 25);
        assert_eq!(
            config.hotspot.table,
            vec![HotspotEntry::new(Rgb::new(0x10, 0x20, 0x30), "chin")]
        );
    }

    #[test]
    fn test_invalid_color_rejected() {
        let result = Config::parse("[hotspot]\ntable = [{ color = \"red\", audio = \"x\" }]");
        assert!(matches!(result, Err(Error::ConfigParseError(_))));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = Config::parse("[hotspot]\npolicy = \"closest\"");
        assert!(matches!(result, Err(Error::ConfigParseError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[hotspot]\ntolerance = 10").unwrap();

        let config = Config::load(file.path()).unwrap();
        let matcher = config.hotspot.matcher();
        assert_eq!(matcher.tolerance(), 10);
        assert!(matcher.classify(Rgb::new(0xF0, 0x00, 0x00)).is_none());
        assert!(matcher.classify(Rgb::new(0xF8, 0x00, 0x00)).is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/balochi.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
