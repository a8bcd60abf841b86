//! Hotspot color matching for the face game.
//!
//! A tap on the face picture is resolved by sampling the pixel under the tap
//! on a hidden color-coded overlay and looking the color up in a fixed table
//! of `(reference color, audio cue)` entries.

mod face;
mod sampler;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::config::hotspot::DEFAULT_TOLERANCE;
use crate::content::AudioRef;
use crate::error::{Error, Result};

pub use face::FaceGame;
pub use sampler::{FACE_REGIONS, PixelSampler, Raster, Region};

/// 8-bit RGB color, written as `#RRGGBB` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const DARK_GRAY: Rgb = Rgb::new(0x44, 0x44, 0x44);
    pub const GRAY: Rgb = Rgb::new(0x88, 0x88, 0x88);
    pub const LIGHT_GRAY: Rgb = Rgb::new(0xCC, 0xCC, 0xCC);
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);
    pub const GREEN: Rgb = Rgb::new(0x00, 0xFF, 0x00);
    pub const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xFF);
    pub const YELLOW: Rgb = Rgb::new(0xFF, 0xFF, 0x00);
    pub const CYAN: Rgb = Rgb::new(0x00, 0xFF, 0xFF);
    pub const MAGENTA: Rgb = Rgb::new(0xFF, 0x00, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Drop the alpha channel of a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }

    /// True when every channel differs from `other` by at most `tolerance`.
    pub fn close_to(&self, other: &Rgb, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// What to do when several table entries match one sample.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MatchPolicy {
    /// Only the first matching entry, in table order, fires.
    #[default]
    FirstMatch,
    /// Every matching entry fires, in table order.
    AllMatches,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotspotEntry {
    pub color: Rgb,
    pub audio: AudioRef,
}

impl HotspotEntry {
    pub fn new(color: Rgb, audio: impl Into<AudioRef>) -> Self {
        Self {
            color,
            audio: audio.into(),
        }
    }
}

/// Reference table of the face overlay.
pub fn default_table() -> Vec<HotspotEntry> {
    vec![
        HotspotEntry::new(Rgb::RED, "colors_red"),
        HotspotEntry::new(Rgb::MAGENTA, "colors_white"),
        HotspotEntry::new(Rgb::GREEN, "colors_green"),
        HotspotEntry::new(Rgb::BLUE, "colors_blue"),
        HotspotEntry::new(Rgb::BLACK, "colors_black"),
        HotspotEntry::new(Rgb::YELLOW, "colors_yellow"),
        HotspotEntry::new(Rgb::LIGHT_GRAY, "colors_grey"),
        HotspotEntry::new(Rgb::GRAY, "colors_grey"),
        HotspotEntry::new(Rgb::DARK_GRAY, "colors_grey"),
        HotspotEntry::new(Rgb::CYAN, "colors_blue"),
    ]
}

/// Classifies sampled colors against the reference table.
#[derive(Debug, Clone)]
pub struct HotspotMatcher {
    table: Vec<HotspotEntry>,
    tolerance: u8,
    policy: MatchPolicy,
}

impl HotspotMatcher {
    pub fn new(table: Vec<HotspotEntry>, tolerance: u8, policy: MatchPolicy) -> Self {
        Self {
            table,
            tolerance,
            policy,
        }
    }

    pub fn table(&self) -> &[HotspotEntry] {
        &self.table
    }

    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }

    /// Cue of the first matching entry.
    pub fn classify(&self, sample: Rgb) -> Option<&AudioRef> {
        self.table
            .iter()
            .find(|e| e.color.close_to(&sample, self.tolerance))
            .map(|e| &e.audio)
    }

    /// Cues to play for `sample` under the configured policy, in table order.
    pub fn matches(&self, sample: Rgb) -> Vec<&AudioRef> {
        let hits = self
            .table
            .iter()
            .filter(|e| e.color.close_to(&sample, self.tolerance))
            .map(|e| &e.audio);
        match self.policy {
            MatchPolicy::FirstMatch => hits.take(1).collect(),
            MatchPolicy::AllMatches => hits.collect(),
        }
    }
}

impl Default for HotspotMatcher {
    fn default() -> Self {
        Self::new(default_table(), DEFAULT_TOLERANCE, MatchPolicy::default())
    }
}
