pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod host;
pub mod hotspot;
pub mod progression;

pub use config::Config;
pub use content::{
    AudioRef, Card, CardFace, Category, ContentPack, ImageRef, Item, Pool, Template,
};
pub use engine::{
    CountingGame, GameKind, GuessGame, MemoryGame, RepetitionGame, RevealRule, RoundEngine,
    SelectionGate, SequentialGame, Session,
};
pub use error::{Error, Result};
pub use host::{AudioService, Host, Scheduler, TimerId, ViewAdapter};
pub use hotspot::{FaceGame, HotspotMatcher, MatchPolicy, PixelSampler, Raster, Rgb};
pub use progression::{Advance, Progression};
