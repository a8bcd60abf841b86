//! Game content: asset references, round items and the pools they are drawn from.
//!
//! - `Template` - reusable (image, audio) pair supplied by a content pack
//! - `Item` / `Card` - per-round copies of a template with their own state
//! - `Pool` - the session's templates plus the shuffling RNG
//! - `ContentPack` - categories of templates loaded from TOML or JSON

mod item;
mod pack;
mod pool;

pub use item::*;
pub use pack::*;
pub use pool::*;
