//! Provides tools for reading the packed assets of Duke Nukem II.
//!
//! This covers the low-level formats stored in the game's `NUKEM2.CMP`
//! archive (EGA planar images, tile sets, VGA palettes, Creative Voice
//! sounds, AdLib sound effects and IMF music) and a [`ResourceLoader`] that
//! decides, for every asset, whether it comes from a loose file in the game
//! directory, a modern replacement image, or the archive itself.
//!
//! [`ResourceLoader`]: resources::loader::ResourceLoader

pub mod errors;
pub mod game_traits;
pub mod ids;
pub mod resources;
pub mod utils;

pub use errors::{Error, ErrorKind};
