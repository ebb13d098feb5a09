//! Replacement images for original assets.
//!
//! A PNG file in the `asset_replacements` directory under the game root can
//! stand in for the pixels of a backdrop, tile set or actor frame. The file
//! is named after the asset it replaces:
//!
//! - `DROP<N>.MNI` is replaced by `backdrop<N>.png`
//! - `CZONE<N>.MNI` is replaced by `tileset<N>.png`
//! - frame `<F>` of actor `<A>` is replaced by `actor<A>_frame<F>.png`
//!
//! Replacements can use full 32-bit color. They never change the data that
//! goes with the pixels, such as tile attributes or actor draw offsets.

use std::path::{Path, PathBuf};

use crate::{ids::ActorId, resources::types::image::Image};

/// Splits `name` into the part between `prefix` and the `.MNI` extension,
/// ignoring ASCII case.
fn strip_asset_name<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    const EXTENSION: &str = ".MNI";
    if name.len() < prefix.len() + EXTENSION.len() || !name.is_ascii() {
        return None;
    }
    let (head, rest) = name.split_at(prefix.len());
    let (middle, ext) = rest.split_at(rest.len() - EXTENSION.len());
    (head.eq_ignore_ascii_case(prefix) && ext.eq_ignore_ascii_case(EXTENSION)).then_some(middle)
}

/// The replacement file name for a backdrop, if `name` is one.
#[must_use]
pub fn backdrop_replacement_name(name: &str) -> Option<String> {
    let number = strip_asset_name(name, "DROP")?;
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("backdrop{number}.png"))
}

/// The replacement file name for a tile set, if `name` is one. Tile sets are
/// numbered with a single digit or letter.
#[must_use]
pub fn tileset_replacement_name(name: &str) -> Option<String> {
    let number = strip_asset_name(name, "CZONE")?;
    match number.as_bytes() {
        [c] if c.is_ascii_alphanumeric() => Some(format!("tileset{number}.png")),
        _ => None,
    }
}

#[must_use]
pub fn actor_frame_replacement_name(id: ActorId, frame: usize) -> String {
    format!("actor{}_frame{frame}.png", id.number())
}

/// The directory holding replacement images.
#[derive(Debug, Clone)]
pub struct ReplacementDir {
    root: PathBuf,
}

impl ReplacementDir {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Loads the named replacement image. A missing or undecodable file
    /// yields `None`, so the caller can fall back to the original asset.
    #[must_use]
    pub fn load(&self, file_name: &str) -> Option<Image> {
        load_png(&self.path(file_name))
    }
}

fn load_png(path: &Path) -> Option<Image> {
    if !path.is_file() {
        log::trace!("No replacement at {}", path.display());
        return None;
    }
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            log::warn!("Failed to read replacement {}: {err}", path.display());
            return None;
        }
    };
    match Image::decode_png(&data) {
        Ok(image) => {
            log::debug!("Using replacement {}", path.display());
            Some(image)
        }
        Err(err) => {
            log::warn!("Ignoring unreadable replacement {}: {err}", path.display());
            None
        }
    }
}
