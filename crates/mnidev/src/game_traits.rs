//! Fixed properties of the game's data: screen geometry, tile-set layout and
//! well-known file names.

pub const TILE_SIZE_PX: usize = 8;

pub const VIEWPORT_WIDTH_PX: usize = 320;
pub const VIEWPORT_HEIGHT_PX: usize = 200;
pub const VIEWPORT_WIDTH_TILES: usize = VIEWPORT_WIDTH_PX / TILE_SIZE_PX;
pub const VIEWPORT_HEIGHT_TILES: usize = VIEWPORT_HEIGHT_PX / TILE_SIZE_PX;

pub const EGA_PLANES: usize = 4;
pub const PIXELS_PER_EGA_BYTE: usize = 8;

/// Size of the planar pixel region of a full-screen image. The 16-color
/// palette follows it.
pub const FULL_SCREEN_IMAGE_DATA_SIZE: usize =
    (VIEWPORT_WIDTH_PX * VIEWPORT_HEIGHT_PX) / (PIXELS_PER_EGA_BYTE / EGA_PLANES);

/// AdLib sound effects are stored after the PC speaker versions of the same
/// effects in the audio dictionary.
pub const ADLIB_SOUNDS_BASE: usize = 34;

pub const ADLIB_SOUND_TICK_RATE_HZ: u32 = 140;
pub const MUSIC_TICK_RATE_HZ: u32 = 280;

#[must_use]
pub const fn tiles_to_pixels(tiles: usize) -> usize {
    tiles * TILE_SIZE_PX
}

pub mod czone {
    use super::{EGA_PLANES, TILE_SIZE_PX, VIEWPORT_WIDTH_TILES};

    pub const NUM_SOLID_TILES: usize = 1000;
    pub const NUM_MASKED_TILES: usize = 160;
    pub const NUM_TILES_TOTAL: usize = NUM_SOLID_TILES + NUM_MASKED_TILES;

    pub const TILE_BYTES: usize = TILE_SIZE_PX * EGA_PLANES;
    pub const MASKED_TILE_BYTES: usize = TILE_SIZE_PX * (EGA_PLANES + 1);

    pub const ATTRIBUTE_BYTES_SOLID: usize = 2;
    /// Masked tiles carry four extra words after their attribute.
    pub const ATTRIBUTE_BYTES_MASKED: usize = 2 * 5;
    pub const ATTRIBUTE_BYTES_TOTAL: usize =
        NUM_SOLID_TILES * ATTRIBUTE_BYTES_SOLID + NUM_MASKED_TILES * ATTRIBUTE_BYTES_MASKED;

    pub const TILE_SET_IMAGE_WIDTH: usize = VIEWPORT_WIDTH_TILES;
    pub const SOLID_TILES_IMAGE_HEIGHT: usize = NUM_SOLID_TILES / TILE_SET_IMAGE_WIDTH;
    pub const MASKED_TILES_IMAGE_HEIGHT: usize = NUM_MASKED_TILES / TILE_SET_IMAGE_WIDTH;
    pub const TILE_SET_IMAGE_HEIGHT: usize = SOLID_TILES_IMAGE_HEIGHT + MASKED_TILES_IMAGE_HEIGHT;

    pub const TOTAL_BYTES: usize =
        ATTRIBUTE_BYTES_TOTAL + NUM_SOLID_TILES * TILE_BYTES + NUM_MASKED_TILES * MASKED_TILE_BYTES;
}

pub mod files {
    pub const MAIN_ARCHIVE: &str = "NUKEM2.CMP";
    pub const ANTI_PIRACY_SCREEN: &str = "LCR.MNI";
    pub const AUDIO_DICT: &str = "AUDIOHED.MNI";
    pub const AUDIO_DATA: &str = "AUDIOT.MNI";
    pub const ACTOR_INFO: &str = "ACTRINFO.MNI";
    pub const ACTOR_IMAGES: &str = "ACTORS.MNI";

    /// Directory, relative to the game root, holding modern replacement
    /// images.
    pub const ASSET_REPLACEMENTS_DIR: &str = "asset_replacements";
}
