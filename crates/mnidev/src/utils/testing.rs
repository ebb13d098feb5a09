//! Builders for synthetic game data used by the unit tests.

use std::path::Path;

use datalit::datalit;

use crate::{
    game_traits::czone,
    resources::{
        file::directory::{DIRECTORY_SIZE, ENTRY_NAME_LEN},
        types::image::{Color, Image},
    },
};

/// Palette indices of an 8x8 tile, row by row. `None` is a masked pixel.
pub(crate) type TilePixels = [Option<u8>; 64];

/// Encodes one tile in the planar layout the game uses. Masked pixels get
/// all of their plane bits set, so a decoder that ignores the mask would
/// produce color 15 for them.
pub(crate) fn encode_planar_tile(pixels: &TilePixels, masked: bool) -> Vec<u8> {
    let mut data = Vec::with_capacity(if masked { 40 } else { 32 });
    for row in pixels.chunks_exact(8) {
        let mut mask = 0u8;
        let mut planes = [0u8; 4];
        for (x, pixel) in row.iter().enumerate() {
            let bit = 0x80u8 >> x;
            match pixel {
                Some(index) => {
                    for (plane, bits) in planes.iter_mut().enumerate() {
                        if (index >> plane) & 1 != 0 {
                            *bits |= bit;
                        }
                    }
                }
                None => {
                    assert!(masked, "unmasked tiles cannot hold transparent pixels");
                    mask |= bit;
                    for bits in &mut planes {
                        *bits |= bit;
                    }
                }
            }
        }
        if masked {
            data.push(mask);
        }
        data.extend_from_slice(&planes);
    }
    data
}

/// Builds a CZone file where solid tile `i` has attribute `i` and color
/// `i % 16`, and masked tile `j` has attribute `0x4000 | j` and is fully
/// transparent except for its top-left pixel, which has color 12.
pub(crate) fn czone_fixture() -> Vec<u8> {
    let mut data = Vec::with_capacity(czone::TOTAL_BYTES);
    for i in 0..czone::NUM_SOLID_TILES {
        data.extend_from_slice(&u16::try_from(i).unwrap().to_le_bytes());
    }
    for j in 0..czone::NUM_MASKED_TILES {
        data.extend_from_slice(&(0x4000 | u16::try_from(j).unwrap()).to_le_bytes());
        // The skipped words must not shift the following attributes.
        data.extend_from_slice(&[0xEE; 8]);
    }
    for i in 0..czone::NUM_SOLID_TILES {
        let color = u8::try_from(i % 16).unwrap();
        data.extend(encode_planar_tile(&[Some(color); 64], false));
    }
    for _ in 0..czone::NUM_MASKED_TILES {
        let mut pixels = [None; 64];
        pixels[0] = Some(12);
        data.extend(encode_planar_tile(&pixels, true));
    }
    data
}

/// Actor info with two actor ids. Id 0 has one 2x1 tile frame drawn at
/// offset (-2, 3), whose pixels start at offset 8 of
/// [`actor_images_fixture`]. Id 1 is unused.
pub(crate) fn actor_info_fixture() -> Vec<u8> {
    datalit!(
        2u16_le, // actor 0 record at word 2
        0u16_le, // actor 1 unused
        // actor 0
        1u16_le,
        0xFFFFu16_le, // draw index -1
        // frame 0
        0xFFFEu16_le, // x = -2
        3u16_le,
        1u16_le, // height
        2u16_le, // width
        8u32_le, // image offset
        0u32_le,
    )
    .to_vec()
}

/// Actor image data for [`actor_info_fixture`]: the left tile has color 4
/// in its top-left pixel and is otherwise masked, the right tile is all
/// color 9.
pub(crate) fn actor_images_fixture() -> Vec<u8> {
    let mut data = vec![0xAA; 8];
    let mut left = [None; 64];
    left[0] = Some(4);
    data.extend(encode_planar_tile(&left, true));
    data.extend(encode_planar_tile(&[Some(9); 64], true));
    data
}

/// Builds a CMP archive containing the given entries, in order.
pub(crate) fn build_cmp_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut directory = Vec::with_capacity(DIRECTORY_SIZE);
    let mut contents = Vec::new();
    for (name, data) in entries {
        let mut name_bytes = [0u8; ENTRY_NAME_LEN];
        name_bytes[..name.len()].copy_from_slice(name.as_bytes());
        let offset = DIRECTORY_SIZE + contents.len();
        directory.extend_from_slice(&name_bytes);
        directory.extend_from_slice(&u32::try_from(offset).unwrap().to_le_bytes());
        directory.extend_from_slice(&u32::try_from(data.len()).unwrap().to_le_bytes());
        contents.extend_from_slice(data);
    }
    directory.resize(DIRECTORY_SIZE, 0);
    directory.extend(contents);
    directory
}

pub(crate) fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, data).unwrap();
}

pub(crate) fn solid_image(color: Color, width: usize, height: usize) -> Image {
    Image::from_pixels(vec![color; width * height], width, height).unwrap()
}

pub(crate) fn png_bytes(image: &Image) -> Vec<u8> {
    let mut data = Vec::new();
    image.write_png(&mut data).unwrap();
    data
}
