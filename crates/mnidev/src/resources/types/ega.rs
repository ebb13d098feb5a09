//! Decoders for EGA bit-plane image data.
//!
//! EGA images store each pixel's 4-bit color index spread over four planes
//! (blue, green, red, intensity). Within a plane byte, the most significant
//! bit is the leftmost pixel.

use crate::{
    errors::{Error, Result},
    game_traits::{EGA_PLANES, PIXELS_PER_EGA_BYTE, TILE_SIZE_PX},
    resources::types::{
        image::{Color, Image, pixel_count},
        palette::Palette16,
    },
    utils::mem_reader::{MemReader, SliceMemReader},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileImageType {
    /// Four planes per row, every pixel opaque.
    Unmasked,
    /// A mask byte followed by four planes per row. Pixels with their mask
    /// bit set are not drawn.
    Masked,
}

impl TileImageType {
    #[must_use]
    pub const fn bytes_per_row(self) -> usize {
        match self {
            TileImageType::Unmasked => EGA_PLANES,
            TileImageType::Masked => EGA_PLANES + 1,
        }
    }

    #[must_use]
    pub const fn bytes_per_tile(self) -> usize {
        self.bytes_per_row() * TILE_SIZE_PX
    }
}

fn color_index(planes: &[u8; EGA_PLANES], shift: usize) -> usize {
    planes
        .iter()
        .enumerate()
        .map(|(plane, bits)| usize::from((bits >> shift) & 1) << plane)
        .sum()
}

/// Decodes a single 8x8 tile into `image` with its top-left pixel at
/// `(x, y)`.
fn decode_tile<M: MemReader>(
    reader: &mut M,
    palette: &Palette16,
    image_type: TileImageType,
    image: &mut Image,
    (x, y): (usize, usize),
) -> Result<()> {
    let mut pixels = Vec::with_capacity(TILE_SIZE_PX * TILE_SIZE_PX);
    for _ in 0..TILE_SIZE_PX {
        let mask = match image_type {
            TileImageType::Masked => reader.read_u8()?,
            TileImageType::Unmasked => 0,
        };
        let mut planes = [0u8; EGA_PLANES];
        reader.read_exact(&mut planes)?;

        for bit in 0..PIXELS_PER_EGA_BYTE {
            let shift = PIXELS_PER_EGA_BYTE - 1 - bit;
            if (mask >> shift) & 1 != 0 {
                pixels.push(Color::TRANSPARENT);
            } else {
                pixels.push(palette[color_index(&planes, shift)]);
            }
        }
    }
    image.insert_image(x, y, &Image::from_pixels(pixels, TILE_SIZE_PX, TILE_SIZE_PX)?);
    Ok(())
}

/// Decodes a sequence of 8x8 planar tiles into one image, `width_in_tiles`
/// tiles wide. Tiles are placed left to right, then top to bottom. An
/// incomplete last row leaves the remaining cells transparent.
pub fn decode_planar_ega_buffer(
    data: &[u8],
    palette: &Palette16,
    width_in_tiles: usize,
    image_type: TileImageType,
) -> Result<Image> {
    if width_in_tiles == 0 {
        return Err(Error::InvalidArgument(
            "Tiled image must be at least one tile wide".into(),
        ));
    }
    let mut reader = SliceMemReader::new("planar_tiles", data);
    let tile_bytes = image_type.bytes_per_tile();
    reader.ensure_remaining_multiple_of(tile_bytes)?;

    let num_tiles = data.len() / tile_bytes;
    let height_in_tiles = num_tiles.div_ceil(width_in_tiles);
    let to_pixels = |tiles: usize| {
        tiles.checked_mul(TILE_SIZE_PX).ok_or_else(|| {
            Error::InvalidArgument(format!("{tiles} tiles do not fit in an image"))
        })
    };
    let mut image = Image::new(to_pixels(width_in_tiles)?, to_pixels(height_in_tiles)?)?;
    for index in 0..num_tiles {
        let x = (index % width_in_tiles) * TILE_SIZE_PX;
        let y = (index / width_in_tiles) * TILE_SIZE_PX;
        decode_tile(&mut reader, palette, image_type, &mut image, (x, y))?;
    }
    Ok(image)
}

/// Decodes a non-tiled planar image, where each plane covers the whole
/// image: all of plane 0, then all of plane 1 and so on.
pub fn decode_simple_planar_ega_buffer(
    data: &[u8],
    palette: &Palette16,
    width: usize,
    height: usize,
) -> Result<Image> {
    let num_pixels = pixel_count(width, height)?;
    if num_pixels % PIXELS_PER_EGA_BYTE != 0 {
        return Err(Error::InvalidArgument(format!(
            "A {width}x{height} image does not fill whole plane bytes"
        )));
    }
    let plane_size = num_pixels / PIXELS_PER_EGA_BYTE;
    let mut reader = SliceMemReader::new("planar_image", data);
    let mut planes = Vec::with_capacity(EGA_PLANES);
    for _ in 0..EGA_PLANES {
        planes.push(reader.read_bytes(plane_size)?);
    }

    let pixels = (0..num_pixels)
        .map(|i| {
            let byte = i / PIXELS_PER_EGA_BYTE;
            let shift = PIXELS_PER_EGA_BYTE - 1 - i % PIXELS_PER_EGA_BYTE;
            let bits = [
                planes[0][byte],
                planes[1][byte],
                planes[2][byte],
                planes[3][byte],
            ];
            palette[color_index(&bits, shift)]
        })
        .collect();
    Image::from_pixels(pixels, width, height)
}
