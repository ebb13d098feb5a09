use std::io::Write;

use crate::errors::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// The value of pixels that are not drawn.
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// The number of pixels in a `width` x `height` image, if it fits in memory
/// at all.
pub(crate) fn pixel_count(width: usize, height: usize) -> Result<usize> {
    width.checked_mul(height).ok_or_else(|| {
        Error::InvalidArgument(format!("A {width}x{height} image has too many pixels"))
    })
}

/// A rectangular buffer of pixels, stored row by row.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Image {
    /// Creates a fully transparent image.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; pixel_count(width, height)?],
        })
    }

    pub fn from_pixels(pixels: Vec<Color>, width: usize, height: usize) -> Result<Self> {
        if pixels.len() != pixel_count(width, height)? {
            return Err(Error::InvalidArgument(format!(
                "{} pixels do not make up a {width}x{height} image",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[must_use]
    pub fn pixel_at(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[x + y * self.width])
    }

    /// Copies `image` into this one with its top-left corner at `(x, y)`.
    /// Whatever falls outside of this image is dropped.
    pub fn insert_image(&mut self, x: usize, y: usize, image: &Image) {
        if x >= self.width || y >= self.height {
            return;
        }
        let copy_width = image.width.min(self.width - x);
        let copy_height = image.height.min(self.height - y);
        for row in 0..copy_height {
            let src_start = row * image.width;
            let dest_start = x + (y + row) * self.width;
            self.pixels[dest_start..dest_start + copy_width]
                .copy_from_slice(&image.pixels[src_start..src_start + copy_width]);
        }
    }

    /// Extracts the `width` x `height` region at `(x, y)`. Parts outside of
    /// this image come out transparent.
    pub fn sub_image(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Image> {
        let mut result = Image::new(width, height)?;
        for row in 0..height {
            for col in 0..width {
                if let (Some(px), Some(py)) = (x.checked_add(col), y.checked_add(row))
                    && let Some(color) = self.pixel_at(px, py)
                {
                    result.pixels[col + row * width] = color;
                }
            }
        }
        Ok(result)
    }

    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect()
    }

    /// Decodes a PNG file of any color type and bit depth.
    pub fn decode_png(data: &[u8]) -> Result<Image> {
        let mut decoder = png::Decoder::new(std::io::Cursor::new(data));
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let bytes = &buf[..info.buffer_size()];

        let width = info.width as usize;
        let height = info.height as usize;
        let pixels: Vec<Color> = match info.color_type {
            png::ColorType::Rgba => bytes
                .chunks_exact(4)
                .map(|p| Color::new(p[0], p[1], p[2], p[3]))
                .collect(),
            png::ColorType::Rgb => bytes
                .chunks_exact(3)
                .map(|p| Color::opaque(p[0], p[1], p[2]))
                .collect(),
            png::ColorType::GrayscaleAlpha => bytes
                .chunks_exact(2)
                .map(|p| Color::new(p[0], p[0], p[0], p[1]))
                .collect(),
            png::ColorType::Grayscale => bytes.iter().map(|&v| Color::opaque(v, v, v)).collect(),
            png::ColorType::Indexed => {
                return Err(Error::InvalidData {
                    context: "png".into(),
                    message: "indexed image was not expanded".into(),
                });
            }
        };
        Image::from_pixels(pixels, width, height)
    }

    /// Writes the image as an 8-bit RGBA PNG.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        let to_u32 = |v: usize| {
            u32::try_from(v)
                .map_err(|_| Error::InvalidArgument(format!("Image dimension {v} too large")))
        };
        let mut encoder = png::Encoder::new(writer, to_u32(self.width)?, to_u32(self.height)?);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.to_rgba_bytes())?;
        writer.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solid_image as solid;

    #[test]
    fn from_pixels_checks_size() {
        let err = Image::from_pixels(vec![Color::TRANSPARENT; 5], 2, 3).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let err = Image::new(usize::MAX, 2).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
        let err = Image::from_pixels(Vec::new(), 2, usize::MAX).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn sub_image_far_outside_is_transparent() {
        let image = solid(Color::opaque(1, 1, 1), 2, 2);
        let sub = image.sub_image(usize::MAX, 0, 2, 1).unwrap();
        assert!(sub.pixels().iter().all(Color::is_transparent));
    }

    #[test]
    fn insert_image_places_pixels() {
        let red = Color::opaque(255, 0, 0);
        let mut target = Image::new(4, 4).unwrap();
        target.insert_image(1, 2, &solid(red, 2, 2));
        for y in 0..4 {
            for x in 0..4 {
                let expected = if (1..3).contains(&x) && (2..4).contains(&y) {
                    red
                } else {
                    Color::TRANSPARENT
                };
                assert_eq!(target.pixel_at(x, y), Some(expected), "at {x},{y}");
            }
        }
    }

    #[test]
    fn insert_image_clips() {
        let blue = Color::opaque(0, 0, 255);
        let mut target = Image::new(3, 3).unwrap();
        target.insert_image(2, 2, &solid(blue, 5, 5));
        assert_eq!(target.pixel_at(2, 2), Some(blue));
        assert_eq!(target.pixel_at(1, 2), Some(Color::TRANSPARENT));
        assert_eq!(target.pixels().len(), 9);

        // Entirely outside.
        target.insert_image(3, 0, &solid(blue, 1, 1));
        assert_eq!(target.pixels().iter().filter(|c| **c == blue).count(), 1);
    }

    #[test]
    fn sub_image_extracts_region() {
        let mut image = Image::new(4, 4).unwrap();
        image.insert_image(2, 2, &solid(Color::opaque(1, 2, 3), 2, 2));
        let sub = image.sub_image(2, 2, 3, 3).unwrap();
        assert_eq!(sub.pixel_at(0, 0), Some(Color::opaque(1, 2, 3)));
        assert_eq!(sub.pixel_at(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn png_round_trip() {
        let mut image = Image::new(3, 2).unwrap();
        image.insert_image(0, 0, &solid(Color::new(10, 20, 30, 40), 2, 1));
        image.insert_image(2, 1, &solid(Color::opaque(200, 100, 50), 1, 1));
        let mut data = Vec::new();
        image.write_png(&mut data).unwrap();
        assert_eq!(Image::decode_png(&data).unwrap(), image);
    }

    #[test]
    fn decode_png_rejects_garbage() {
        let err = Image::decode_png(b"definitely not a png").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Png);
    }
}
