use crate::{
    errors::Result,
    resources::types::image::Color,
    utils::mem_reader::{self, MemReader, SliceMemReader},
};

/// A fixed-size VGA palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette<const N: usize>([Color; N]);

pub type Palette16 = Palette<16>;
pub type Palette256 = Palette<256>;

impl<const N: usize> Palette<N> {
    /// Number of bytes a 6-bit palette of this size occupies on disk.
    pub const DATA_SIZE: usize = N * 3;

    #[must_use]
    pub const fn new(colors: [Color; N]) -> Self {
        Self(colors)
    }

    #[must_use]
    pub fn colors(&self) -> &[Color; N] {
        &self.0
    }

    /// Reads `N` 6-bit RGB triples.
    pub fn read_6bit<M: MemReader>(reader: &mut M) -> mem_reader::Result<Self> {
        if reader.remaining() < Self::DATA_SIZE {
            return Err(reader.create_truncated_error(Self::DATA_SIZE));
        }
        let mut colors = [Color::TRANSPARENT; N];
        for color in &mut colors {
            let r = reader.read_u8()?;
            let g = reader.read_u8()?;
            let b = reader.read_u8()?;
            *color = color_from_6bit(r, g, b);
        }
        Ok(Self(colors))
    }
}

impl<const N: usize> std::ops::Index<usize> for Palette<N> {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.0[index]
    }
}

/// Scales a 6-bit VGA DAC value to the full 8-bit range. Bits above the
/// low six are ignored, as the hardware does.
#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub const fn scale_6bit(value: u8) -> u8 {
    ((value & 0x3F) as u16 * 255 / 63) as u8
}

#[must_use]
pub const fn color_from_6bit(r: u8, g: u8, b: u8) -> Color {
    Color::opaque(scale_6bit(r), scale_6bit(g), scale_6bit(b))
}

pub fn load_6bit_palette16(data: &[u8]) -> Result<Palette16> {
    Ok(Palette16::read_6bit(&mut SliceMemReader::new("palette16", data))?)
}

pub fn load_6bit_palette256(data: &[u8]) -> Result<Palette256> {
    Ok(Palette256::read_6bit(&mut SliceMemReader::new("palette256", data))?)
}

/// The palette the game uses for tiles, sprites and tiled full-screen
/// images: the standard EGA colors.
pub const INGAME_PALETTE: Palette16 = Palette([
    color_from_6bit(0, 0, 0),
    color_from_6bit(0, 0, 42),
    color_from_6bit(0, 42, 0),
    color_from_6bit(0, 42, 42),
    color_from_6bit(42, 0, 0),
    color_from_6bit(42, 0, 42),
    color_from_6bit(42, 21, 0),
    color_from_6bit(42, 42, 42),
    color_from_6bit(21, 21, 21),
    color_from_6bit(21, 21, 63),
    color_from_6bit(21, 63, 21),
    color_from_6bit(21, 63, 63),
    color_from_6bit(63, 21, 21),
    color_from_6bit(63, 21, 63),
    color_from_6bit(63, 63, 21),
    color_from_6bit(63, 63, 63),
]);

#[cfg(test)]
mod tests {
    use datalit::datalit;
    use proptest::prelude::*;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn scales_extremes() {
        let data = datalit!(0u8, 0u8, 0u8, 63u8, 63u8, 63u8);
        let mut full = data.to_vec();
        full.resize(Palette16::DATA_SIZE, 0);
        let palette = load_6bit_palette16(&full).unwrap();
        assert_eq!(palette[0], Color::opaque(0, 0, 0));
        assert_eq!(palette[1], Color::opaque(255, 255, 255));
    }

    #[test]
    fn reads_channels_in_order() {
        let mut data = vec![0u8; Palette16::DATA_SIZE];
        data[3..6].copy_from_slice(&[63, 0, 21]);
        let palette = load_6bit_palette16(&data).unwrap();
        assert_eq!(palette[1], Color::opaque(255, 0, 85));
    }

    #[test]
    fn high_bits_are_ignored() {
        assert_eq!(scale_6bit(0x40 | 63), 255);
        assert_eq!(scale_6bit(0xC0), 0);
    }

    #[test]
    fn short_input_is_truncated() {
        let err = load_6bit_palette16(&[0u8; 47]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedData);
        let err = load_6bit_palette256(&[0u8; 767]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedData);
        assert!(load_6bit_palette256(&[0u8; 768]).is_ok());
    }

    #[test]
    fn ingame_palette_is_opaque() {
        assert_eq!(INGAME_PALETTE[0], Color::opaque(0, 0, 0));
        assert_eq!(INGAME_PALETTE[15], Color::opaque(255, 255, 255));
        assert!(INGAME_PALETTE.colors().iter().all(|c| c.a == 255));
    }

    proptest! {
        #[test]
        fn scaling_is_monotonic_and_pure(a in 0u8..64, b in 0u8..64) {
            prop_assert_eq!(scale_6bit(a), scale_6bit(a));
            if a < b {
                prop_assert!(scale_6bit(a) < scale_6bit(b));
            }
        }

        #[test]
        fn decoding_is_deterministic(data in proptest::collection::vec(any::<u8>(), 48)) {
            let first = load_6bit_palette16(&data).unwrap();
            let second = load_6bit_palette16(&data).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
