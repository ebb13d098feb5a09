use bitflags::bitflags;

use crate::{
    errors::Result,
    game_traits::{czone, tiles_to_pixels},
    resources::types::{
        ega::{TileImageType, decode_planar_ega_buffer},
        image::Image,
        palette::INGAME_PALETTE,
    },
    utils::mem_reader::{self, MemReader, SliceMemReader},
};

/// Index of a tile within a tile set. Solid tiles come first, followed by
/// the masked tiles.
pub type TileIndex = u32;

#[expect(clippy::cast_possible_truncation)]
pub const NUM_TILES_TOTAL: TileIndex = czone::NUM_TILES_TOTAL as TileIndex;

bitflags! {
    /// Collision and behavior flags of a tile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TileAttributes: u16 {
        const SOLID_TOP = 0x0001;
        const SOLID_BOTTOM = 0x0002;
        const SOLID_RIGHT = 0x0004;
        const SOLID_LEFT = 0x0008;
        const ANIMATED = 0x0010;
        const FOREGROUND = 0x0020;
        const FLAMMABLE = 0x0040;
        const CLIMBABLE = 0x0080;
        const CONVEYOR_LEFT = 0x0100;
        const CONVEYOR_RIGHT = 0x0200;
        const FAST_ANIMATION = 0x0400;
        const LADDER = 0x4000;
    }
}

/// The attribute word of every tile in a tile set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileAttributeDict {
    attributes: Vec<u16>,
}

impl TileAttributeDict {
    #[must_use]
    pub fn new(attributes: Vec<u16>) -> Self {
        Self { attributes }
    }

    /// Reads the attribute region of a CZone file. Masked tiles have four
    /// more words after their attribute, which are skipped.
    pub fn read_from<M: MemReader>(reader: &mut M) -> mem_reader::Result<Self> {
        let mut attributes = Vec::with_capacity(czone::NUM_TILES_TOTAL);
        for index in 0..czone::NUM_TILES_TOTAL {
            attributes.push(reader.read_u16_le()?);
            if index >= czone::NUM_SOLID_TILES {
                reader.skip(czone::ATTRIBUTE_BYTES_MASKED - czone::ATTRIBUTE_BYTES_SOLID)?;
            }
        }
        Ok(Self { attributes })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// The raw attribute word of a tile, or `None` past the end of the set.
    #[must_use]
    pub fn raw_attributes(&self, index: TileIndex) -> Option<u16> {
        self.attributes.get(usize::try_from(index).ok()?).copied()
    }

    /// The attributes of a tile. Tiles past the end of the set have none.
    #[must_use]
    pub fn attributes(&self, index: TileIndex) -> TileAttributes {
        self.raw_attributes(index)
            .map_or(TileAttributes::empty(), TileAttributes::from_bits_retain)
    }

    #[must_use]
    pub fn has_attributes(&self, index: TileIndex, flags: TileAttributes) -> bool {
        self.attributes(index).contains(flags)
    }

    #[must_use]
    pub fn is_solid_top(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::SOLID_TOP)
    }

    #[must_use]
    pub fn is_solid_bottom(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::SOLID_BOTTOM)
    }

    #[must_use]
    pub fn is_solid_left(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::SOLID_LEFT)
    }

    #[must_use]
    pub fn is_solid_right(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::SOLID_RIGHT)
    }

    #[must_use]
    pub fn is_animated(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::ANIMATED)
    }

    #[must_use]
    pub fn is_fast_animation(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::FAST_ANIMATION)
    }

    #[must_use]
    pub fn is_foreground(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::FOREGROUND)
    }

    #[must_use]
    pub fn is_flammable(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::FLAMMABLE)
    }

    #[must_use]
    pub fn is_climbable(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::CLIMBABLE)
    }

    #[must_use]
    pub fn is_ladder(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::LADDER)
    }

    #[must_use]
    pub fn is_conveyor_left(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::CONVEYOR_LEFT)
    }

    #[must_use]
    pub fn is_conveyor_right(&self, index: TileIndex) -> bool {
        self.has_attributes(index, TileAttributes::CONVEYOR_RIGHT)
    }
}

/// A decoded tile set: one image holding every tile (solid tiles above the
/// masked ones) and the attributes of each tile.
#[derive(Debug, Clone)]
pub struct TileSet {
    image: Image,
    attributes: TileAttributeDict,
}

impl TileSet {
    #[must_use]
    pub fn new(image: Image, attributes: TileAttributeDict) -> Self {
        Self { image, attributes }
    }

    /// Reads only the attribute region of a CZone file.
    pub fn read_attributes(data: &[u8]) -> Result<TileAttributeDict> {
        let mut reader = SliceMemReader::new("czone", data);
        let mut attribute_reader =
            reader.read_to_subreader("attributes", czone::ATTRIBUTE_BYTES_TOTAL)?;
        Ok(TileAttributeDict::read_from(&mut attribute_reader)?)
    }

    /// Decodes a complete CZone file.
    pub fn from_czone(data: &[u8]) -> Result<Self> {
        let attributes = Self::read_attributes(data)?;
        let image = Self::decode_image(data)?;
        Ok(Self { image, attributes })
    }

    /// Decodes the tile pixels of a CZone file into a single image: the
    /// solid tiles fill the first 25 rows of tiles, the masked tiles the
    /// last 4.
    pub fn decode_image(data: &[u8]) -> Result<Image> {
        let mut reader = SliceMemReader::new("czone", data);
        reader.skip(czone::ATTRIBUTE_BYTES_TOTAL)?;
        let solid_data = reader.read_bytes(czone::NUM_SOLID_TILES * czone::TILE_BYTES)?;
        let masked_data = reader.read_bytes(czone::NUM_MASKED_TILES * czone::MASKED_TILE_BYTES)?;
        if !reader.is_empty() {
            log::warn!(
                "Ignoring {} trailing bytes in tile set data",
                reader.remaining()
            );
        }

        let solid_image = decode_planar_ega_buffer(
            solid_data,
            &INGAME_PALETTE,
            czone::TILE_SET_IMAGE_WIDTH,
            TileImageType::Unmasked,
        )?;
        let masked_image = decode_planar_ega_buffer(
            masked_data,
            &INGAME_PALETTE,
            czone::TILE_SET_IMAGE_WIDTH,
            TileImageType::Masked,
        )?;

        let mut image = Image::new(
            tiles_to_pixels(czone::TILE_SET_IMAGE_WIDTH),
            tiles_to_pixels(czone::TILE_SET_IMAGE_HEIGHT),
        )?;
        image.insert_image(0, 0, &solid_image);
        image.insert_image(
            0,
            tiles_to_pixels(czone::SOLID_TILES_IMAGE_HEIGHT),
            &masked_image,
        );
        Ok(image)
    }

    #[must_use]
    pub fn image(&self) -> &Image {
        &self.image
    }

    #[must_use]
    pub fn attributes(&self) -> &TileAttributeDict {
        &self.attributes
    }
}
