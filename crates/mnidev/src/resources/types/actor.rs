//! Actor (sprite) images.
//!
//! `ACTRINFO.MNI` describes every actor's animation frames: their size,
//! draw offset and where their pixels live in `ACTORS.MNI`. The pixels are
//! masked EGA tiles.

use std::collections::BTreeMap;

use crate::{
    errors::Result,
    ids::ActorId,
    resources::types::{
        ega::{TileImageType, decode_planar_ega_buffer},
        image::Image,
        palette::INGAME_PALETTE,
    },
    utils::mem_reader::{self, MemReader, Parse, SliceMemReader},
};

/// Where and how large an animation frame is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorFrameHeader {
    draw_offset: (i16, i16),
    width_in_tiles: u16,
    height_in_tiles: u16,
    image_offset: u32,
}

impl Parse for ActorFrameHeader {
    fn parse<M: MemReader>(reader: &mut M) -> mem_reader::Result<Self> {
        let x = reader.read_i16_le()?;
        let y = reader.read_i16_le()?;
        let height_in_tiles = reader.read_u16_le()?;
        let width_in_tiles = reader.read_u16_le()?;
        let image_offset = reader.read_u32_le()?;
        reader.skip(4)?;
        Ok(ActorFrameHeader {
            draw_offset: (x, y),
            width_in_tiles,
            height_in_tiles,
            image_offset,
        })
    }
}

impl ActorFrameHeader {
    /// Offset from the actor's position to the frame's top-left corner, in
    /// tiles.
    #[must_use]
    pub fn draw_offset(&self) -> (i16, i16) {
        self.draw_offset
    }

    #[must_use]
    pub fn width_in_tiles(&self) -> u16 {
        self.width_in_tiles
    }

    #[must_use]
    pub fn height_in_tiles(&self) -> u16 {
        self.height_in_tiles
    }

    #[must_use]
    pub fn image_offset(&self) -> u32 {
        self.image_offset
    }

    #[must_use]
    pub fn image_size(&self) -> usize {
        usize::from(self.width_in_tiles)
            * usize::from(self.height_in_tiles)
            * TileImageType::Masked.bytes_per_tile()
    }

    /// Decodes this frame's pixels out of the actor image data.
    pub fn decode_image(&self, image_data: &[u8]) -> Result<Image> {
        let reader = SliceMemReader::new("actor_images", image_data);
        let mut frame =
            reader.sub_reader_at("frame", self.image_offset as usize, Some(self.image_size()))?;
        decode_planar_ega_buffer(
            frame.read_remaining(),
            &INGAME_PALETTE,
            usize::from(self.width_in_tiles),
            TileImageType::Masked,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorHeader {
    draw_index: i16,
    frames: Vec<ActorFrameHeader>,
}

impl Parse for ActorHeader {
    fn parse<M: MemReader>(reader: &mut M) -> mem_reader::Result<Self> {
        let num_frames = reader.read_u16_le()?;
        let draw_index = reader.read_i16_le()?;
        let frames = reader.read_values(usize::from(num_frames))?;
        Ok(ActorHeader { draw_index, frames })
    }
}

impl ActorHeader {
    /// Drawing order relative to other actors. Negative values mean the
    /// default order.
    #[must_use]
    pub fn draw_index(&self) -> i16 {
        self.draw_index
    }

    #[must_use]
    pub fn frames(&self) -> &[ActorFrameHeader] {
        &self.frames
    }
}

/// The parsed contents of `ACTRINFO.MNI`.
#[derive(Debug, Clone, Default)]
pub struct ActorInfo {
    headers: BTreeMap<ActorId, ActorHeader>,
}

impl ActorInfo {
    /// Parses the actor info file. It starts with a table of word offsets,
    /// one per actor; the first offset also gives the table's length. A zero
    /// offset marks an unused actor id.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = SliceMemReader::new("actor_info", data);
        if reader.is_empty() {
            return Ok(Self::default());
        }
        let num_entries = reader.read_u16_le()?;
        reader.seek_to(0)?;
        let offsets: Vec<u16> = reader.read_values(usize::from(num_entries))?;

        let mut headers = BTreeMap::new();
        for (id, offset) in (0u16..).zip(offsets) {
            if offset == 0 {
                continue;
            }
            let mut record =
                reader.sub_reader_at(&format!("actor_{id}"), usize::from(offset) * 2, None)?;
            headers.insert(ActorId::new(id), ActorHeader::parse(&mut record)?);
        }
        Ok(Self { headers })
    }

    #[must_use]
    pub fn header(&self, id: ActorId) -> Option<&ActorHeader> {
        self.headers.get(&id)
    }

    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.headers.keys().copied()
    }
}

/// One decoded animation frame of an actor.
#[derive(Debug, Clone)]
pub struct ActorFrame {
    draw_offset: (i16, i16),
    image: Image,
}

impl ActorFrame {
    #[must_use]
    pub fn new(draw_offset: (i16, i16), image: Image) -> Self {
        Self { draw_offset, image }
    }

    #[must_use]
    pub fn draw_offset(&self) -> (i16, i16) {
        self.draw_offset
    }

    #[must_use]
    pub fn image(&self) -> &Image {
        &self.image
    }
}

/// All frames of an actor, decoded.
#[derive(Debug, Clone)]
pub struct ActorData {
    draw_index: i16,
    frames: Vec<ActorFrame>,
}

impl ActorData {
    #[must_use]
    pub fn new(draw_index: i16, frames: Vec<ActorFrame>) -> Self {
        Self { draw_index, frames }
    }

    #[must_use]
    pub fn draw_index(&self) -> i16 {
        self.draw_index
    }

    #[must_use]
    pub fn frames(&self) -> &[ActorFrame] {
        &self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ErrorKind,
        utils::testing::{actor_images_fixture, actor_info_fixture},
    };

    #[test]
    fn parses_info() {
        let info = ActorInfo::from_bytes(&actor_info_fixture()).unwrap();
        assert_eq!(info.actor_ids().collect::<Vec<_>>(), [ActorId::new(0)]);
        let header = info.header(ActorId::new(0)).unwrap();
        assert_eq!(header.draw_index(), -1);
        let frame = header.frames()[0];
        assert_eq!(frame.draw_offset(), (-2, 3));
        assert_eq!((frame.width_in_tiles(), frame.height_in_tiles()), (2, 1));
        assert_eq!(frame.image_offset(), 8);
        assert_eq!(frame.image_size(), 80);
        assert!(info.header(ActorId::new(1)).is_none());
        assert!(info.header(ActorId::new(5)).is_none());
    }

    #[test]
    fn decodes_frame() {
        let info = ActorInfo::from_bytes(&actor_info_fixture()).unwrap();
        let frame = info.header(ActorId::new(0)).unwrap().frames()[0];
        let image = frame.decode_image(&actor_images_fixture()).unwrap();
        assert_eq!((image.width(), image.height()), (16, 8));
        assert_eq!(image.pixel_at(0, 0), Some(INGAME_PALETTE[4]));
        assert!(image.pixel_at(1, 0).unwrap().is_transparent());
        assert_eq!(image.pixel_at(8, 7), Some(INGAME_PALETTE[9]));
    }

    #[test]
    fn truncated_data() {
        let info = ActorInfo::from_bytes(&actor_info_fixture()).unwrap();
        let frame = info.header(ActorId::new(0)).unwrap().frames()[0];
        let mut images = actor_images_fixture();
        images.pop();
        assert_eq!(
            frame.decode_image(&images).unwrap_err().kind(),
            ErrorKind::TruncatedData
        );

        let mut data = actor_info_fixture();
        data.truncate(data.len() - 6);
        assert_eq!(
            ActorInfo::from_bytes(&data).unwrap_err().kind(),
            ErrorKind::TruncatedData
        );
    }
}
