//! Cutscene movies, stored as Autodesk FLI animations.
//!
//! The first frame sets the palette and carries a complete picture. Every
//! later frame usually only updates a band of rows, so a decoded movie keeps
//! one base image plus, per frame, the rows that changed.

use std::{ops::Range, time::Duration};

use crate::{
    errors::Result,
    resources::types::{
        image::{Color, Image, pixel_count},
        palette::color_from_6bit,
    },
    utils::mem_reader::{self, MemReader, SliceMemReader},
};

const FILE_MAGIC: u16 = 0xAF11;
const FRAME_MAGIC: u16 = 0xF1FA;
const FILE_HEADER_SIZE: usize = 128;
const FRAME_HEADER_SIZE: usize = 16;
const CHUNK_HEADER_SIZE: usize = 6;

/// FLI speeds count in ticks of the 70 Hz VGA refresh.
const SPEED_TICK_RATE_HZ: u64 = 70;

const CHUNK_COLOR: u16 = 11;
const CHUNK_DELTA: u16 = 12;
const CHUNK_BLACK: u16 = 13;
const CHUNK_RUN_LENGTH: u16 = 15;
const CHUNK_COPY: u16 = 16;
const CHUNK_THUMBNAIL: u16 = 18;

/// The rows one frame changed, to be drawn over the previous frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFrame {
    start_row: usize,
    replacement_image: Image,
}

impl MovieFrame {
    #[must_use]
    pub fn start_row(&self) -> usize {
        self.start_row
    }

    /// The changed rows. Zero rows high if the frame changes nothing.
    #[must_use]
    pub fn replacement_image(&self) -> &Image {
        &self.replacement_image
    }

    /// Draws this frame over the previous one.
    pub fn apply(&self, screen: &mut Image) {
        screen.insert_image(0, self.start_row, &self.replacement_image);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    base_image: Image,
    frames: Vec<MovieFrame>,
    speed: u16,
}

impl Movie {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = SliceMemReader::new("movie", data);
        let _file_size = reader.read_u32_le()?;
        if reader.read_u16_le()? != FILE_MAGIC {
            return Err(reader.create_invalid_data_error("Not an FLI file").into());
        }
        let num_frames = reader.read_u16_le()?;
        let width = usize::from(reader.read_u16_le()?);
        let height = usize::from(reader.read_u16_le()?);
        let _depth = reader.read_u16_le()?;
        let _flags = reader.read_u16_le()?;
        let speed = reader.read_u16_le()?;
        reader.seek_to(FILE_HEADER_SIZE)?;
        if num_frames == 0 {
            return Err(reader.create_invalid_data_error("Movie has no frames").into());
        }

        let mut canvas = Canvas::new(width, height)?;
        canvas.read_frame(&mut reader, 0)?;
        let base_image = canvas.rows(0..height)?;

        let mut frames = Vec::with_capacity(usize::from(num_frames) - 1);
        for index in 1..num_frames {
            let changed = canvas.read_frame(&mut reader, index)?.unwrap_or(0..0);
            frames.push(MovieFrame {
                start_row: changed.start,
                replacement_image: canvas.rows(changed)?,
            });
        }
        if !reader.is_empty() {
            log::debug!(
                "Ignoring {} bytes after the last movie frame",
                reader.remaining()
            );
        }
        Ok(Movie {
            base_image,
            frames,
            speed,
        })
    }

    #[must_use]
    pub fn base_image(&self) -> &Image {
        &self.base_image
    }

    /// The frames following the base image.
    #[must_use]
    pub fn frames(&self) -> &[MovieFrame] {
        &self.frames
    }

    /// Delay between frames the movie was authored with.
    #[must_use]
    pub fn frame_delay(&self) -> Duration {
        Duration::from_micros(u64::from(self.speed) * 1_000_000 / SPEED_TICK_RATE_HZ)
    }
}

/// The decoder's running state: palette indices of the whole screen, plus
/// the current palette.
struct Canvas {
    width: usize,
    height: usize,
    indices: Vec<u8>,
    palette: [Color; 256],
}

impl Canvas {
    fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            width,
            height,
            indices: vec![0; pixel_count(width, height)?],
            palette: [Color::opaque(0, 0, 0); 256],
        })
    }

    fn rows(&self, rows: Range<usize>) -> Result<Image> {
        let pixels = self.indices[rows.start * self.width..rows.end * self.width]
            .iter()
            .map(|&index| self.palette[usize::from(index)])
            .collect();
        Image::from_pixels(pixels, self.width, rows.len())
    }

    /// Reads one frame and returns the rows it changed.
    fn read_frame(
        &mut self,
        reader: &mut SliceMemReader<'_>,
        index: u16,
    ) -> mem_reader::Result<Option<Range<usize>>> {
        let size = reader.read_u32_le()? as usize;
        if reader.read_u16_le()? != FRAME_MAGIC {
            return Err(reader.create_invalid_data_error(format!("Frame {index} has a bad magic")));
        }
        let num_chunks = reader.read_u16_le()?;
        reader.skip(8)?;
        let Some(body_size) = size.checked_sub(FRAME_HEADER_SIZE) else {
            return Err(reader.create_invalid_data_error(format!("Frame {index} is too small")));
        };
        let mut body = reader.read_to_subreader(&format!("frame_{index}"), body_size)?;

        let mut changed: Option<Range<usize>> = None;
        for _ in 0..num_chunks {
            let size = body.read_u32_le()? as usize;
            let kind = body.read_u16_le()?;
            let Some(payload_size) = size.checked_sub(CHUNK_HEADER_SIZE) else {
                return Err(body.create_invalid_data_error("Chunk is too small"));
            };
            let mut chunk = body.read_to_subreader(&format!("chunk_{kind}"), payload_size)?;
            let rows = match kind {
                // A new palette recolors the whole screen.
                CHUNK_COLOR => {
                    self.read_palette(&mut chunk)?;
                    0..self.height
                }
                CHUNK_DELTA => self.read_delta(&mut chunk)?,
                CHUNK_BLACK => {
                    self.indices.fill(0);
                    0..self.height
                }
                CHUNK_RUN_LENGTH => {
                    self.read_run_length(&mut chunk)?;
                    0..self.height
                }
                CHUNK_COPY => {
                    chunk.read_exact(&mut self.indices)?;
                    0..self.height
                }
                CHUNK_THUMBNAIL => continue,
                _ => {
                    log::warn!("Skipping unknown movie chunk type {kind} in frame {index}");
                    continue;
                }
            };
            if rows.is_empty() {
                continue;
            }
            changed = Some(match changed {
                Some(prev) => prev.start.min(rows.start)..prev.end.max(rows.end),
                None => rows,
            });
        }
        Ok(changed)
    }

    fn read_palette<M: MemReader>(&mut self, reader: &mut M) -> mem_reader::Result<()> {
        let num_packets = reader.read_u16_le()?;
        let mut index = 0;
        for _ in 0..num_packets {
            index += usize::from(reader.read_u8()?);
            let count = match reader.read_u8()? {
                0 => 256,
                n => usize::from(n),
            };
            for _ in 0..count {
                let (r, g, b) = (reader.read_u8()?, reader.read_u8()?, reader.read_u8()?);
                let Some(slot) = self.palette.get_mut(index) else {
                    return Err(reader.create_invalid_data_error("Palette update past color 255"));
                };
                *slot = color_from_6bit(r, g, b);
                index += 1;
            }
        }
        Ok(())
    }

    /// Applies a line-compressed delta: a band of rows, each a list of
    /// packets that skip ahead and then copy or repeat bytes.
    fn read_delta<M: MemReader>(&mut self, reader: &mut M) -> mem_reader::Result<Range<usize>> {
        let first_row = usize::from(reader.read_u16_le()?);
        let num_rows = usize::from(reader.read_u16_le()?);
        let rows = first_row..first_row + num_rows;
        if rows.end > self.height {
            return Err(reader.create_invalid_data_error(format!(
                "Delta rows {rows:?} exceed the movie height of {}",
                self.height
            )));
        }
        for row in rows.clone() {
            let num_packets = reader.read_u8()?;
            let mut x = 0;
            for _ in 0..num_packets {
                x += usize::from(reader.read_u8()?);
                let count = reader.read_i8()?;
                let len = usize::from(count.unsigned_abs());
                let span = self.row_span(reader, row, x, len)?;
                if count >= 0 {
                    reader.read_exact(span)?;
                } else {
                    span.fill(reader.read_u8()?);
                }
                x += len;
            }
        }
        Ok(rows)
    }

    /// Decodes a complete run-length encoded picture. Positive counts repeat
    /// the next byte, negative ones copy literal bytes.
    fn read_run_length<M: MemReader>(&mut self, reader: &mut M) -> mem_reader::Result<()> {
        for row in 0..self.height {
            // The packet count byte overflows on wide images and is unused.
            reader.read_u8()?;
            let mut x = 0;
            while x < self.width {
                let count = reader.read_i8()?;
                if count == 0 {
                    return Err(reader.create_invalid_data_error("Empty run"));
                }
                let len = usize::from(count.unsigned_abs());
                let span = self.row_span(reader, row, x, len)?;
                if count > 0 {
                    span.fill(reader.read_u8()?);
                } else {
                    reader.read_exact(span)?;
                }
                x += len;
            }
        }
        Ok(())
    }

    fn row_span<M: MemReader>(
        &mut self,
        reader: &M,
        row: usize,
        x: usize,
        len: usize,
    ) -> mem_reader::Result<&mut [u8]> {
        if x + len > self.width {
            return Err(reader.create_invalid_data_error(format!(
                "Run of {len} pixels at x={x} overflows a row of {} pixels",
                self.width
            )));
        }
        let start = row * self.width + x;
        Ok(&mut self.indices[start..start + len])
    }
}

#[cfg(test)]
mod tests {
    use datalit::datalit;

    use super::*;
    use crate::ErrorKind;

    const RED: Color = Color::opaque(255, 0, 0);
    const BLACK: Color = Color::opaque(0, 0, 0);

    fn chunk(kind: u16, payload: &[u8]) -> Vec<u8> {
        let size = u32::try_from(CHUNK_HEADER_SIZE + payload.len()).unwrap();
        let mut data = size.to_le_bytes().to_vec();
        data.extend(kind.to_le_bytes());
        data.extend_from_slice(payload);
        data
    }

    fn frame(chunks: &[Vec<u8>]) -> Vec<u8> {
        let body = chunks.concat();
        let size = u32::try_from(FRAME_HEADER_SIZE + body.len()).unwrap();
        let mut data = size.to_le_bytes().to_vec();
        data.extend(FRAME_MAGIC.to_le_bytes());
        data.extend(u16::try_from(chunks.len()).unwrap().to_le_bytes());
        data.extend([0; 8]);
        data.extend(body);
        data
    }

    /// A 4x2 movie. `num_frames` may be lower than the number of frames
    /// passed, like the trailing loop frame of real files.
    fn movie(num_frames: u16, frames: &[Vec<u8>]) -> Vec<u8> {
        let mut data = datalit!(0u32_le, 0xAF11u16_le).to_vec();
        data.extend(num_frames.to_le_bytes());
        data.extend_from_slice(&datalit!(4u16_le, 2u16_le, 8u16_le, 0u16_le, 7u16_le));
        data.resize(FILE_HEADER_SIZE, 0);
        for frame in frames {
            data.extend_from_slice(frame);
        }
        let size = u32::try_from(data.len()).unwrap();
        data[..4].copy_from_slice(&size.to_le_bytes());
        data
    }

    /// Black and red in colors 0 and 1, then a red top row and a bottom row
    /// of black, red, black, black.
    fn first_frame() -> Vec<u8> {
        let palette = datalit!(
            1u16_le,
            0u8, 2u8,
            0u8, 0u8, 0u8,
            63u8, 0u8, 0u8,
        );
        let picture = datalit!(
            1u8, 4u8, 1u8,
            2u8, 0xFEu8, 0u8, 1u8, 2u8, 0u8,
        );
        frame(&[chunk(CHUNK_COLOR, &palette), chunk(CHUNK_RUN_LENGTH, &picture)])
    }

    /// Turns the last two pixels of the bottom row red.
    fn delta_frame() -> Vec<u8> {
        let delta = datalit!(1u16_le, 1u16_le, 1u8, 2u8, 0xFEu8, 1u8);
        frame(&[chunk(CHUNK_DELTA, &delta)])
    }

    fn pixels(image: &Image) -> Vec<Color> {
        image.pixels().to_vec()
    }

    #[test]
    fn decodes_base_image_and_delta() {
        let data = movie(2, &[first_frame(), delta_frame(), frame(&[])]);
        let movie = Movie::from_bytes(&data).unwrap();

        let base = movie.base_image();
        assert_eq!((base.width(), base.height()), (4, 2));
        assert_eq!(
            pixels(base),
            [RED, RED, RED, RED, BLACK, RED, BLACK, BLACK]
        );
        assert_eq!(movie.frame_delay(), Duration::from_millis(100));

        let [frame] = movie.frames() else {
            panic!("expected one frame, got {:?}", movie.frames());
        };
        assert_eq!(frame.start_row(), 1);
        assert_eq!(pixels(frame.replacement_image()), [BLACK, RED, RED, RED]);

        let mut screen = base.clone();
        frame.apply(&mut screen);
        assert_eq!(pixels(&screen), [RED, RED, RED, RED, BLACK, RED, RED, RED]);
    }

    #[test]
    fn unchanged_and_cleared_frames() {
        let black = frame(&[chunk(CHUNK_BLACK, &[])]);
        let data = movie(3, &[first_frame(), frame(&[]), black]);
        let movie = Movie::from_bytes(&data).unwrap();

        let unchanged = &movie.frames()[0];
        assert_eq!(unchanged.replacement_image().height(), 0);

        let cleared = &movie.frames()[1];
        assert_eq!(cleared.start_row(), 0);
        assert_eq!(pixels(cleared.replacement_image()), [BLACK; 8]);
    }

    #[test]
    fn truncated_movie() {
        let mut data = movie(2, &[first_frame(), delta_frame()]);
        data.pop();
        let err = Movie::from_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedData);

        let err = Movie::from_bytes(&data[..10]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedData);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = movie(1, &[first_frame()]);
        data[4] = 0x12;
        let err = Movie::from_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let mut data = movie(1, &[first_frame()]);
        data[FILE_HEADER_SIZE + 4] = 0;
        let err = Movie::from_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_runs_outside_the_screen() {
        let empty_run = datalit!(1u8, 0u8);
        let data = movie(1, &[frame(&[chunk(CHUNK_RUN_LENGTH, &empty_run)])]);
        let err = Movie::from_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let wide_delta = datalit!(0u16_le, 1u16_le, 1u8, 3u8, 0xFEu8, 1u8);
        let data = movie(2, &[first_frame(), frame(&[chunk(CHUNK_DELTA, &wide_delta)])]);
        let err = Movie::from_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let low_delta = datalit!(2u16_le, 1u16_le, 0u8);
        let data = movie(2, &[first_frame(), frame(&[chunk(CHUNK_DELTA, &low_delta)])]);
        let err = Movie::from_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn movie_needs_a_frame() {
        let data = movie(0, &[]);
        let err = Movie::from_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
