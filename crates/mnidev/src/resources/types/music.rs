//! IMF songs: a stream of OPL register writes with delays.

use std::time::Duration;

use crate::{
    errors::Result,
    game_traits::MUSIC_TICK_RATE_HZ,
    utils::mem_reader::{self, FixedSize, MemReader, Parse, SliceMemReader},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImfCommand {
    pub register: u8,
    pub value: u8,
    /// Ticks to wait after this write before the next one.
    pub delay: u16,
}

impl FixedSize for ImfCommand {
    const SIZE: usize = 4;
}

impl Parse for ImfCommand {
    fn parse<M: MemReader>(reader: &mut M) -> mem_reader::Result<Self> {
        Ok(ImfCommand {
            register: reader.read_u8()?,
            value: reader.read_u8()?,
            delay: reader.read_u16_le()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    commands: Vec<ImfCommand>,
}

impl Song {
    /// Parses a song file. The file must consist of whole commands.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = SliceMemReader::new("imf", data);
        Ok(Song {
            commands: reader.split_values()?,
        })
    }

    #[must_use]
    pub fn commands(&self) -> &[ImfCommand] {
        &self.commands
    }

    /// The total play time of one pass through the song.
    #[must_use]
    pub fn duration(&self) -> Duration {
        let ticks: u64 = self.commands.iter().map(|c| u64::from(c.delay)).sum();
        Duration::from_micros(ticks * 1_000_000 / u64::from(MUSIC_TICK_RATE_HZ))
    }
}
