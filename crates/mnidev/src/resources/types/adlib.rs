//! AdLib sound effects from the `AUDIOHED.MNI` / `AUDIOT.MNI` pair.
//!
//! The dictionary file is a list of offsets into the data file. Each sound
//! effect is a single OPL2 instrument and a sequence of notes, played on
//! channel 0 at 140 notes per second.

use crate::{
    errors::{Error, Result},
    game_traits::ADLIB_SOUNDS_BASE,
    ids::SoundId,
    utils::mem_reader::{self, FixedSize, MemReader, Parse, SliceMemReader},
};

const KEY_ON: u8 = 0x20;

/// Operator settings of an AdLib instrument, as stored in the sound data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdlibInstrument {
    pub modulator_char: u8,
    pub carrier_char: u8,
    pub modulator_scale: u8,
    pub carrier_scale: u8,
    pub modulator_attack: u8,
    pub carrier_attack: u8,
    pub modulator_sustain: u8,
    pub carrier_sustain: u8,
    pub modulator_wave: u8,
    pub carrier_wave: u8,
    pub connection: u8,
    pub voice: u8,
    pub mode: u8,
}

impl FixedSize for AdlibInstrument {
    const SIZE: usize = 16;
}

impl Parse for AdlibInstrument {
    fn parse<M: MemReader>(reader: &mut M) -> mem_reader::Result<Self> {
        let mut bytes = [0u8; Self::SIZE];
        reader.read_exact(&mut bytes)?;
        // The last three bytes are unused.
        let [
            modulator_char,
            carrier_char,
            modulator_scale,
            carrier_scale,
            modulator_attack,
            carrier_attack,
            modulator_sustain,
            carrier_sustain,
            modulator_wave,
            carrier_wave,
            connection,
            voice,
            mode,
            ..,
        ] = bytes;
        Ok(AdlibInstrument {
            modulator_char,
            carrier_char,
            modulator_scale,
            carrier_scale,
            modulator_attack,
            carrier_attack,
            modulator_sustain,
            carrier_sustain,
            modulator_wave,
            carrier_wave,
            connection,
            voice,
            mode,
        })
    }
}

/// A write of `value` to OPL `register`, `tick` 140 Hz ticks into the sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdlibCommand {
    pub tick: u32,
    pub register: u8,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdlibSound {
    priority: u16,
    instrument: AdlibInstrument,
    octave: u8,
    notes: Vec<u8>,
}

impl AdlibSound {
    #[must_use]
    pub fn priority(&self) -> u16 {
        self.priority
    }

    #[must_use]
    pub fn instrument(&self) -> &AdlibInstrument {
        &self.instrument
    }

    #[must_use]
    pub fn octave(&self) -> u8 {
        self.octave
    }

    /// One frequency byte per tick. Zero means silence.
    #[must_use]
    pub fn notes(&self) -> &[u8] {
        &self.notes
    }

    /// The register writes that play this sound on channel 0.
    #[must_use]
    pub fn register_commands(&self) -> Vec<AdlibCommand> {
        let inst = &self.instrument;
        let at = |tick, register, value| AdlibCommand {
            tick,
            register,
            value,
        };
        let mut commands = vec![
            at(0, 0xB0, 0),
            at(0, 0x20, inst.modulator_char),
            at(0, 0x23, inst.carrier_char),
            at(0, 0x40, inst.modulator_scale),
            at(0, 0x43, inst.carrier_scale),
            at(0, 0x60, inst.modulator_attack),
            at(0, 0x63, inst.carrier_attack),
            at(0, 0x80, inst.modulator_sustain),
            at(0, 0x83, inst.carrier_sustain),
            at(0, 0xE0, inst.modulator_wave),
            at(0, 0xE3, inst.carrier_wave),
            at(0, 0xC0, inst.connection),
        ];
        let block = ((self.octave & 7) << 2) | KEY_ON;
        let mut tick = 0;
        for &note in &self.notes {
            if note == 0 {
                commands.push(at(tick, 0xB0, 0));
            } else {
                commands.push(at(tick, 0xA0, note));
                commands.push(at(tick, 0xB0, block));
            }
            tick += 1;
        }
        commands.push(at(tick, 0xB0, 0));
        commands
    }
}

impl Parse for AdlibSound {
    fn parse<M: MemReader>(reader: &mut M) -> mem_reader::Result<Self> {
        let length = reader.read_u32_le()? as usize;
        let priority = reader.read_u16_le()?;
        let instrument = AdlibInstrument::parse(reader)?;
        let octave = reader.read_u8()?;
        if reader.remaining() < length {
            return Err(reader.create_truncated_error(length));
        }
        let mut notes = vec![0; length];
        reader.read_exact(&mut notes)?;
        Ok(AdlibSound {
            priority,
            instrument,
            octave,
            notes,
        })
    }
}

/// The audio dictionary and data files of the game.
#[derive(Debug, Clone)]
pub struct AudioPackage {
    offsets: Vec<u32>,
    data: Vec<u8>,
}

impl AudioPackage {
    pub fn new(dict: &[u8], data: Vec<u8>) -> Result<Self> {
        let mut reader = SliceMemReader::new("audio_dict", dict);
        reader.ensure_remaining_multiple_of(4)?;
        let mut offsets = Vec::with_capacity(dict.len() / 4);
        while !reader.is_empty() {
            offsets.push(reader.read_u32_le()?);
        }
        Ok(AudioPackage { offsets, data })
    }

    /// The number of entries in the dictionary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The raw bytes of dictionary entry `index`, or `None` if there is no
    /// such entry.
    pub fn entry(&self, index: usize) -> Result<Option<&[u8]>> {
        let (Some(&start), Some(&end)) = (self.offsets.get(index), self.offsets.get(index + 1))
        else {
            return Ok(None);
        };
        let reader = SliceMemReader::new("audio_data", &self.data);
        let (start, end) = (start as usize, end as usize);
        if end < start {
            return Err(Error::InvalidData {
                context: "audio_dict".into(),
                message: format!("Entry {index} ends at {end} before its start at {start}"),
            });
        }
        let mut entry = reader.sub_reader_at(&format!("entry_{index}"), start, Some(end - start))?;
        Ok(Some(entry.read_remaining()))
    }

    pub fn load_adlib_sound(&self, id: SoundId) -> Result<AdlibSound> {
        if id.intro_file_name().is_some() {
            return Err(Error::UnknownSoundId(id));
        }
        let index = ADLIB_SOUNDS_BASE + usize::from(id.number());
        let data = self.entry(index)?.ok_or(Error::UnknownSoundId(id))?;
        let mut reader = SliceMemReader::new(format!("adlib_sound_{}", id.number()), data);
        Ok(AdlibSound::parse(&mut reader)?)
    }
}
