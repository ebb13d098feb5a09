//! Creative Voice File (VOC) decoding, used for the digitized sound effects.

use crate::{
    errors::Result,
    resources::types::audio::AudioBuffer,
    utils::mem_reader::{self, MemReader, SliceMemReader},
};

const SIGNATURE: &[u8; 20] = b"Creative Voice File\x1A";

const CODEC_PCM_8BIT_UNSIGNED: u8 = 0;

/// The kinds of blocks following the header. A zero type byte ends the
/// file and has no size field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockType {
    SoundData,
    SoundContinuation,
    Silence,
    Other(u8),
}

impl From<u8> for BlockType {
    fn from(value: u8) -> Self {
        match value {
            1 => BlockType::SoundData,
            2 => BlockType::SoundContinuation,
            3 => BlockType::Silence,
            other => BlockType::Other(other),
        }
    }
}

#[derive(Debug)]
struct VocHeader {
    data_offset: u16,
    version: u16,
}

impl VocHeader {
    fn read_from<M: MemReader>(reader: &mut M) -> mem_reader::Result<Self> {
        let mut signature = [0u8; SIGNATURE.len()];
        reader.read_exact(&mut signature)?;
        if &signature != SIGNATURE {
            return Err(reader.create_invalid_data_error("Not a Creative Voice File"));
        }
        let data_offset = reader.read_u16_le()?;
        let version = reader.read_u16_le()?;
        let checksum = reader.read_u16_le()?;
        if checksum != (!version).wrapping_add(0x1234) {
            log::warn!("VOC header checksum {checksum:#06x} does not match version {version:#06x}");
        }
        Ok(VocHeader {
            data_offset,
            version,
        })
    }
}

fn sample_rate_from_divisor(divisor: u8) -> u32 {
    1_000_000 / (256 - u32::from(divisor))
}

fn convert_sample(sample: u8) -> i16 {
    (i16::from(sample) - 128) << 8
}

/// Decodes a VOC file holding 8-bit unsigned mono PCM.
pub fn decode_voc(data: &[u8]) -> Result<AudioBuffer> {
    let mut reader = SliceMemReader::new("voc", data);
    let header = VocHeader::read_from(&mut reader)?;
    log::trace!("VOC version {:#06x}", header.version);
    reader.seek_to(usize::from(header.data_offset))?;

    let mut sample_rate = None;
    let mut samples = Vec::new();
    loop {
        if reader.is_empty() {
            log::debug!("VOC data ends without a terminator block");
            break;
        }
        let block_type = match reader.read_u8()? {
            0 => break,
            kind => BlockType::from(kind),
        };
        let size = reader.read_u24_le()? as usize;
        let mut block = reader.read_to_subreader("block", size)?;

        match block_type {
            BlockType::SoundData => {
                let divisor = block.read_u8()?;
                let codec = block.read_u8()?;
                if codec != CODEC_PCM_8BIT_UNSIGNED {
                    return Err(block
                        .create_invalid_data_error(format!("Unsupported VOC codec {codec}"))
                        .into());
                }
                let rate = sample_rate_from_divisor(divisor);
                if let Some(previous) = sample_rate
                    && previous != rate
                {
                    log::warn!("VOC sample rate changes from {previous} to {rate}");
                }
                sample_rate = Some(rate);
                samples.extend(block.read_remaining().iter().copied().map(convert_sample));
            }
            BlockType::SoundContinuation => {
                if sample_rate.is_none() {
                    return Err(block
                        .create_invalid_data_error("Continuation block before any sound data")
                        .into());
                }
                samples.extend(block.read_remaining().iter().copied().map(convert_sample));
            }
            BlockType::Silence => {
                let length = usize::from(block.read_u16_le()?) + 1;
                let divisor = block.read_u8()?;
                sample_rate.get_or_insert_with(|| sample_rate_from_divisor(divisor));
                samples.resize(samples.len() + length, 0);
            }
            BlockType::Other(kind) => {
                log::debug!("Skipping VOC block of type {kind}");
            }
        }
    }

    let Some(sample_rate) = sample_rate else {
        return Err(reader
            .create_invalid_data_error("VOC file contains no sound data")
            .into());
    };
    Ok(AudioBuffer::new(sample_rate, 1, samples))
}

#[cfg(test)]
mod tests {
    use datalit::datalit;

    use super::*;
    use crate::ErrorKind;

    fn header() -> Vec<u8> {
        datalit!(
            b"Creative Voice File\x1A",
            26u16_le,
            0x010Au16_le,
            0x1129u16_le,
        )
        .to_vec()
    }

    #[test]
    fn decodes_sound_data_block() {
        let mut data = header();
        data.extend_from_slice(&datalit!(
            0x01u8,
            0x060000,
            156u8, // 1_000_000 / 100 = 10 kHz
            0u8,
            0x80u8,
            0xFFu8,
            0x00u8,
            0x81u8,
            0x00u8,
        ));
        let buffer = decode_voc(&data).unwrap();
        assert_eq!(buffer.sample_rate(), 10_000);
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.samples(), &[0, 127 << 8, -128 << 8, 1 << 8]);
    }

    #[test]
    fn continuation_and_silence_blocks() {
        let mut data = header();
        data.extend_from_slice(&datalit!(
            0x01u8, 0x030000, 156u8, 0u8, 0x90u8,
            0x02u8, 0x010000, 0x70u8,
            0x03u8, 0x030000, 2u16_le, 156u8,
            0x05u8, 0x020000, b"hi",
            0x00u8,
        ));
        let buffer = decode_voc(&data).unwrap();
        assert_eq!(buffer.samples(), &[16 << 8, -16 << 8, 0, 0, 0]);
    }

    #[test]
    fn missing_terminator_is_tolerated() {
        let mut data = header();
        data.extend_from_slice(&datalit!(0x01u8, 0x030000, 156u8, 0u8, 0x80u8));
        assert_eq!(decode_voc(&data).unwrap().samples(), &[0]);
    }

    #[test]
    fn bad_signature_is_invalid() {
        let mut data = header();
        data[0] = b'c';
        assert_eq!(decode_voc(&data).unwrap_err().kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn unsupported_codec_is_invalid() {
        let mut data = header();
        data.extend_from_slice(&datalit!(0x01u8, 0x030000, 156u8, 4u8, 0x80u8, 0x00u8));
        assert_eq!(decode_voc(&data).unwrap_err().kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn short_input_is_truncated() {
        let full = header();
        for len in [0, 10, 25] {
            assert_eq!(
                decode_voc(&full[..len]).unwrap_err().kind(),
                ErrorKind::TruncatedData,
                "len {len}"
            );
        }

        // A block claiming more data than the file has.
        let mut data = header();
        data.extend_from_slice(&datalit!(0x01u8, 0x640000, 156u8, 0u8));
        assert_eq!(decode_voc(&data).unwrap_err().kind(), ErrorKind::TruncatedData);
    }
}
