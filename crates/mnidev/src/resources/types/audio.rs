use std::time::Duration;

use crate::resources::types::adlib::AdlibSound;

/// Decoded PCM audio, ready to be handed to a mixer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: u16,
    samples: Vec<i16>,
}

impl AudioBuffer {
    #[must_use]
    pub fn new(sample_rate: u32, channels: u16, samples: Vec<i16>) -> Self {
        Self {
            sample_rate,
            channels,
            samples,
        }
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Interleaved samples of all channels.
    #[must_use]
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 || self.channels == 0 {
            return Duration::ZERO;
        }
        let frames = self.samples.len() as u64 / u64::from(self.channels);
        Duration::from_micros(frames * 1_000_000 / u64::from(self.sample_rate))
    }
}

/// A sound effect in whichever form the game data provides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundData {
    /// A sampled recording.
    Digitized(AudioBuffer),
    /// An AdLib instrument and note sequence, to be played through an OPL
    /// emulator.
    Synthesized(AdlibSound),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_counts_frames() {
        let buffer = AudioBuffer::new(1000, 2, vec![0; 4000]);
        assert_eq!(buffer.duration(), Duration::from_secs(2));
        assert_eq!(AudioBuffer::new(0, 1, vec![0; 10]).duration(), Duration::ZERO);
    }
}
