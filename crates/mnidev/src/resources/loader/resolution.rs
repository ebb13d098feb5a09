//! The order in which the loader looks for assets.

use crate::ids::SoundId;

/// A place the loader can find an asset in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStep {
    /// A file of the same name in the game directory.
    LooseFile,
    /// A PNG image in the replacement directory.
    Replacement,
    /// An entry of the game's CMP archive.
    Archive,
}

/// Lookup order for raw files.
pub const FILE_RESOLUTION_ORDER: &[ResolutionStep] =
    &[ResolutionStep::LooseFile, ResolutionStep::Archive];

/// Lookup order for assets that have replacement images.
pub const IMAGE_RESOLUTION_ORDER: &[ResolutionStep] = &[
    ResolutionStep::LooseFile,
    ResolutionStep::Replacement,
    ResolutionStep::Archive,
];

/// A place the loader can find a sound effect in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A VOC file that exists only for this sound. If it can't be loaded,
    /// neither can the sound.
    DedicatedFile(&'static str),
    /// A VOC file named after the sound id. Used if the file exists.
    DigitizedFile(String),
    /// The AdLib version of the sound.
    Synthesized(SoundId),
}

/// The sources of a sound, in the order they are tried.
#[must_use]
pub fn sound_sources(id: SoundId) -> Vec<SoundSource> {
    if let Some(name) = id.intro_file_name() {
        return vec![SoundSource::DedicatedFile(name)];
    }
    vec![
        SoundSource::DigitizedFile(id.digitized_file_name()),
        SoundSource::Synthesized(id),
    ]
}
