use std::path::PathBuf;

use crate::{
    ids::SoundId,
    resources::types::map::MapError,
    utils::mem_reader::MemReaderError,
};

/// The broad category of an [`Error`], for callers that need to branch on
/// what went wrong without caring about the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    TruncatedData,
    InvalidData,
    InvalidArgument,
    OutOfRange,
    UnknownSoundId,
    Io,
    Png,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Resource {name} not found")]
    NotFound { name: String },
    #[error(
        "Truncated data in {context} at position {position}: needed {required} bytes, only {available} available"
    )]
    TruncatedData {
        context: String,
        position: usize,
        required: usize,
        available: usize,
    },
    #[error("Invalid data in {context}: {message}")]
    InvalidData { context: String, message: String },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Out of range: {0}")]
    OutOfRange(String),
    #[error("No synthesized sound for id {0}")]
    UnknownSoundId(SoundId),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode PNG: {0}")]
    PngDecode(#[from] png::DecodingError),
    #[error("Failed to encode PNG: {0}")]
    PngEncode(#[from] png::EncodingError),
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::TruncatedData { .. } => ErrorKind::TruncatedData,
            Error::InvalidData { .. } => ErrorKind::InvalidData,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::OutOfRange(_) => ErrorKind::OutOfRange,
            Error::UnknownSoundId(_) => ErrorKind::UnknownSoundId,
            Error::Io { .. } => ErrorKind::Io,
            Error::PngDecode(_) | Error::PngEncode(_) => ErrorKind::Png,
        }
    }

    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Error::NotFound { name: name.into() }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<MemReaderError> for Error {
    fn from(err: MemReaderError) -> Self {
        match err {
            MemReaderError::TruncatedData {
                context,
                position,
                required,
                available,
            } => Error::TruncatedData {
                context,
                position,
                required,
                available,
            },
            MemReaderError::InvalidData {
                context,
                position,
                message,
            } => Error::InvalidData {
                context: format!("{context}@{position}"),
                message,
            },
        }
    }
}

impl From<MapError> for Error {
    fn from(err: MapError) -> Self {
        match err {
            MapError::TileIndexTooLarge { .. } | MapError::TooLarge { .. } => Error::InvalidArgument(err.to_string()),
            MapError::LayerOutOfRange { .. } | MapError::PositionOutOfRange { .. } => {
                Error::OutOfRange(err.to_string())
            }
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
