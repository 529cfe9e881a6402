use std::io;
use std::path::{Path, PathBuf};

/// Failure raised while opening, reading, or releasing a line source.
#[derive(Debug, thiserror::Error)]
pub enum LinesError {
    /// The charset label does not name an encoding known to `encoding_rs`.
    #[error("unsupported charset: {0}")]
    UnsupportedCharset(String),
    /// The resource could not be opened.
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        /// Resource that failed to open.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// Reading the next line failed.
    #[error("failed to read line from '{}': {source}", path.display())]
    Read {
        /// Resource being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The resource contains bytes that are not valid in the configured charset.
    #[error("malformed input in '{}': {source}", path.display())]
    Decode {
        /// Resource being read.
        path: PathBuf,
        /// Description of the malformed sequence.
        #[source]
        source: io::Error,
    },
    /// Releasing the resource failed.
    #[error("failed to close '{}': {source}", path.display())]
    Close {
        /// Resource being released.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl LinesError {
    pub(crate) fn open(path: PathBuf, source: io::Error) -> Self {
        Self::Open { path, source }
    }

    /// Classifies a reader failure; `InvalidData` means the bytes did not decode.
    pub(crate) fn read(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::InvalidData {
            Self::Decode { path, source }
        } else {
            Self::Read { path, source }
        }
    }

    pub(crate) fn close(path: PathBuf, source: io::Error) -> Self {
        Self::Close { path, source }
    }

    /// Returns the resource path associated with the error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::UnsupportedCharset(_) => None,
            Self::Open { path, .. }
            | Self::Read { path, .. }
            | Self::Decode { path, .. }
            | Self::Close { path, .. } => Some(path),
        }
    }
}
