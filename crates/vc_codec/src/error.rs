use std::io;
use std::path::PathBuf;

use thiserror::Error;
use vc_marshal::{ConfigError, UnmarshalError};

/// Encoding, decoding or file access failed.
///
/// Errors raised by the marshal engine itself are wrapped unchanged in
/// [`CodecError::Unmarshal`] and [`CodecError::Configuration`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("the file '{}' does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid {format} data: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    /// The decoded document is valid but its root is not a map.
    #[error("the decoded data is not an object")]
    NotAnObject,

    #[error("failed to encode {format} data: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    #[error("failed to write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Unmarshal(#[from] UnmarshalError),

    #[error(transparent)]
    Configuration(#[from] ConfigError),
}
