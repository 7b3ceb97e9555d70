//! Top-level error type for the rleplus library and binary
//!

use crate::codec::DecodeError;

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration could not be loaded or failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// An RLE+ buffer failed to decode.
    #[error("could not decode buffer {index}: {source}")]
    Decode {
        /// The decode failure
        #[source]
        source: DecodeError,
        /// Zero-based position of the buffer in the input
        index: usize,
    },

    /// The input was not valid hexadecimal.
    #[error("buffer {1} is not valid hex: {0}")]
    InvalidHex(#[source] hex::FromHexError, usize),

    /// Reading input or writing output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing output failed.
    #[error("could not serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more buffers failed to decode.
    #[error("{0} of {1} buffers failed to decode")]
    BuffersRejected(usize, usize),
}
