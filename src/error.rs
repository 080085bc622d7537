//! Error types for binarycookies.

use thiserror::Error;

/// Error type for binary cookie decoding.
#[derive(Error, Debug)]
pub enum Error {
    /// The first four bytes are not the `cook` tag
    #[error("invalid magic bytes: expected \"cook\", found {found:02x?}")]
    InvalidMagic { found: [u8; 4] },

    /// A fixed-width or offset-addressed read ran past the buffer
    #[error("read of {len} bytes at offset {offset} exceeds buffer of {available} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    /// A null-terminated field ran to the end of the buffer without a terminator
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    /// A text field is not valid UTF-8 and lossy decoding is disabled
    #[error("invalid UTF-8 in {field} field at offset {offset}")]
    InvalidText { field: &'static str, offset: usize },

    /// Gzip decompression error
    #[error("decompression error: {0}")]
    Decompress(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came from reading past the available bytes.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            Error::OutOfBounds { .. } | Error::UnterminatedString { .. }
        )
    }
}

/// Result type alias for binarycookies operations.
pub type Result<T> = std::result::Result<T, Error>;
