//! Error types for wirebuf.

use thiserror::Error;

/// Main error type for all wirebuf operations.
#[derive(Debug, Error)]
pub enum WirebufError {
    /// I/O error during path resolution or file access.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload bytes are not valid UTF-8 where text was expected.
    #[error("invalid UTF-8 in payload: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// A write's payload exceeds the buffer's allocated capacity.
    ///
    /// This is a contract violation by the caller, never a truncation:
    /// the destination buffer is left untouched.
    #[error("payload length {len} exceeds buffer capacity {capacity}")]
    CapacityExceeded {
        /// Length of the rejected payload.
        len: usize,
        /// Allocated payload capacity of the destination buffer.
        capacity: usize,
    },

    /// A buffer is too short to contain what its header claims.
    #[error("buffer too short: expected {expected} bytes, got {got}")]
    Truncated {
        /// Bytes required by the header or encoding.
        expected: usize,
        /// Bytes actually present.
        got: usize,
    },

    /// The spill file referenced by an overflow buffer cannot be read.
    ///
    /// A missing spill file means the writing side violated the
    /// protocol (or the buffer was read twice); there is no retry.
    #[error("cannot read spill file '{path}': {source}")]
    OverflowRead {
        /// The spill-file path taken from the buffer payload.
        path: String,
        /// Underlying filesystem error.
        source: std::io::Error,
    },

    /// Operating system or CPU architecture not recognized by the loader.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Dynamic library could not be loaded or a symbol was not found.
    #[error("library load error: {0}")]
    LibraryLoad(#[from] libloading::Error),
}

/// Result type alias using WirebufError.
pub type Result<T> = std::result::Result<T, WirebufError>;
