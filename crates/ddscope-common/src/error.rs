//! Error types for ddscope-common.

use thiserror::Error;

/// Common error type for ddscope operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The stream ended before a full structure could be read.
    #[error("unexpected end of stream: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
