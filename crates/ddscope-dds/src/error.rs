//! Error types for DDS decoding.

use thiserror::Error;

/// Errors that can occur when decoding DDS containers.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The decoder is not in a state that allows the operation.
    #[error("decoder is in the wrong state for this operation")]
    WrongState,

    /// The stream ended before a full structure could be read.
    #[error("short read from stream: needed {needed} bytes, got {read}")]
    StreamRead { needed: usize, read: usize },

    /// The stream does not start with the DDS magic.
    #[error("unknown image format: magic {0:#010x} is not 'DDS '")]
    UnknownFormat(u32),

    /// The header declares an unexpected size.
    #[error("invalid DDS header: size field is {actual}, expected {expected}")]
    BadHeader { expected: u32, actual: u32 },

    /// An index or address is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not supported by the DDS decoder.
    #[error("{0} is not supported by the DDS decoder")]
    Unsupported(&'static str),

    /// DDS containers never carry a palette.
    #[error("palette unavailable")]
    PaletteUnavailable,

    /// DDS containers never carry a thumbnail.
    #[error("codec has no thumbnail")]
    NoThumbnail,
}

impl From<ddscope_common::Error> for Error {
    fn from(err: ddscope_common::Error) -> Self {
        match err {
            ddscope_common::Error::UnexpectedEof { needed, available } => Self::StreamRead {
                needed,
                read: available,
            },
            ddscope_common::Error::Io(e) => Self::Io(e),
        }
    }
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
