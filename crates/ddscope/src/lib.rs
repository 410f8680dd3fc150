//! ddscope - DDS texture container inspection library.
//!
//! This crate provides a unified interface to the ddscope crates.
//!
//! # Crates
//!
//! - [`ddscope_common`] - Common utilities (stream reading, GUIDs)
//! - [`ddscope_dds`] - DDS header interpretation and frame addressing
//!
//! # Example
//!
//! ```no_run
//! use ddscope::prelude::*;
//!
//! let decoder = DdsDecoder::open(std::fs::File::open("texture.dds")?)?;
//! for index in 0..decoder.frame_count()? {
//!     let frame = decoder.frame(index)?;
//!     println!("{} -> {:?} blocks", frame.address(), frame.size_in_blocks());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use ddscope_common as common;
pub use ddscope_dds as dds;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use ddscope_common::Guid;
    pub use ddscope_dds::{
        BitmapDecoder, BitmapFrame, ContainerFormat, DdsAlphaMode, DdsDecoder, DdsDecoderExt,
        DdsDimension, DdsFrame, DdsFrameDecode, DxgiFormat, FrameAddress, FrameInfo, TextureInfo,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
