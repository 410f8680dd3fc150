//! DDS (DirectDraw Surface) container decoding.
//!
//! This crate reads the headers of a DDS stream and exposes the texture as a
//! flat list of frames. A frame is one (array index, mip level, depth slice)
//! of the texture. Decoding reports geometry and block layout only. It does
//! not decompress block data.
//!
//! - [`header`] - Raw on-disk structures
//! - [`TextureInfo`] - Normalized description derived from the headers
//! - [`DdsDecoder`] - Stateful decoder bound to a stream
//! - [`DdsFrame`] - Independent per-frame view
//!
//! # Example
//!
//! ```no_run
//! use ddscope_dds::{DdsDecoder, DdsDecoderExt, DdsFrameDecode};
//!
//! let decoder = DdsDecoder::open(std::fs::File::open("texture.dds")?)?;
//! let params = decoder.parameters()?;
//! println!("{}x{} {} ({} frames)", params.width, params.height, params.format, params.frame_count);
//!
//! let frame = decoder.frame_by_address(0, 1, 0)?;
//! println!("mip 1 is {:?} blocks", frame.size_in_blocks());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod codec;
mod decoder;
mod error;
mod format;
mod frame;
mod info;

pub mod header;

pub use codec::{
    BitmapDecoder, BitmapFrame, ContainerFormat, DdsDecoderExt, DdsFormatInfo, DdsFrameDecode,
    Rect,
};
pub use decoder::DdsDecoder;
pub use error::{Error, Result};
pub use format::{format_from_fourcc, DxgiFormat};
pub use frame::{DdsFrame, FrameInfo};
pub use header::{DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC, DDS_MAGIC};
pub use info::{
    alpha_mode_from_fourcc, alpha_mode_from_misc_flags2, depth_at_mip, dimension, frame_count,
    mip_chain_slices, mip_dimension, DdsAlphaMode, DdsDimension, FrameAddress, TextureInfo,
};
