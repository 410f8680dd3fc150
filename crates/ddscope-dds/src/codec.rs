//! Decoder and frame interfaces.
//!
//! [`BitmapDecoder`] and [`BitmapFrame`] describe what any container codec
//! offers. [`DdsDecoderExt`] and [`DdsFrameDecode`] add the DDS-specific
//! queries. Optional capabilities have default bodies that report
//! [`Error::Unsupported`].

use ddscope_common::Guid;

use crate::format::DxgiFormat;
use crate::info::TextureInfo;
use crate::{Error, Result};

/// Identity of a container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContainerFormat {
    /// Container format GUID.
    pub guid: Guid,
    /// Human readable name.
    pub name: &'static str,
    /// File extensions, lowercase, without the dot.
    pub extensions: &'static [&'static str],
}

impl ContainerFormat {
    /// The DDS container (`GUID_ContainerFormatDds`).
    pub const DDS: Self = Self {
        guid: Guid::from_fields(
            0x9967cb95,
            0x2e85,
            0x4ac8,
            [0x8c, 0xa2, 0x83, 0xd7, 0xcc, 0xd4, 0x25, 0xc9],
        ),
        name: "DDS",
        extensions: &["dds"],
    };
}

/// A rectangle in pixels or blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Generic container decoding.
pub trait BitmapDecoder {
    type Frame: BitmapFrame;

    /// Identity of the container this decoder reads.
    fn container_format(&self) -> ContainerFormat;

    /// Number of frames in the container.
    fn frame_count(&self) -> Result<u32>;

    /// Decode the frame at a flat index.
    fn frame(&self, index: u32) -> Result<Self::Frame>;

    /// Copy the container-level palette into `palette`.
    fn copy_palette(&self, _palette: &mut Vec<u32>) -> Result<()> {
        Err(Error::Unsupported("palette copy"))
    }

    /// Container-level metadata as name/value pairs.
    fn metadata(&self) -> Result<Vec<(String, String)>> {
        Err(Error::Unsupported("metadata query"))
    }

    fn preview(&self) -> Result<Self::Frame> {
        Err(Error::Unsupported("preview"))
    }

    /// Embedded color profiles.
    fn color_contexts(&self) -> Result<Vec<Vec<u8>>> {
        Err(Error::Unsupported("color contexts"))
    }

    fn thumbnail(&self) -> Result<Self::Frame> {
        Err(Error::Unsupported("thumbnail"))
    }
}

/// DDS-specific decoder queries.
pub trait DdsDecoderExt: BitmapDecoder {
    /// Snapshot of the texture description.
    fn parameters(&self) -> Result<TextureInfo>;

    /// Frame at an explicit (array, mip, slice) address.
    fn frame_by_address(
        &self,
        array_index: u32,
        mip_level: u32,
        slice_index: u32,
    ) -> Result<Self::Frame>;
}

/// Generic access to a decoded frame.
pub trait BitmapFrame {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// WIC-style pixel format GUID.
    fn pixel_format(&self) -> Result<Guid> {
        Err(Error::Unsupported("pixel format query"))
    }

    /// Horizontal and vertical DPI.
    fn resolution(&self) -> Result<(f64, f64)> {
        Err(Error::Unsupported("resolution query"))
    }

    fn copy_palette(&self, _palette: &mut Vec<u32>) -> Result<()> {
        Err(Error::Unsupported("palette copy"))
    }

    /// Copy decoded pixels of `rect` (whole frame if `None`) into `buffer`.
    fn copy_pixels(&self, _rect: Option<Rect>, _stride: u32, _buffer: &mut [u8]) -> Result<()> {
        Err(Error::Unsupported("pixel copy"))
    }

    fn metadata(&self) -> Result<Vec<(String, String)>> {
        Err(Error::Unsupported("metadata query"))
    }

    fn color_contexts(&self) -> Result<Vec<Vec<u8>>> {
        Err(Error::Unsupported("color contexts"))
    }

    fn thumbnail(&self) -> Result<Self>
    where
        Self: Sized,
    {
        Err(Error::Unsupported("thumbnail"))
    }
}

/// Block layout of a frame's pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DdsFormatInfo {
    pub format: DxgiFormat,
    /// 0 when the format is not supported.
    pub bytes_per_block: u32,
    pub block_width: u32,
    pub block_height: u32,
}

/// DDS-specific frame queries.
pub trait DdsFrameDecode: BitmapFrame {
    /// Frame size in compressed blocks.
    fn size_in_blocks(&self) -> (u32, u32);

    fn format_info(&self) -> DdsFormatInfo;

    /// Copy raw blocks of `bounds` (whole frame if `None`) into `buffer`.
    fn copy_blocks(&self, _bounds: Option<Rect>, _stride: u32, _buffer: &mut [u8]) -> Result<()> {
        Err(Error::Unsupported("block copy"))
    }
}
