//! Per-frame views.

use tracing::warn;

use crate::codec::{BitmapFrame, DdsFormatInfo, DdsFrameDecode};
use crate::format::DxgiFormat;
use crate::info::{mip_dimension, FrameAddress, TextureInfo};

/// Geometry and block layout of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrameInfo {
    pub width: u32,
    pub height: u32,
    pub format: DxgiFormat,
    /// 0 when the format is not supported.
    pub bytes_per_block: u32,
    pub block_width: u32,
    pub block_height: u32,
    pub width_in_blocks: u32,
    pub height_in_blocks: u32,
}

impl FrameInfo {
    /// Describe the frame at `mip_level` of `texture`.
    ///
    /// The mip level is not bounds-checked here.
    pub fn at_mip(texture: &TextureInfo, mip_level: u32) -> Self {
        let width = mip_dimension(texture.width, mip_level);
        let height = mip_dimension(texture.height, mip_level);

        let bytes_per_block = texture.format.bytes_per_block().unwrap_or_else(|| {
            warn!(format = %texture.format, "DXGI format is not supported by the DDS decoder");
            0
        });

        let block_width = DxgiFormat::BLOCK_DIM;
        let block_height = DxgiFormat::BLOCK_DIM;

        Self {
            width,
            height,
            format: texture.format,
            bytes_per_block,
            block_width,
            block_height,
            width_in_blocks: width.div_ceil(block_width),
            height_in_blocks: height.div_ceil(block_height),
        }
    }

    /// Size in bytes of the frame's block data, if the format is supported.
    pub fn data_size(&self) -> Option<u64> {
        if self.bytes_per_block == 0 {
            return None;
        }
        Some(
            u64::from(self.width_in_blocks)
                * u64::from(self.height_in_blocks)
                * u64::from(self.bytes_per_block),
        )
    }
}

/// A decoded frame.
///
/// Holds a copy of its description and nothing else, so it can outlive the
/// decoder that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsFrame {
    address: FrameAddress,
    info: FrameInfo,
}

impl DdsFrame {
    pub(crate) fn new(texture: &TextureInfo, address: FrameAddress) -> Self {
        Self {
            address,
            info: FrameInfo::at_mip(texture, address.mip_level),
        }
    }

    /// Where this frame sits in the texture.
    pub fn address(&self) -> FrameAddress {
        self.address
    }

    /// Geometry and block layout of this frame.
    pub fn info(&self) -> &FrameInfo {
        &self.info
    }
}

impl BitmapFrame for DdsFrame {
    fn size(&self) -> (u32, u32) {
        (self.info.width, self.info.height)
    }
}

impl DdsFrameDecode for DdsFrame {
    fn size_in_blocks(&self) -> (u32, u32) {
        (self.info.width_in_blocks, self.info.height_in_blocks)
    }

    fn format_info(&self) -> DdsFormatInfo {
        DdsFormatInfo {
            format: self.info.format,
            bytes_per_block: self.info.bytes_per_block,
            block_width: self.info.block_width,
            block_height: self.info.block_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Rect;
    use crate::info::{DdsAlphaMode, DdsDimension};
    use crate::Error;

    fn texture(width: u32, height: u32, format: DxgiFormat) -> TextureInfo {
        TextureInfo {
            width,
            height,
            depth: 1,
            mip_levels: 1,
            array_size: 1,
            frame_count: 1,
            format,
            dimension: DdsDimension::Texture2D,
            alpha_mode: DdsAlphaMode::Unknown,
        }
    }

    #[test]
    fn test_block_grid() {
        let info = FrameInfo::at_mip(&texture(16, 16, DxgiFormat::BC3_UNORM), 0);
        assert_eq!(info.bytes_per_block, 16);
        assert_eq!((info.block_width, info.block_height), (4, 4));
        assert_eq!((info.width_in_blocks, info.height_in_blocks), (4, 4));
        assert_eq!(info.data_size(), Some(256));
    }

    #[test]
    fn test_height_in_blocks_uses_height() {
        // A wide, short texture: rows of blocks come from the height.
        let info = FrameInfo::at_mip(&texture(64, 8, DxgiFormat::BC1_UNORM), 0);
        assert_eq!(info.width_in_blocks, 16);
        assert_eq!(info.height_in_blocks, 2);
    }

    #[test]
    fn test_partial_blocks_round_up() {
        let info = FrameInfo::at_mip(&texture(10, 5, DxgiFormat::BC1_UNORM), 0);
        assert_eq!((info.width_in_blocks, info.height_in_blocks), (3, 2));

        let tail = FrameInfo::at_mip(&texture(10, 5, DxgiFormat::BC1_UNORM), 3);
        assert_eq!((tail.width, tail.height), (1, 1));
        assert_eq!((tail.width_in_blocks, tail.height_in_blocks), (1, 1));
    }

    #[test]
    fn test_zero_width_has_no_blocks() {
        let info = FrameInfo::at_mip(&texture(0, 16, DxgiFormat::BC1_UNORM), 2);
        assert_eq!((info.width, info.height), (0, 4));
        assert_eq!((info.width_in_blocks, info.height_in_blocks), (0, 1));
        assert_eq!(info.data_size(), Some(0));
    }

    #[test]
    fn test_unsupported_format_has_zero_block_size() {
        let info = FrameInfo::at_mip(&texture(16, 16, DxgiFormat(28)), 0);
        assert_eq!(info.bytes_per_block, 0);
        assert_eq!(info.data_size(), None);
    }

    #[test]
    fn test_copy_operations_not_supported() {
        let tex = texture(16, 16, DxgiFormat::BC1_UNORM);
        let frame = DdsFrame::new(&tex, FrameAddress::default());
        let mut buffer = vec![0u8; 128];

        assert!(matches!(
            frame.copy_pixels(None, 64, &mut buffer),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(
            frame.copy_blocks(Some(Rect::default()), 32, &mut buffer),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(frame.pixel_format(), Err(Error::Unsupported(_))));
        assert!(matches!(frame.thumbnail(), Err(Error::Unsupported(_))));
    }
}
