//! DDS header structures.
//!
//! These are read verbatim from the stream, so the layouts are packed and
//! their sizes are checked at compile time.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// DDS file magic ("DDS " read as a little-endian u32).
pub const DDS_MAGIC: u32 = 0x2053_4444;

/// Pixel format flags (`DdsPixelFormat::flags`).
pub mod pf_flags {
    pub const ALPHAPIXELS: u32 = 0x0000_0001;
    pub const ALPHA: u32 = 0x0000_0002;
    pub const FOURCC: u32 = 0x0000_0004;
    pub const PALETTEINDEXED8: u32 = 0x0000_0020;
    pub const RGB: u32 = 0x0000_0040;
    pub const LUMINANCE: u32 = 0x0002_0000;
    pub const BUMPDUDV: u32 = 0x0008_0000;
}

/// Surface capability flags stored in `DdsHeader::caps2`.
pub mod caps2 {
    pub const CUBEMAP: u32 = 0x0000_0200;
    pub const VOLUME: u32 = 0x0020_0000;
}

/// DDS file header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// Whether a [`DdsHeaderDxt10`] follows this header in the stream.
    ///
    /// The FourCC is only meaningful when the pixel format says so.
    pub fn has_extended_header(&self) -> bool {
        let flags = self.pixel_format.flags;
        let four_cc = self.pixel_format.four_cc;
        flags & pf_flags::FOURCC != 0 && four_cc == FourCC::DX10
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

/// Four-character code for compression type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT2 compression (premultiplied DXT3).
    pub const DXT2: Self = Self(*b"DXT2");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT4 compression (premultiplied DXT5).
    pub const DXT4: Self = Self(*b"DXT4");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");

    /// The code as stored on disk, read as a little-endian u32.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Build a code from its little-endian u32 value.
    #[inline]
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_le_bytes())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            write!(f, "FourCC({:?})", String::from_utf8_lossy(&self.0))
        } else {
            write!(f, "FourCC({:#010x})", self.to_u32())
        }
    }
}

/// DX10 extended header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeaderDxt10 {
    /// DXGI format.
    pub dxgi_format: u32,
    /// Resource dimension.
    pub resource_dimension: u32,
    /// Misc flags.
    pub misc_flag: u32,
    /// Array size.
    pub array_size: u32,
    /// Misc flags 2.
    pub misc_flags2: u32,
}

impl DdsHeaderDxt10 {
    /// Expected header size.
    pub const SIZE: usize = 20;

    /// `D3D10_RESOURCE_DIMENSION_TEXTURE1D`.
    pub const DIMENSION_TEXTURE1D: u32 = 2;
    /// `D3D10_RESOURCE_DIMENSION_TEXTURE2D`.
    pub const DIMENSION_TEXTURE2D: u32 = 3;
    /// `D3D10_RESOURCE_DIMENSION_TEXTURE3D`.
    pub const DIMENSION_TEXTURE3D: u32 = 4;

    /// `misc_flag` bit marking a cube texture.
    pub const MISC_TEXTURECUBE: u32 = 0x0000_0004;

    /// Bits of `misc_flags2` holding the alpha mode.
    pub const MISC_FLAGS2_ALPHA_MODE_MASK: u32 = 0x0000_0007;

    /// Whether `misc_flag` marks a cube texture.
    pub fn is_cube(&self) -> bool {
        self.misc_flag & Self::MISC_TEXTURECUBE != 0
    }
}

const _: () = assert!(std::mem::size_of::<DdsPixelFormat>() == 32);
const _: () = assert!(std::mem::size_of::<DdsHeader>() == DdsHeader::SIZE as usize);
const _: () = assert!(std::mem::size_of::<DdsHeaderDxt10>() == DdsHeaderDxt10::SIZE);

#[cfg(test)]
mod tests {
    use zerocopy::FromZeros;

    use super::*;

    fn header_with(flags: u32, four_cc: FourCC) -> DdsHeader {
        let mut header = DdsHeader::new_zeroed();
        header.size = DdsHeader::SIZE;
        header.pixel_format.size = 32;
        header.pixel_format.flags = flags;
        header.pixel_format.four_cc = four_cc;
        header
    }

    #[test]
    fn test_magic_matches_ascii() {
        assert_eq!(DDS_MAGIC.to_le_bytes(), *b"DDS ");
    }

    #[test]
    fn test_fourcc_u32() {
        assert_eq!(FourCC::DX10.to_u32(), 0x3031_5844);
        assert_eq!(FourCC::from_u32(FourCC::DXT5.to_u32()), FourCC::DXT5);
    }

    #[test]
    fn test_extended_header_requires_fourcc_flag() {
        assert!(header_with(pf_flags::FOURCC, FourCC::DX10).has_extended_header());
        assert!(!header_with(0, FourCC::DX10).has_extended_header());
        assert!(!header_with(pf_flags::FOURCC, FourCC::DXT1).has_extended_header());
    }

    #[test]
    fn test_header_field_offsets() {
        let mut header = DdsHeader::new_zeroed();
        header.width = 0x11;
        header.pixel_format.four_cc = FourCC::DXT1;
        header.caps2 = caps2::VOLUME;

        let bytes = header.as_bytes();
        assert_eq!(bytes[12], 0x11);
        assert_eq!(&bytes[80..84], b"DXT1");
        assert_eq!(&bytes[108..112], &caps2::VOLUME.to_le_bytes());
    }
}
