//! DXGI pixel formats and the block table.

use std::fmt;

use crate::header::FourCC;

/// A `DXGI_FORMAT` value.
///
/// Kept as a raw number because some producers store arbitrary DXGI values
/// directly in the legacy FourCC slot; those pass through unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct DxgiFormat(pub u32);

impl DxgiFormat {
    pub const UNKNOWN: Self = Self(0);
    pub const BC1_TYPELESS: Self = Self(70);
    pub const BC1_UNORM: Self = Self(71);
    pub const BC1_UNORM_SRGB: Self = Self(72);
    pub const BC2_TYPELESS: Self = Self(73);
    pub const BC2_UNORM: Self = Self(74);
    pub const BC2_UNORM_SRGB: Self = Self(75);
    pub const BC3_TYPELESS: Self = Self(76);
    pub const BC3_UNORM: Self = Self(77);
    pub const BC3_UNORM_SRGB: Self = Self(78);

    /// Block width and height used for every block-compressed format.
    pub const BLOCK_DIM: u32 = 4;

    /// Bytes per 4x4 block, or `None` if the decoder does not handle the format.
    pub fn bytes_per_block(self) -> Option<u32> {
        match self {
            Self::BC1_TYPELESS | Self::BC1_UNORM | Self::BC1_UNORM_SRGB => Some(8),
            Self::BC2_TYPELESS
            | Self::BC2_UNORM
            | Self::BC2_UNORM_SRGB
            | Self::BC3_TYPELESS
            | Self::BC3_UNORM
            | Self::BC3_UNORM_SRGB => Some(16),
            _ => None,
        }
    }

    /// Short name for the formats the decoder knows about.
    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::UNKNOWN => "UNKNOWN",
            Self::BC1_TYPELESS => "BC1_TYPELESS",
            Self::BC1_UNORM => "BC1_UNORM",
            Self::BC1_UNORM_SRGB => "BC1_UNORM_SRGB",
            Self::BC2_TYPELESS => "BC2_TYPELESS",
            Self::BC2_UNORM => "BC2_UNORM",
            Self::BC2_UNORM_SRGB => "BC2_UNORM_SRGB",
            Self::BC3_TYPELESS => "BC3_TYPELESS",
            Self::BC3_UNORM => "BC3_UNORM",
            Self::BC3_UNORM_SRGB => "BC3_UNORM_SRGB",
            _ => return None,
        })
    }
}

impl From<u32> for DxgiFormat {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Debug for DxgiFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "DxgiFormat::{name}"),
            None => write!(f, "DxgiFormat({})", self.0),
        }
    }
}

impl fmt::Display for DxgiFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#x}", self.0),
        }
    }
}

/// Map a legacy FourCC to a DXGI format.
///
/// `DX10` yields [`DxgiFormat::UNKNOWN`] since the real format lives in the
/// extended header. Unrecognized codes are taken as raw DXGI values.
pub fn format_from_fourcc(four_cc: FourCC) -> DxgiFormat {
    match four_cc {
        FourCC::DXT1 => DxgiFormat::BC1_UNORM,
        FourCC::DXT2 | FourCC::DXT3 => DxgiFormat::BC2_UNORM,
        FourCC::DXT4 | FourCC::DXT5 => DxgiFormat::BC3_UNORM,
        FourCC::DX10 => DxgiFormat::UNKNOWN,
        other => DxgiFormat(other.to_u32()),
    }
}
