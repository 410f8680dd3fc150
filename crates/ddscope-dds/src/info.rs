//! Normalized texture description derived from the DDS headers.
//!
//! Everything here is a pure function of the header bytes.

use std::fmt;

use crate::format::{format_from_fourcc, DxgiFormat};
use crate::header::{caps2, DdsHeader, DdsHeaderDxt10, FourCC};

/// Texture dimension kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DdsDimension {
    Texture1D,
    Texture2D,
    Texture3D,
    TextureCube,
}

impl fmt::Display for DdsDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Texture1D => "1D",
            Self::Texture2D => "2D",
            Self::Texture3D => "3D",
            Self::TextureCube => "cube",
        })
    }
}

/// How the alpha channel should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DdsAlphaMode {
    #[default]
    Unknown,
    Straight,
    Premultiplied,
    Opaque,
    Custom,
}

impl fmt::Display for DdsAlphaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::Straight => "straight",
            Self::Premultiplied => "premultiplied",
            Self::Opaque => "opaque",
            Self::Custom => "custom",
        })
    }
}

/// Determine the dimension kind.
///
/// With an extended header the cube flag takes priority over the declared
/// resource dimension, and unknown dimensions fall back to 2D. Legacy headers
/// only distinguish cube, volume and plain 2D through `caps2`.
pub fn dimension(header: &DdsHeader, dxt10: Option<&DdsHeaderDxt10>) -> DdsDimension {
    if let Some(dxt10) = dxt10 {
        if dxt10.is_cube() {
            return DdsDimension::TextureCube;
        }
        return match dxt10.resource_dimension {
            DdsHeaderDxt10::DIMENSION_TEXTURE1D => DdsDimension::Texture1D,
            DdsHeaderDxt10::DIMENSION_TEXTURE2D => DdsDimension::Texture2D,
            DdsHeaderDxt10::DIMENSION_TEXTURE3D => DdsDimension::Texture3D,
            _ => DdsDimension::Texture2D,
        };
    }

    let caps = header.caps2;
    if caps & caps2::CUBEMAP != 0 {
        DdsDimension::TextureCube
    } else if caps & caps2::VOLUME != 0 {
        DdsDimension::Texture3D
    } else {
        DdsDimension::Texture2D
    }
}

/// Alpha semantics implied by a legacy FourCC.
pub fn alpha_mode_from_fourcc(four_cc: FourCC) -> DdsAlphaMode {
    match four_cc {
        FourCC::DXT1 | FourCC::DXT2 | FourCC::DXT4 => DdsAlphaMode::Premultiplied,
        FourCC::DXT3 | FourCC::DXT5 => DdsAlphaMode::Straight,
        _ => DdsAlphaMode::Unknown,
    }
}

/// Alpha semantics stored in the low bits of the extended header's `misc_flags2`.
pub fn alpha_mode_from_misc_flags2(misc_flags2: u32) -> DdsAlphaMode {
    match misc_flags2 & DdsHeaderDxt10::MISC_FLAGS2_ALPHA_MODE_MASK {
        1 => DdsAlphaMode::Straight,
        2 => DdsAlphaMode::Premultiplied,
        3 => DdsAlphaMode::Opaque,
        4 => DdsAlphaMode::Custom,
        _ => DdsAlphaMode::Unknown,
    }
}

/// Size of a texture edge at `level`, halving per level down to 1.
///
/// A zero size stays zero.
#[inline]
pub fn mip_dimension(size: u32, level: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    size.checked_shr(level).unwrap_or(0).max(1)
}

/// Depth of a volume texture at `level`, halving per level down to 1.
#[inline]
pub fn depth_at_mip(depth: u32, level: u32) -> u32 {
    mip_dimension(depth, level)
}

/// Total depth slices of the first `levels` mips of a volume.
///
/// Levels past the point where the depth reaches 1 add one slice each and
/// are summed in one step, so huge mip counts stay cheap.
pub fn mip_chain_slices(depth: u32, levels: u32) -> u32 {
    let mut total = 0u32;
    let mut current = depth.max(1);
    let mut level = 0;
    while level < levels && current > 1 {
        total = total.saturating_add(current);
        current /= 2;
        level += 1;
    }
    total.saturating_add(levels - level)
}

/// Number of addressable frames.
///
/// Plain textures have one frame per (array, mip) pair. Volume textures have
/// one frame per depth slice of every mip, and levels beyond the point where
/// the depth reaches 1 still contribute one slice each.
pub fn frame_count(depth: u32, mip_levels: u32, array_size: u32) -> u32 {
    mip_chain_slices(depth, mip_levels).saturating_mul(array_size)
}

/// Normalized description of a DDS texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    pub frame_count: u32,
    pub format: DxgiFormat,
    pub dimension: DdsDimension,
    pub alpha_mode: DdsAlphaMode,
}

impl TextureInfo {
    /// Derive the texture description from the parsed headers.
    ///
    /// Zero depth, mip count and array size are treated as 1.
    pub fn from_headers(header: &DdsHeader, dxt10: Option<&DdsHeaderDxt10>) -> Self {
        let depth = nonzero_or_one(header.depth);
        let mip_levels = nonzero_or_one(header.mipmap_count);

        let (array_size, format, alpha_mode) = match dxt10 {
            Some(ext) => (
                nonzero_or_one(ext.array_size),
                DxgiFormat(ext.dxgi_format),
                alpha_mode_from_misc_flags2(ext.misc_flags2),
            ),
            None => {
                let four_cc = header.pixel_format.four_cc;
                (1, format_from_fourcc(four_cc), alpha_mode_from_fourcc(four_cc))
            }
        };

        Self {
            width: header.width,
            height: header.height,
            depth,
            mip_levels,
            array_size,
            frame_count: frame_count(depth, mip_levels, array_size),
            format,
            dimension: dimension(header, dxt10),
            alpha_mode,
        }
    }

    /// Frames belonging to one array slot (the whole mip chain with its slices).
    #[inline]
    pub fn frames_per_array_slot(&self) -> u32 {
        (self.frame_count / self.array_size.max(1)).max(1)
    }
}

#[inline]
fn nonzero_or_one(value: u32) -> u32 {
    if value == 0 {
        1
    } else {
        value
    }
}

/// Location of a single frame inside a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrameAddress {
    pub array_index: u32,
    pub mip_level: u32,
    pub slice_index: u32,
}

impl FrameAddress {
    pub const fn new(array_index: u32, mip_level: u32, slice_index: u32) -> Self {
        Self {
            array_index,
            mip_level,
            slice_index,
        }
    }

    /// Split a flat frame index into (array, mip, slice).
    ///
    /// Indices past the end produce an address that [`FrameAddress::is_within`]
    /// rejects; the mip walk stops once it runs off the chain.
    pub fn from_index(info: &TextureInfo, index: u32) -> Self {
        let per_slot = info.frames_per_array_slot();
        let array_index = index / per_slot;
        let mut remainder = index % per_slot;

        let mut depth = info.depth;
        let mut mip_level = 0u32;
        while remainder >= depth && mip_level < info.mip_levels {
            if depth <= 1 {
                // One slice per remaining level.
                mip_level = mip_level.saturating_add(remainder);
                remainder = 0;
                break;
            }
            remainder -= depth;
            mip_level += 1;
            depth /= 2;
        }

        Self::new(array_index, mip_level, remainder)
    }

    /// Flat frame index of this address.
    pub fn to_index(&self, info: &TextureInfo) -> u32 {
        let preceding = mip_chain_slices(info.depth, self.mip_level);
        self.array_index
            .saturating_mul(info.frames_per_array_slot())
            .saturating_add(preceding)
            .saturating_add(self.slice_index)
    }

    /// Whether each coordinate is within the texture's declared bounds.
    ///
    /// The slice is checked against the base depth, not the depth of the
    /// addressed mip.
    pub fn is_within(&self, info: &TextureInfo) -> bool {
        self.array_index < info.array_size
            && self.mip_level < info.mip_levels
            && self.slice_index < info.depth
    }
}

impl fmt::Display for FrameAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "array {} / mip {} / slice {}",
            self.array_index, self.mip_level, self.slice_index
        )
    }
}
