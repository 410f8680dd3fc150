//! DDS decoder session.

use std::io::{Read, Seek, SeekFrom};

use ddscope_common::ReadExt;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::codec::{BitmapDecoder, ContainerFormat, DdsDecoderExt};
use crate::frame::DdsFrame;
use crate::header::{DdsHeader, DdsHeaderDxt10, DDS_MAGIC};
use crate::info::{FrameAddress, TextureInfo};
use crate::{Error, Result};

/// Headers and derived description of an initialized decoder.
struct Session<R> {
    stream: R,
    header: DdsHeader,
    header_dxt10: Option<DdsHeaderDxt10>,
    info: TextureInfo,
}

impl<R: Read + Seek> Session<R> {
    fn read(mut stream: R) -> Result<Self> {
        stream.seek(SeekFrom::Start(0))?;

        let magic = u32::from_le_bytes(stream.read_struct::<[u8; 4]>()?);
        if magic != DDS_MAGIC {
            return Err(Error::UnknownFormat(magic));
        }

        let header: DdsHeader = stream.read_struct()?;
        let size = header.size;
        if size != DdsHeader::SIZE {
            return Err(Error::BadHeader {
                expected: DdsHeader::SIZE,
                actual: size,
            });
        }

        let header_dxt10 = if header.has_extended_header() {
            Some(stream.read_struct::<DdsHeaderDxt10>()?)
        } else {
            None
        };

        let info = TextureInfo::from_headers(&header, header_dxt10.as_ref());

        Ok(Self {
            stream,
            header,
            header_dxt10,
            info,
        })
    }
}

enum State<R> {
    Uninitialized,
    Initialized(Session<R>),
}

/// Decoder for a single DDS stream.
///
/// Created empty, then bound to a stream once with
/// [`initialize`](Self::initialize). Every operation holds the internal lock
/// for its whole duration, so a decoder can be shared between threads.
///
/// # Example
///
/// ```no_run
/// use ddscope_dds::{BitmapDecoder, BitmapFrame, DdsDecoder};
///
/// let file = std::fs::File::open("texture.dds")?;
/// let decoder = DdsDecoder::new();
/// decoder.initialize(file)?;
///
/// for index in 0..decoder.frame_count()? {
///     let frame = decoder.frame(index)?;
///     println!("{}: {:?}", frame.address(), frame.size());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DdsDecoder<R> {
    state: Mutex<State<R>>,
}

impl<R: Read + Seek> DdsDecoder<R> {
    /// Create an uninitialized decoder.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::Uninitialized),
        }
    }

    /// Create a decoder and initialize it with `stream`.
    pub fn open(stream: R) -> Result<Self> {
        let decoder = Self::new();
        decoder.initialize(stream)?;
        Ok(decoder)
    }

    /// Read and validate the headers from the start of `stream`.
    ///
    /// On success the decoder keeps the stream until it is dropped. On
    /// failure it stays uninitialized.
    pub fn initialize(&self, stream: R) -> Result<()> {
        trace!("initializing DDS decoder");

        let mut state = self.state.lock();
        if matches!(*state, State::Initialized(_)) {
            return Err(Error::WrongState);
        }

        let session = Session::read(stream)?;
        let info = &session.info;
        debug!(
            width = info.width,
            height = info.height,
            depth = info.depth,
            mip_levels = info.mip_levels,
            array_size = info.array_size,
            frame_count = info.frame_count,
            format = %info.format,
            dimension = %info.dimension,
            alpha_mode = %info.alpha_mode,
            "parsed DDS header"
        );

        *state = State::Initialized(session);
        Ok(())
    }

    /// Probe a stream's decodability without binding it.
    pub fn query_capability(&self, _stream: &mut R) -> Result<u32> {
        Err(Error::Unsupported("capability query"))
    }
}

impl<R: Read + Seek> Default for DdsDecoder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> DdsDecoder<R> {
    /// Whether `initialize` has succeeded on this decoder.
    pub fn is_initialized(&self) -> bool {
        matches!(*self.state.lock(), State::Initialized(_))
    }

    /// Copy of the raw header.
    pub fn header(&self) -> Result<DdsHeader> {
        self.with_session(|session| Ok(session.header))
    }

    /// Copy of the DX10 extended header, if the file has one.
    pub fn header_dxt10(&self) -> Result<Option<DdsHeaderDxt10>> {
        self.with_session(|session| Ok(session.header_dxt10))
    }

    /// Give back the stream the decoder was initialized with.
    pub fn into_stream(self) -> Option<R> {
        match self.state.into_inner() {
            State::Initialized(session) => Some(session.stream),
            State::Uninitialized => None,
        }
    }

    fn with_session<T>(&self, f: impl FnOnce(&Session<R>) -> Result<T>) -> Result<T> {
        match &*self.state.lock() {
            State::Initialized(session) => f(session),
            State::Uninitialized => Err(Error::WrongState),
        }
    }
}

fn frame_at(info: &TextureInfo, address: FrameAddress) -> Result<DdsFrame> {
    if !address.is_within(info) {
        return Err(Error::InvalidArgument(format!(
            "frame address ({address}) is outside array size {}, mip levels {}, depth {}",
            info.array_size, info.mip_levels, info.depth
        )));
    }
    Ok(DdsFrame::new(info, address))
}

impl<R> BitmapDecoder for DdsDecoder<R> {
    type Frame = DdsFrame;

    fn container_format(&self) -> ContainerFormat {
        ContainerFormat::DDS
    }

    fn frame_count(&self) -> Result<u32> {
        let count = self.with_session(|session| Ok(session.info.frame_count))?;
        trace!(count, "frame count");
        Ok(count)
    }

    fn frame(&self, index: u32) -> Result<DdsFrame> {
        trace!(index, "get frame");
        self.with_session(|session| {
            let address = FrameAddress::from_index(&session.info, index);
            frame_at(&session.info, address)
        })
    }

    fn copy_palette(&self, _palette: &mut Vec<u32>) -> Result<()> {
        Err(Error::PaletteUnavailable)
    }

    fn thumbnail(&self) -> Result<DdsFrame> {
        Err(Error::NoThumbnail)
    }
}

impl<R> DdsDecoderExt for DdsDecoder<R> {
    fn parameters(&self) -> Result<TextureInfo> {
        self.with_session(|session| Ok(session.info))
    }

    fn frame_by_address(
        &self,
        array_index: u32,
        mip_level: u32,
        slice_index: u32,
    ) -> Result<DdsFrame> {
        trace!(array_index, mip_level, slice_index, "get frame by address");
        self.with_session(|session| {
            frame_at(
                &session.info,
                FrameAddress::new(array_index, mip_level, slice_index),
            )
        })
    }
}
