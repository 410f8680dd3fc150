//! Stream reading helpers for fixed-layout structures.
//!
//! File headers are read directly from a `std::io::Read` stream into
//! zerocopy structs. Unlike `read_exact`, a short read is reported together
//! with the number of bytes that were actually available, so callers can
//! tell a truncated file apart from a failing stream.

use std::io::{self, Read};

use zerocopy::FromBytes;

use crate::{Error, Result};

/// Trait for reading binary data from streams.
///
/// This extends `Read` with methods for reading fixed-size structures.
pub trait ReadExt: Read {
    /// Fill `buf` as far as the stream allows.
    ///
    /// Returns the number of bytes read, which is less than `buf.len()` only
    /// when the stream reached its end.
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    /// Read a structure from the stream.
    ///
    /// Fails with [`Error::UnexpectedEof`] if the stream ends early and with
    /// [`Error::Io`] if the underlying reader fails.
    fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let mut bytes = vec![0u8; size];
        let read = self.read_up_to(&mut bytes)?;
        if read != size {
            return Err(Error::UnexpectedEof {
                needed: size,
                available: read,
            });
        }
        T::read_from_bytes(&bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: read,
        })
    }
}

impl<R: Read + ?Sized> ReadExt for R {}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
    #[repr(C, packed)]
    struct Pair {
        a: u32,
        b: u16,
    }

    /// Hands out at most one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_read_struct() {
        let mut cursor = Cursor::new([0x01u8, 0x02, 0x03, 0x04, 0x05, 0x06]);
        let pair: Pair = cursor.read_struct().unwrap();
        let (a, b) = (pair.a, pair.b);
        assert_eq!(a, u32::from_le_bytes([0x01, 0x02, 0x03, 0x04]));
        assert_eq!(b, u16::from_le_bytes([0x05, 0x06]));
    }

    #[test]
    fn test_short_read_reports_available() {
        let mut cursor = Cursor::new([0x01u8, 0x02, 0x03]);
        match cursor.read_struct::<Pair>() {
            Err(Error::UnexpectedEof { needed, available }) => {
                assert_eq!(needed, 6);
                assert_eq!(available, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_read_up_to_handles_partial_reads() {
        let data = [1u8, 2, 3, 4, 5];
        let mut reader = Trickle(&data);
        let mut buf = [0u8; 4];
        assert_eq!(reader.read_up_to(&mut buf).unwrap(), 4);
        assert_eq!(buf, [1, 2, 3, 4]);
        let mut rest = [0u8; 4];
        assert_eq!(reader.read_up_to(&mut rest).unwrap(), 1);
    }
}
