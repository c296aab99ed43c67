//! Big-endian integer decoding
//!
//! Every integer in a PF2 file is stored in network byte order.

use std::io::{self, Read};

use crate::Error;

/// Interpret two bytes as a big-endian unsigned integer
#[inline]
#[must_use]
pub const fn u16be(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

/// Interpret two bytes as a big-endian two's complement integer
#[inline]
#[must_use]
pub const fn s16be(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// Interpret four bytes as a big-endian unsigned integer
#[inline]
#[must_use]
pub const fn u32be(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Interpret four bytes as a big-endian two's complement integer
#[inline]
#[must_use]
pub const fn s32be(bytes: [u8; 4]) -> i32 {
    i32::from_be_bytes(bytes)
}

/// Trait for things that can be read from a byte stream
pub trait Readable: Sized {
    const SIZE: usize = std::mem::size_of::<Self>();

    fn read(bytes: &[u8]) -> Result<Self, Error>;
}

/// Split off the first `N` bytes, failing if there are not enough of them
fn leading<const N: usize>(bytes: &[u8]) -> Result<[u8; N], Error> {
    bytes
        .get(..N)
        .and_then(|prefix| prefix.try_into().ok())
        .ok_or(Error::UnexpectedEOF)
}

impl Readable for u8 {
    fn read(bytes: &[u8]) -> Result<Self, Error> {
        bytes.first().copied().ok_or(Error::UnexpectedEOF)
    }
}

impl Readable for u16 {
    fn read(bytes: &[u8]) -> Result<Self, Error> {
        leading(bytes).map(u16be)
    }
}

impl Readable for i16 {
    fn read(bytes: &[u8]) -> Result<Self, Error> {
        leading(bytes).map(s16be)
    }
}

impl Readable for u32 {
    fn read(bytes: &[u8]) -> Result<Self, Error> {
        leading(bytes).map(u32be)
    }
}

impl Readable for i32 {
    fn read(bytes: &[u8]) -> Result<Self, Error> {
        leading(bytes).map(s32be)
    }
}

impl Readable for [u8; 4] {
    fn read(bytes: &[u8]) -> Result<Self, Error> {
        leading(bytes)
    }
}

/// The largest [Readable::SIZE] of any type in this crate
const MAX_READABLE_SIZE: usize = 8;

/// Extension methods for pulling PF2 values out of a [Read]er
pub trait ReadExt: Read {
    fn read_value<T: Readable>(&mut self) -> Result<T, Error> {
        let mut buffer = [0; MAX_READABLE_SIZE];
        let buffer = &mut buffer[..T::SIZE];
        self.read_exact(buffer)?;
        T::read(buffer)
    }

    /// Read exactly `num_bytes` bytes.
    ///
    /// The buffer grows with the bytes that are actually read, a length taken from the
    /// input is never allocated up front.
    fn read_bytes(&mut self, num_bytes: usize) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        Read::take(self, num_bytes as u64).read_to_end(&mut bytes)?;
        if bytes.len() != num_bytes {
            return Err(Error::UnexpectedEOF);
        }
        Ok(bytes)
    }

    /// Consume and discard exactly `num_bytes` bytes
    fn skip_bytes(&mut self, num_bytes: u64) -> Result<(), Error>
    where
        Self: Sized,
    {
        let skipped = io::copy(&mut self.by_ref().take(num_bytes), &mut io::sink())?;
        if skipped != num_bytes {
            return Err(Error::UnexpectedEOF);
        }
        Ok(())
    }
}

impl<R: Read + ?Sized> ReadExt for R {}
