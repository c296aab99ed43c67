//! Storage for the glyph data section
//!
//! Glyph records are either read from the font file on demand or from a copy of
//! the data section that was loaded into memory while opening the font.
//! Positions are always relative to the first byte of glyph data.

use std::io::{self, Read, Seek, SeekFrom};

use crate::Error;

pub trait DataSource: Read {
    /// Move to `position` bytes past the start of the glyph data.
    ///
    /// Positions past the end of the data are allowed, reading from them fails.
    fn seek_to(&mut self, position: u64) -> Result<(), Error>;

    /// Give up any external resource held by the source.
    ///
    /// Calling this more than once has no effect.
    fn release(&mut self);

    fn is_released(&self) -> bool;
}

/// Reads glyph data directly from the underlying file
#[derive(Debug)]
pub struct StreamSource<R> {
    /// `None` once the source has been released
    reader: Option<R>,

    /// Position of the glyph data inside the underlying reader
    base: u64,
}

impl<R: Read + Seek> StreamSource<R> {
    /// Create a source whose glyph data starts at the current position of `reader`
    pub fn new(mut reader: R) -> Result<Self, Error> {
        let base = reader.stream_position()?;
        Ok(Self {
            reader: Some(reader),
            base,
        })
    }

    #[must_use]
    pub fn base(&self) -> u64 {
        self.base
    }
}

impl<R: Read> Read for StreamSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reader.as_mut() {
            Some(reader) => reader.read(buf),
            None => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "glyph data stream was released",
            )),
        }
    }
}

impl<R: Read + Seek> DataSource for StreamSource<R> {
    fn seek_to(&mut self, position: u64) -> Result<(), Error> {
        let reader = self.reader.as_mut().ok_or(Error::Closed)?;
        let absolute = self
            .base
            .checked_add(position)
            .ok_or(Error::OffsetOutOfRange {
                offset: position as i64,
            })?;
        reader.seek(SeekFrom::Start(absolute))?;
        Ok(())
    }

    fn release(&mut self) {
        if self.reader.take().is_some() {
            log::debug!("Released glyph data stream");
        }
    }

    fn is_released(&self) -> bool {
        self.reader.is_none()
    }
}

/// Holds a copy of the entire glyph data section
#[derive(Clone, Debug, Default)]
pub struct BufferedSource {
    bytes: Vec<u8>,
    ptr: usize,
}

impl BufferedSource {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes, ptr: 0 }
    }

    /// Load everything that is left in `reader`
    pub fn load<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes)?;
        Ok(Self::new(bytes))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Read for BufferedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.bytes.get(self.ptr..).unwrap_or_default();
        let num_bytes = remaining.len().min(buf.len());
        buf[..num_bytes].copy_from_slice(&remaining[..num_bytes]);
        self.ptr += num_bytes;
        Ok(num_bytes)
    }
}

impl DataSource for BufferedSource {
    fn seek_to(&mut self, position: u64) -> Result<(), Error> {
        // Positions that don't fit into memory are past the end anyways
        self.ptr = usize::try_from(position).unwrap_or(usize::MAX);
        Ok(())
    }

    fn release(&mut self) {}

    fn is_released(&self) -> bool {
        false
    }
}
