use std::{
    fmt,
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

use crate::{
    glyph::Glyph,
    index::{CharacterIndex, Compression},
    metadata::FontMetadata,
    section::{self, Scan, Sections},
    source::{BufferedSource, DataSource, StreamSource},
    Error,
};

/// What the glyph offsets in the `CHIX` section are relative to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OffsetBase {
    /// Offsets count from the first byte after the `DATA` section header
    #[default]
    DataSection,

    /// Offsets are absolute positions in the file, as written by `grub-mkfont`
    File,
}

/// Controls how a font is loaded
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Copy the glyph data into memory and close the file right after opening
    pub buffer_in_memory: bool,

    /// Drawn in place of characters that the font does not contain
    pub missing_character: char,

    pub offset_base: OffsetBase,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            buffer_in_memory: false,
            missing_character: '?',
            offset_base: OffsetBase::default(),
        }
    }
}

/// A PF2 bitmap font.
///
/// Glyphs are decoded on demand, every lookup seeks to the glyph inside the data section.
/// Lookups take `&mut self` since they move the read position of the font; sharing a font
/// between threads requires a lock.
pub struct Font {
    state: State,
    options: Options,
}

enum State {
    /// The file did not start with the PF2 magic
    Invalid,
    Valid {
        metadata: FontMetadata,
        index: CharacterIndex,
        data: Box<dyn DataSource + Send>,

        /// Added to every index offset to make it relative to the start of the glyph data
        offset_correction: i64,
    },
}

impl Font {
    /// Open the font file at `path`.
    ///
    /// A file that is not a PF2 font still produces a [Font], check [Font::is_pf2]
    /// before using it.
    pub fn open<P: AsRef<Path>>(path: P, options: Options) -> Result<Self, Error> {
        let path = path.as_ref();
        log::debug!("Loading PF2 font from {}", path.display());

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), options)
    }

    /// Read a font from any seekable source, see [Font::open]
    pub fn from_reader<R>(mut reader: R, options: Options) -> Result<Self, Error>
    where
        R: Read + Seek + Send + 'static,
    {
        let Sections { metadata, index } = match section::scan(&mut reader)? {
            Scan::Complete(sections) => sections,
            Scan::NotPF2 => {
                return Ok(Self {
                    state: State::Invalid,
                    options,
                })
            },
        };

        let data_start = reader.stream_position()?;
        log::debug!(
            "Glyph data starts at {data_start:#x}, {} glyphs in index",
            index.len()
        );

        let data: Box<dyn DataSource + Send> = if options.buffer_in_memory {
            // The reader is dropped (and the file closed) once the data is copied
            let buffered = BufferedSource::load(reader)?;
            log::debug!("Buffered {} bytes of glyph data", buffered.len());
            Box::new(buffered)
        } else {
            Box::new(StreamSource::new(reader)?)
        };

        let offset_correction = match options.offset_base {
            OffsetBase::DataSection => 0,
            OffsetBase::File => -(data_start as i64),
        };

        Ok(Self {
            state: State::Valid {
                metadata,
                index,
                data,
                offset_correction,
            },
            options,
        })
    }

    /// Whether the file started with the PF2 magic.
    ///
    /// Every other operation fails with [Error::NotPF2] if this is `false`.
    #[must_use]
    pub fn is_pf2(&self) -> bool {
        matches!(self.state, State::Valid { .. })
    }

    pub fn metadata(&self) -> Result<&FontMetadata, Error> {
        match &self.state {
            State::Valid { metadata, .. } => Ok(metadata),
            State::Invalid => Err(Error::NotPF2),
        }
    }

    pub fn index(&self) -> Result<&CharacterIndex, Error> {
        match &self.state {
            State::Valid { index, .. } => Ok(index),
            State::Invalid => Err(Error::NotPF2),
        }
    }

    #[must_use]
    pub fn options(&self) -> Options {
        self.options
    }

    #[must_use]
    pub fn missing_character(&self) -> char {
        self.options.missing_character
    }

    #[must_use]
    pub fn is_buffered(&self) -> bool {
        self.is_pf2() && self.options.buffer_in_memory
    }

    /// Whether [Font::close] released the underlying file.
    ///
    /// Buffered fonts are never closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match &self.state {
            State::Valid { data, .. } => data.is_released(),
            State::Invalid => false,
        }
    }

    /// The compression flag stored for `code_point`, without falling back to the missing character
    pub fn compression(&self, code_point: u32) -> Result<Option<Compression>, Error> {
        Ok(self.index()?.get(code_point).map(|entry| entry.compression))
    }

    /// Decode the glyph for `code_point`.
    ///
    /// Code points that are not part of the font resolve to the glyph of the missing character.
    /// The compression flag of the glyph is ignored, see [Font::compression].
    pub fn lookup(&mut self, code_point: u32) -> Result<Glyph, Error> {
        let missing_character = self.options.missing_character;
        let State::Valid {
            index,
            data,
            offset_correction,
            ..
        } = &mut self.state
        else {
            return Err(Error::NotPF2);
        };

        if data.is_released() {
            return Err(Error::Closed);
        }

        let entry = match index.get(code_point) {
            Some(entry) => entry,
            None => {
                log::trace!(
                    "No glyph for U+{code_point:04X}, using {missing_character:?} instead"
                );
                index
                    .get(u32::from(missing_character))
                    .ok_or(Error::GlyphNotFound {
                        code_point,
                        missing_character,
                    })?
            },
        };

        let offset = i64::from(entry.offset) + *offset_correction;
        let position = u64::try_from(offset).map_err(|_| Error::OffsetOutOfRange { offset })?;

        data.seek_to(position)?;
        Glyph::decode(&mut **data)
    }

    /// Decode the glyph for `character`, see [Font::lookup]
    pub fn get(&mut self, character: char) -> Result<Glyph, Error> {
        self.lookup(u32::from(character))
    }

    /// Close the underlying file.
    ///
    /// Glyphs that were already decoded stay valid. Calling this more than once, or on a
    /// buffered font, has no effect. Dropping the font closes the file as well.
    pub fn close(&mut self) {
        if let State::Valid { data, .. } = &mut self.state {
            data.release();
        }
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Font");
        match &self.state {
            State::Valid {
                metadata, index, ..
            } => debug
                .field("metadata", metadata)
                .field("glyphs", &index.len())
                .field("closed", &self.is_closed()),
            State::Invalid => debug.field("is_pf2", &false),
        };
        debug.field("options", &self.options).finish()
    }
}
