//! Walks the tagged sections at the start of a PF2 file.
//!
//! ## Reference Material:
//! * <http://grub.gibibit.com/New_font_format>

use std::{fmt, io::Read};

use crate::{
    index::{CharacterIndex, IndexEntry},
    metadata::FontMetadata,
    stream::ReadExt,
    Error, Readable,
};

/// The first twelve bytes of every PF2 file.
///
/// This is itself a section header: the tag `FILE`, a length of 4 and the payload `PFF2`.
pub const MAGIC: &[u8; 12] = b"FILE\x00\x00\x00\x04PFF2";

/// Size of a single record inside the `CHIX` section
///
/// Consists of:
/// * Code point (4 bytes)
/// * Compression flag (1 byte)
/// * Glyph offset (4 bytes)
pub const CHIX_RECORD_SIZE: usize = 4 + 1 + 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionTag {
    /// `NAME`
    FontName,
    /// `FAMI`
    Family,
    /// `WEIG`
    Weight,
    /// `SLAN`
    Slant,
    /// `PTSZ`
    PointSize,
    /// `MAXW`
    MaxWidth,
    /// `MAXH`
    MaxHeight,
    /// `ASCE`
    Ascent,
    /// `DESC`
    Descent,
    /// `CHIX`
    CharacterIndex,
    /// `DATA`
    Data,
    Unknown([u8; 4]),
}

impl SectionTag {
    #[must_use]
    pub fn as_bytes(&self) -> [u8; 4] {
        match self {
            Self::FontName => *b"NAME",
            Self::Family => *b"FAMI",
            Self::Weight => *b"WEIG",
            Self::Slant => *b"SLAN",
            Self::PointSize => *b"PTSZ",
            Self::MaxWidth => *b"MAXW",
            Self::MaxHeight => *b"MAXH",
            Self::Ascent => *b"ASCE",
            Self::Descent => *b"DESC",
            Self::CharacterIndex => *b"CHIX",
            Self::Data => *b"DATA",
            Self::Unknown(tag) => *tag,
        }
    }
}

impl From<[u8; 4]> for SectionTag {
    fn from(value: [u8; 4]) -> Self {
        match &value {
            b"NAME" => Self::FontName,
            b"FAMI" => Self::Family,
            b"WEIG" => Self::Weight,
            b"SLAN" => Self::Slant,
            b"PTSZ" => Self::PointSize,
            b"MAXW" => Self::MaxWidth,
            b"MAXH" => Self::MaxHeight,
            b"ASCE" => Self::Ascent,
            b"DESC" => Self::Descent,
            b"CHIX" => Self::CharacterIndex,
            b"DATA" => Self::Data,
            _ => Self::Unknown(value),
        }
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_bytes().escape_ascii())
    }
}

impl Readable for SectionTag {
    const SIZE: usize = 4;

    fn read(bytes: &[u8]) -> Result<Self, Error> {
        <[u8; 4]>::read(bytes).map(Self::from)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionHeader {
    pub tag: SectionTag,

    /// Length of the payload in bytes.
    ///
    /// The format stores this as a signed integer, GRUB writes `-1` for the `DATA` section.
    pub length: i32,
}

impl Readable for SectionHeader {
    const SIZE: usize = 8;

    fn read(bytes: &[u8]) -> Result<Self, Error> {
        let tag = SectionTag::read(bytes)?;
        let length = i32::read(bytes.get(4..).unwrap_or_default())?;
        Ok(Self { tag, length })
    }
}

/// Everything that precedes the glyph data
#[derive(Clone, Debug, Default)]
pub struct Sections {
    pub metadata: FontMetadata,
    pub index: CharacterIndex,
}

#[derive(Clone, Debug)]
pub enum Scan {
    /// The magic did not match, nothing after it was read
    NotPF2,

    /// The `DATA` header was reached.
    ///
    /// The reader is positioned on the first byte of glyph data.
    Complete(Sections),
}

/// Read everything up to (and including) the `DATA` section header.
///
/// Reaching the end of the input before the `DATA` section is an error.
pub fn scan<R: Read>(reader: &mut R) -> Result<Scan, Error> {
    // A file shorter than the magic is not a PF2 file, not a truncated one
    let mut magic = Vec::with_capacity(MAGIC.len());
    reader.by_ref().take(MAGIC.len() as u64).read_to_end(&mut magic)?;
    if magic != MAGIC {
        log::warn!(
            "Invalid PF2 magic: {:?}, expected {:?}",
            magic.escape_ascii().to_string(),
            MAGIC.escape_ascii().to_string()
        );
        return Ok(Scan::NotPF2);
    }

    let mut sections = Sections::default();

    loop {
        let header: SectionHeader = reader.read_value()?;
        log::debug!("Found {} section of length {}", header.tag, header.length);

        match header.tag {
            SectionTag::CharacterIndex => {
                if !sections.index.is_empty() {
                    log::debug!(
                        "Another CHIX section, dropping the {} entries read so far",
                        sections.index.len()
                    );
                }
                sections.index = read_character_index(reader, header.length)?;
            },
            SectionTag::Data => return Ok(Scan::Complete(sections)),
            SectionTag::Unknown(_) => {
                let length = payload_length(header)?;
                log::warn!("Skipping unknown {} section ({length} bytes)", header.tag);
                reader.skip_bytes(length as u64)?;
            },
            tag => {
                let payload = reader.read_bytes(payload_length(header)?)?;
                sections.metadata.apply(tag, payload)?;
            },
        }
    }
}

fn payload_length(header: SectionHeader) -> Result<usize, Error> {
    usize::try_from(header.length).map_err(|_| Error::InvalidSectionLength {
        tag: header.tag,
        length: header.length,
    })
}

fn read_character_index<R: Read>(reader: &mut R, length: i32) -> Result<CharacterIndex, Error> {
    // A negative length holds no records
    let length = usize::try_from(length).unwrap_or_default();
    let num_records = length / CHIX_RECORD_SIZE;
    let remainder = length % CHIX_RECORD_SIZE;

    let mut index = CharacterIndex::new();
    for _ in 0..num_records {
        let code_point = reader.read_value()?;
        let compression = reader.read_value::<u8>()?;
        let offset = reader.read_value()?;
        index.insert(code_point, IndexEntry::new(compression.into(), offset));
    }

    if remainder != 0 {
        log::debug!(
            "CHIX section length {length} is not a multiple of {CHIX_RECORD_SIZE}, ignoring {remainder} trailing bytes"
        );
        reader.skip_bytes(remainder as u64)?;
    }

    Ok(index)
}
