use std::io;

use thiserror::Error;

use crate::section::SectionTag;

#[derive(Debug, Error)]
pub enum Error {
    /// The file does not start with the PF2 magic.
    #[error("Not a PF2 font file")]
    NotPF2,

    #[error("Unexpected end of file")]
    UnexpectedEOF,

    /// Neither the requested code point nor the missing character has an index entry
    #[error("No glyph for U+{code_point:04X} and no fallback glyph for {missing_character:?}")]
    GlyphNotFound {
        code_point: u32,
        missing_character: char,
    },

    #[error("Section {tag} has invalid length {length}")]
    InvalidSectionLength { tag: SectionTag, length: i32 },

    /// A glyph offset that resolves to a position before the start of the file
    #[error("Glyph offset {offset} is out of range")]
    OffsetOutOfRange { offset: i64 },

    /// The font was closed before the lookup
    #[error("Font has been closed")]
    Closed,

    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        match value.kind() {
            io::ErrorKind::UnexpectedEof => Self::UnexpectedEOF,
            _ => Self::Io(value),
        }
    }
}
