use crate::{section::SectionTag, Error, Readable};

/// Font-wide properties, collected from the sections before the glyph data.
///
/// Every field is optional since a PF2 file is free to omit any of these sections.
/// The string fields hold the raw section payload (GRUB includes the trailing `NUL`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontMetadata {
    pub font_name: Option<Vec<u8>>,
    pub family: Option<Vec<u8>>,
    pub weight: Option<Vec<u8>>,
    pub slant: Option<Vec<u8>>,

    /// The nominal size of the font, in points
    pub point_size: Option<u16>,

    /// Width of the widest glyph, in pixels
    pub max_width: Option<u16>,

    /// Height of the tallest glyph, in pixels
    pub max_height: Option<u16>,

    pub ascent: Option<u16>,
    pub descent: Option<u16>,
}

impl FontMetadata {
    /// Store the payload of a metadata section in the field that belongs to `tag`.
    ///
    /// Unknown tags are ignored.
    pub fn apply(&mut self, tag: SectionTag, payload: Vec<u8>) -> Result<(), Error> {
        match tag {
            SectionTag::FontName => replace(&mut self.font_name, tag, payload),
            SectionTag::Family => replace(&mut self.family, tag, payload),
            SectionTag::Weight => replace(&mut self.weight, tag, payload),
            SectionTag::Slant => replace(&mut self.slant, tag, payload),
            SectionTag::PointSize => replace(&mut self.point_size, tag, read_u16(tag, &payload)?),
            SectionTag::MaxWidth => replace(&mut self.max_width, tag, read_u16(tag, &payload)?),
            SectionTag::MaxHeight => replace(&mut self.max_height, tag, read_u16(tag, &payload)?),
            SectionTag::Ascent => replace(&mut self.ascent, tag, read_u16(tag, &payload)?),
            SectionTag::Descent => replace(&mut self.descent, tag, read_u16(tag, &payload)?),
            SectionTag::Unknown(_) => {
                log::warn!("Ignoring unknown {tag} section ({} bytes)", payload.len());
            },
            SectionTag::CharacterIndex | SectionTag::Data => {},
        }

        Ok(())
    }
}

/// Integer sections only use their first two bytes
fn read_u16(tag: SectionTag, payload: &[u8]) -> Result<u16, Error> {
    u16::read(payload).map_err(|_| Error::InvalidSectionLength {
        tag,
        length: payload.len() as i32,
    })
}

fn replace<T>(field: &mut Option<T>, tag: SectionTag, value: T) {
    if field.replace(value).is_some() {
        log::warn!("Duplicate {tag} section, using the last one");
    }
}
