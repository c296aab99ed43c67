//! [PF2](http://grub.gibibit.com/New_font_format) bitmap font reader.
//!
//! PF2 is the font format used by the GRUB bootloader. A font file is a sequence of
//! tagged sections: metadata, an index from code points to glyph offsets and
//! finally the glyph data itself. Glyphs are only decoded when they are looked up.
//!
//! ```no_run
//! use pf2::{Font, Options};
//!
//! let mut font = Font::open("unicode.pf2", Options::default())?;
//! if font.is_pf2() {
//!     let glyph = font.get('A')?;
//!     for row in glyph.rows() {
//!         let line: String = row.iter().map(|&set| if set { '#' } else { '.' }).collect();
//!         println!("{line}");
//!     }
//! }
//! font.close();
//! # Ok::<(), pf2::Error>(())
//! ```

mod error;
mod font;
pub mod glyph;
pub mod index;
mod metadata;
pub mod section;
pub mod source;
mod stream;

pub use error::Error;
pub use font::{Font, OffsetBase, Options};
pub use glyph::Glyph;
pub use index::{CharacterIndex, Compression, IndexEntry};
pub use metadata::FontMetadata;
pub use section::SectionTag;
pub use stream::{s16be, s32be, u16be, u32be, ReadExt, Readable};
