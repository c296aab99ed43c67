//! Glyph records inside the `DATA` section

use crate::{source::DataSource, stream::ReadExt, Error};

/// Size of the fixed part of a glyph record
///
/// Consists of:
/// * Width (2 bytes)
/// * Height (2 bytes)
/// * X offset (2 bytes)
/// * Y offset (2 bytes)
/// * Device width (2 bytes)
pub const GLYPH_HEADER_SIZE: usize = 10;

/// A decoded glyph.
///
/// Every lookup produces a new, independent glyph; nothing refers back to the font.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Glyph {
    /// Width of the bitmap in pixels
    pub width: u16,

    /// Height of the bitmap in pixels
    pub height: u16,

    /// Horizontal distance from the pen position to the left edge of the bitmap
    pub x_offset: i16,

    /// Vertical distance from the baseline to the bottom edge of the bitmap
    pub y_offset: i16,

    /// How far the pen advances after drawing this glyph
    pub device_width: i16,

    /// `width * height` bits, row-major, most significant bit first.
    ///
    /// Rows are not padded individually, only the end of the bitmap is padded to a full byte.
    pub bitmap_data: Vec<u8>,
}

impl Glyph {
    /// Number of bytes used by a `width` x `height` bitmap
    #[must_use]
    pub fn bitmap_len(width: u16, height: u16) -> usize {
        (usize::from(width) * usize::from(height)).div_ceil(8)
    }

    /// Read the glyph record at the current position of `source`
    pub fn decode(source: &mut dyn DataSource) -> Result<Self, Error> {
        let width = source.read_value()?;
        let height = source.read_value()?;
        let x_offset = source.read_value()?;
        let y_offset = source.read_value()?;
        let device_width = source.read_value()?;
        let bitmap_data = source.read_bytes(Self::bitmap_len(width, height))?;

        Ok(Self {
            width,
            height,
            x_offset,
            y_offset,
            device_width,
            bitmap_data,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the pixel at `(x, y)` is set, with `(0, 0)` being the top left corner.
    ///
    /// Coordinates outside of the bitmap are never set.
    #[must_use]
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        if self.width <= x || self.height <= y {
            return false;
        }

        let bit_index = usize::from(y) * usize::from(self.width) + usize::from(x);
        self.bitmap_data
            .get(bit_index / 8)
            .is_some_and(|byte| byte & (0x80 >> (bit_index % 8)) != 0)
    }

    /// Iterate over the rows of the bitmap, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = Vec<bool>> + '_ {
        (0..self.height).map(move |y| (0..self.width).map(|x| self.pixel(x, y)).collect())
    }
}
