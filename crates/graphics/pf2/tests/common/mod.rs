//! Synthesizes PF2 files for the integration tests

#![allow(dead_code)]

use std::{env, fs, path::PathBuf, process};

use pf2::{glyph::GLYPH_HEADER_SIZE, section::MAGIC, Glyph};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug, Default)]
pub struct FontBuilder {
    sections: Vec<Vec<u8>>,
    index: Vec<(u32, u8, i32)>,
    data: Vec<u8>,
    index_position: Option<usize>,
}

impl FontBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metadata (or unknown) section
    pub fn section(mut self, tag: &[u8; 4], payload: &[u8]) -> Self {
        let mut bytes = tag.to_vec();
        bytes.extend_from_slice(&(payload.len() as i32).to_be_bytes());
        bytes.extend_from_slice(payload);
        self.sections.push(bytes);
        self
    }

    pub fn u16_section(self, tag: &[u8; 4], value: u16) -> Self {
        self.section(tag, &value.to_be_bytes())
    }

    /// Place the `CHIX` section here instead of after all other sections
    pub fn index_here(mut self) -> Self {
        self.index_position = Some(self.sections.len());
        self
    }

    /// Append a glyph to the data section and index it under `code_point`
    pub fn glyph(mut self, code_point: char, glyph: &Glyph) -> Self {
        let offset = self.data.len() as i32;
        self.data.extend_from_slice(&glyph.width.to_be_bytes());
        self.data.extend_from_slice(&glyph.height.to_be_bytes());
        self.data.extend_from_slice(&glyph.x_offset.to_be_bytes());
        self.data.extend_from_slice(&glyph.y_offset.to_be_bytes());
        self.data.extend_from_slice(&glyph.device_width.to_be_bytes());
        self.data.extend_from_slice(&glyph.bitmap_data);
        self.index.push((u32::from(code_point), 0, offset));
        self
    }

    /// Add an index entry without a glyph
    pub fn raw_entry(mut self, code_point: u32, compression: u8, offset: i32) -> Self {
        self.index.push((code_point, compression, offset));
        self
    }

    fn index_section(&self) -> Vec<u8> {
        let mut bytes = b"CHIX".to_vec();
        bytes.extend_from_slice(&(self.index.len() as i32 * 9).to_be_bytes());
        for (code_point, compression, offset) in &self.index {
            bytes.extend_from_slice(&code_point.to_be_bytes());
            bytes.push(*compression);
            bytes.extend_from_slice(&offset.to_be_bytes());
        }
        bytes
    }

    pub fn build(&self) -> Vec<u8> {
        let mut sections = self.sections.clone();
        let index_position = self.index_position.unwrap_or(sections.len());
        sections.insert(index_position, self.index_section());

        let mut bytes = MAGIC.to_vec();
        bytes.extend(sections.concat());
        bytes.extend_from_slice(b"DATA");
        bytes.extend_from_slice(&(-1_i32).to_be_bytes());
        bytes.extend_from_slice(&self.data);
        bytes
    }
}

pub fn glyph(width: u16, height: u16, device_width: i16, fill: u8) -> Glyph {
    Glyph {
        width,
        height,
        x_offset: 0,
        y_offset: -2,
        device_width,
        bitmap_data: vec![fill; Glyph::bitmap_len(width, height)],
    }
}

/// Size of a glyph record inside the data section
pub fn record_len(glyph: &Glyph) -> usize {
    GLYPH_HEADER_SIZE + glyph.bitmap_data.len()
}

/// A font file on disk that is removed again when dropped
pub struct TempFont {
    pub path: PathBuf,
}

impl TempFont {
    pub fn new(name: &str, bytes: &[u8]) -> Self {
        let path = env::temp_dir().join(format!("pf2-{}-{name}.pf2", process::id()));
        fs::write(&path, bytes).expect("failed to write temporary font");
        Self { path }
    }
}

impl Drop for TempFont {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
