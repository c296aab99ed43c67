//! The `CHIX` table, mapping code points to glyph locations

use std::collections::{btree_map, BTreeMap};

/// The per-glyph compression flag.
///
/// Glyph bitmaps are always decoded as stored; this flag is only recorded so that
/// callers can tell whether a bitmap needs further processing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Compression(u8);

impl Compression {
    /// The bitmap is stored as-is
    pub const NONE: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        self.0 != Self::NONE.0
    }
}

impl From<u8> for Compression {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub compression: Compression,

    /// Where the glyph record starts, see [OffsetBase](crate::OffsetBase)
    pub offset: i32,
}

impl IndexEntry {
    #[must_use]
    pub fn new(compression: Compression, offset: i32) -> Self {
        Self {
            compression,
            offset,
        }
    }
}

/// Sparse map from code point to glyph location
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterIndex {
    entries: BTreeMap<u32, IndexEntry>,
}

impl CharacterIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous entry for the same code point
    pub fn insert(&mut self, code_point: u32, entry: IndexEntry) {
        if self.entries.insert(code_point, entry).is_some() {
            log::debug!("Duplicate index entry for U+{code_point:04X}");
        }
    }

    #[must_use]
    pub fn get(&self, code_point: u32) -> Option<IndexEntry> {
        self.entries.get(&code_point).copied()
    }

    #[must_use]
    pub fn contains(&self, code_point: u32) -> bool {
        self.entries.contains_key(&code_point)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in ascending code point order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

pub struct Iter<'a> {
    inner: btree_map::Iter<'a, u32, IndexEntry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (u32, IndexEntry);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(&code_point, &entry)| (code_point, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a CharacterIndex {
    type Item = (u32, IndexEntry);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
