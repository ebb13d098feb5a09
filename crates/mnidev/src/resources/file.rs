//! Access to the game's packed data file and to files lying next to it.

use std::{collections::BTreeMap, path::Path};

use crate::{
    errors::{Error, Result},
    utils::mem_reader::SliceMemReader,
};

use self::directory::{RawEntry, read_directory};

pub mod directory;
pub mod loose;
pub mod replacement;

/// A CMP archive: a fixed size directory followed by the contents of the
/// files it names.
///
/// The whole archive is held in memory. Lookups by name are exact and case
/// sensitive; the game stores every name in upper case.
#[derive(Clone)]
pub struct CmpArchive {
    data: Vec<u8>,
    entries: Vec<RawEntry>,
    by_name: BTreeMap<String, usize>,
}

impl std::fmt::Debug for CmpArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmpArchive")
            .field("size", &self.data.len())
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl CmpArchive {
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|err| Error::io(path, err))?;
        Self::from_bytes(data)
    }

    /// Parses an archive from its raw bytes. Every directory entry must lie
    /// within the data.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let entries = read_directory(&data)?;
        let reader = SliceMemReader::new("cmp", &data);
        let mut by_name = BTreeMap::new();
        for (index, entry) in entries.iter().enumerate() {
            reader.sub_reader_at(entry.name(), entry.offset(), Some(entry.size()))?;
            if by_name.contains_key(entry.name()) {
                log::warn!(
                    "Archive lists {} more than once, using the first entry",
                    entry.name()
                );
                continue;
            }
            by_name.insert(entry.name().to_owned(), index);
        }
        Ok(CmpArchive {
            data,
            entries,
            by_name,
        })
    }

    fn entry(&self, name: &str) -> Option<&RawEntry> {
        self.by_name.get(name).map(|&index| &self.entries[index])
    }

    /// Returns a copy of the named file's contents.
    pub fn file(&self, name: &str) -> Result<Vec<u8>> {
        let entry = self.entry(name).ok_or_else(|| Error::not_found(name))?;
        let start = entry.offset();
        Ok(self.data[start..start + entry.size()].to_vec())
    }

    #[must_use]
    pub fn has_file(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// File names in directory order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(RawEntry::name)
    }

    /// File names and sizes in directory order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|entry| (entry.name(), entry.size()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
