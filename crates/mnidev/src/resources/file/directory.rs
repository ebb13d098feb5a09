//! The directory at the start of a CMP archive.

use crate::utils::mem_reader::{self, FixedSize, MemReader, Parse, SliceMemReader};

/// Size of the directory region. The file contents start after it.
pub const DIRECTORY_SIZE: usize = 4000;

/// Length of the NUL-padded name field of an entry.
pub const ENTRY_NAME_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawEntry {
    name: String,
    offset: u32,
    size: u32,
}

impl RawEntry {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset as usize
    }

    pub(crate) fn size(&self) -> usize {
        self.size as usize
    }
}

impl FixedSize for RawEntry {
    const SIZE: usize = ENTRY_NAME_LEN + 8;
}

impl Parse for RawEntry {
    fn parse<M: MemReader>(reader: &mut M) -> mem_reader::Result<Self> {
        let mut name_bytes = [0u8; ENTRY_NAME_LEN];
        reader.read_exact(&mut name_bytes)?;
        let name_len = name_bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(ENTRY_NAME_LEN);
        let name_bytes = &name_bytes[..name_len];
        if !name_bytes.is_ascii() {
            return Err(reader.create_invalid_data_error(format!(
                "Entry name {name_bytes:02X?} is not ASCII"
            )));
        }
        let name = String::from_utf8_lossy(name_bytes).into_owned();
        let offset = reader.read_u32_le()?;
        let size = reader.read_u32_le()?;
        Ok(RawEntry { name, offset, size })
    }
}

/// Reads directory entries up to the first one with an empty name, or until
/// the directory region is used up.
pub(crate) fn read_directory(data: &[u8]) -> mem_reader::Result<Vec<RawEntry>> {
    let mut reader = SliceMemReader::new("cmp", data);
    let mut directory = reader.read_to_subreader("directory", DIRECTORY_SIZE)?;
    let mut entries = Vec::new();
    while directory.remaining() >= RawEntry::SIZE {
        let entry = RawEntry::parse(&mut directory)?;
        if entry.name.is_empty() {
            break;
        }
        entries.push(entry);
    }
    Ok(entries)
}
