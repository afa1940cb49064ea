//! Bucket table binary format.
//!
//! ```text
//! [entry 0: i64 LE][entry 1: i64 LE] ... [entry 26999: i64 LE]
//! ```
//!
//! No header, no footer: the file is exactly [`TABLE_BYTES`] long and entry
//! `h` lives at bytes `[8h, 8h + 8)`. Offsets are stored signed for
//! compatibility with existing tables; a negative entry is corruption.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use lexicon::{Error, Result, HASH_SPACE};
use std::io::{Read, Seek, SeekFrom, Write};

/// Number of entries, one per prefix hash.
pub const TABLE_ENTRIES: usize = HASH_SPACE as usize;

/// Size of one entry in bytes.
pub const ENTRY_BYTES: u64 = 8;

/// Exact size of a bucket table file: `27000 * 8`.
pub const TABLE_BYTES: u64 = TABLE_ENTRIES as u64 * ENTRY_BYTES;

/// Byte position of entry `hash`.
#[must_use]
pub fn entry_pos(hash: u32) -> u64 {
    u64::from(hash) * ENTRY_BYTES
}

/// Writes every entry of `table` to `w`.
///
/// # Errors
///
/// [`Error::CorruptTable`] if `table` does not have [`TABLE_ENTRIES`]
/// entries or an offset does not fit an `i64`, otherwise any I/O error.
pub fn write_table<W: Write>(w: &mut W, table: &[u64]) -> Result<()> {
    if table.len() != TABLE_ENTRIES {
        return Err(Error::CorruptTable(format!(
            "expected {} entries, got {}",
            TABLE_ENTRIES,
            table.len()
        )));
    }
    for &offset in table {
        let signed = i64::try_from(offset)
            .map_err(|_| Error::CorruptTable(format!("offset {} overflows i64", offset)))?;
        w.write_i64::<LittleEndian>(signed)?;
    }
    Ok(())
}

/// Reads a whole table from `r`.
pub fn read_table<R: Read>(r: &mut R) -> Result<Vec<u64>> {
    let mut table = Vec::with_capacity(TABLE_ENTRIES);
    for hash in 0..HASH_SPACE {
        table.push(read_offset(r, hash)?);
    }
    Ok(table)
}

/// Reads the single entry for `hash` by seeking to it.
pub fn read_entry<R: Read + Seek>(r: &mut R, hash: u32) -> Result<u64> {
    r.seek(SeekFrom::Start(entry_pos(hash)))?;
    read_offset(r, hash)
}

fn read_offset<R: Read>(r: &mut R, hash: u32) -> Result<u64> {
    let raw = r.read_i64::<LittleEndian>()?;
    u64::try_from(raw)
        .map_err(|_| Error::CorruptTable(format!("negative offset {} in bucket {}", raw, hash)))
}
