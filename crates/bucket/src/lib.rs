//! # Bucket - prefix-hash table over the sorted word index
//!
//! The sorted word index is a text file of `<word> <offset>\n` records. It
//! is far too large to load, so lookups need a way to jump close to the
//! right place. The bucket table provides it: one entry per prefix hash
//! (see [`lexicon::Alphabet::hash`]) holding the byte offset of the first
//! record with that hash.
//!
//! ## File layout
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ table[0]      i64 LE   offset of first record with hash 0     │
//! │ table[1]      i64 LE   offset of first record with hash 1     │
//! │ ...                                                           │
//! │ table[26999]  i64 LE   offset of first record with hash 26999 │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exactly `27000 * 8 = 216000` bytes. A hash with no records gets the
//! offset of the next populated hash (gap fill), so `table[h] == table[h+1]`
//! means bucket `h` is empty, and `[table[h], table[h+1])` always bounds the
//! records of bucket `h`. Hashes past the last populated one hold the index
//! length.
//!
//! ## Components
//!
//! | Module      | Purpose                                             |
//! |-------------|-----------------------------------------------------|
//! | `cursor`    | [`IndexCursor`]: record-aligned reads over the index |
//! | `format`    | entry layout, table read/write helpers              |
//! | `builder`   | [`BucketTableBuilder`]: single pass with skip-ahead |
//! | `table`     | [`BucketTable`]: seek-based reader                  |

mod builder;
mod cursor;
mod format;
mod table;

pub use builder::{
    BucketTableBuilder, BuildOptions, BuildStats, DEFAULT_SKIP_STRIDE, DEFAULT_TRAILING_MARGIN,
};
pub use cursor::{IndexCursor, Record};
pub use format::{entry_pos, read_table, write_table, ENTRY_BYTES, TABLE_BYTES, TABLE_ENTRIES};
pub use table::BucketTable;

#[cfg(test)]
mod tests;
