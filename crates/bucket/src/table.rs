use lexicon::{Error, Result, HASH_SPACE};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::format::{read_entry, TABLE_BYTES};

/// Read-only handle on a bucket table file.
///
/// Entries are read on demand with a seek + 8-byte read; the table is never
/// loaded whole. The file handle sits behind a `Mutex` so lookups work
/// through `&self`.
pub struct BucketTable {
    path: PathBuf,
    file: Mutex<BufReader<File>>,
}

impl BucketTable {
    /// Opens a table file.
    ///
    /// # Errors
    ///
    /// [`Error::CorruptTable`] unless the file is exactly
    /// [`TABLE_BYTES`](crate::TABLE_BYTES) long, or any I/O error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let len = file.metadata()?.len();
        if len != TABLE_BYTES {
            return Err(Error::CorruptTable(format!(
                "{} is {} bytes, expected {}",
                path.display(),
                len,
                TABLE_BYTES
            )));
        }
        Ok(Self {
            path,
            file: Mutex::new(BufReader::new(file)),
        })
    }

    /// Path the table was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `table[hash]`: the index offset of the first record with a
    /// hash at or above `hash`.
    pub fn offset(&self, hash: u32) -> Result<u64> {
        if hash >= HASH_SPACE {
            return Err(Error::CorruptTable(format!("bucket {} out of range", hash)));
        }
        let mut f = self.file.lock().unwrap_or_else(|e| e.into_inner());
        read_entry(&mut *f, hash)
    }

    /// Returns the `[left, right)` span of the index holding bucket `hash`.
    ///
    /// `right` is `table[hash + 1]`, or `index_len` for the last bucket. An
    /// empty bucket gives `left == right`.
    ///
    /// # Errors
    ///
    /// [`Error::CorruptTable`] if the span is reversed or runs past
    /// `index_len`, which means the table was built from a different index.
    pub fn window(&self, hash: u32, index_len: u64) -> Result<(u64, u64)> {
        let left = self.offset(hash)?;
        let right = if hash + 1 < HASH_SPACE {
            self.offset(hash + 1)?
        } else {
            index_len
        };
        if left > right || right > index_len {
            return Err(Error::CorruptTable(format!(
                "bucket {} spans [{}, {}) but the index is {} bytes",
                hash, left, right, index_len
            )));
        }
        Ok((left, right))
    }
}

impl std::fmt::Debug for BucketTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketTable")
            .field("path", &self.path)
            .finish()
    }
}
