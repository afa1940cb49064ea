use lexicon::{Alphabet, Error, Result};
use std::ffi::OsString;
use std::fs::{rename, File, OpenOptions};
use std::io::{BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::cursor::IndexCursor;
use crate::format::{write_table, TABLE_BYTES, TABLE_ENTRIES};

/// Default distance of one skip-ahead probe, in bytes.
pub const DEFAULT_SKIP_STRIDE: u64 = 2500;

/// Default size of the tail of the index that is always scanned record by
/// record, in bytes.
pub const DEFAULT_TRAILING_MARGIN: u64 = 5000;

/// Tuning for the skip-ahead heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Bytes to jump per probe. `0` disables probing.
    pub skip_stride: u64,
    /// No probe lands within this many bytes of the end of the index.
    pub trailing_margin: u64,
}

impl BuildOptions {
    /// Options that visit every record.
    #[must_use]
    pub fn exact() -> Self {
        Self {
            skip_stride: 0,
            trailing_margin: 0,
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            skip_stride: DEFAULT_SKIP_STRIDE,
            trailing_margin: DEFAULT_TRAILING_MARGIN,
        }
    }
}

/// Counters collected during one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Records read by the exact scan (probes not included).
    pub records_scanned: u64,
    /// Skip-ahead probes issued.
    pub probes: u64,
    /// Hashes with at least one record.
    pub buckets_populated: u32,
    /// Length of the index that was scanned.
    pub index_bytes: u64,
    /// Wall time of the build, set by [`BucketTableBuilder::build_file`].
    pub elapsed: Duration,
}

/// Builds the bucket table from a sorted word index in a single forward
/// pass.
///
/// The builder reads records one at a time until the hash changes, fills the
/// new bucket (and every empty bucket before it) with the record's offset,
/// then jumps ahead by [`BuildOptions::skip_stride`] bytes at a time while
/// the record it lands on still has the same hash. When a probe sees a
/// different hash the builder returns to the last probe that did not and
/// scans exactly from there.
///
/// Probes always realign to a record start beyond the last confirmed one, so
/// they only skip records known to share the current hash. The result is
/// identical to a scan of every record.
#[derive(Debug, Clone)]
pub struct BucketTableBuilder {
    alphabet: Alphabet,
    options: BuildOptions,
}

impl BucketTableBuilder {
    /// Creates a builder for the default alphabet.
    #[must_use]
    pub fn new(options: BuildOptions) -> Self {
        Self::with_alphabet(Alphabet::default(), options)
    }

    /// Creates a builder hashing with `alphabet`.
    #[must_use]
    pub fn with_alphabet(alphabet: Alphabet, options: BuildOptions) -> Self {
        Self { alphabet, options }
    }

    /// Scans `index` (`index_len` bytes long) and returns the table in
    /// memory.
    ///
    /// Buckets after the last populated hash are set to `index_len`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsortedIndex`] if a record hashes below its predecessor.
    /// - [`Error::InvalidWord`] / [`Error::UnsupportedCharacter`] for a
    ///   record whose word cannot be hashed.
    /// - [`Error::Io`] on any read or seek failure.
    pub fn build<R: Read + Seek>(&self, index: R, index_len: u64) -> Result<(Vec<u64>, BuildStats)> {
        let mut cursor = IndexCursor::new(index);
        let mut table = vec![0u64; TABLE_ENTRIES];
        let mut stats = BuildStats {
            index_bytes: index_len,
            ..BuildStats::default()
        };

        // Entries [0, filled) are final.
        let mut filled = 0usize;
        let mut prev_hash: Option<u32> = None;

        loop {
            let ptr = cursor.position();
            let curr = match cursor.next_record()? {
                Some(record) => self.alphabet.hash(record.word)?,
                None => break,
            };
            stats.records_scanned += 1;

            if let Some(prev) = prev_hash {
                if curr < prev {
                    return Err(Error::UnsortedIndex { offset: ptr });
                }
                if curr == prev {
                    continue;
                }
            }

            let curr_idx = curr as usize;
            table[filled..=curr_idx].fill(ptr);
            filled = curr_idx + 1;
            stats.buckets_populated += 1;
            prev_hash = Some(curr);
            debug!(hash = curr, offset = ptr, "bucket starts");

            if self.options.skip_stride > 0
                && ptr.saturating_add(self.options.trailing_margin) < index_len
            {
                self.skip_ahead(&mut cursor, curr, index_len, &mut stats)?;
            }
        }

        table[filled..].fill(index_len);
        Ok((table, stats))
    }

    /// Jumps forward while the probed record still hashes to `hash`, then
    /// leaves the cursor at the last record confirmed to have that hash.
    fn skip_ahead<R: Read + Seek>(
        &self,
        cursor: &mut IndexCursor<R>,
        hash: u32,
        index_len: u64,
        stats: &mut BuildStats,
    ) -> Result<()> {
        let limit = index_len.saturating_sub(self.options.trailing_margin);
        let mut confirmed = cursor.position();

        loop {
            let probe = confirmed + self.options.skip_stride;
            if probe >= limit {
                break;
            }
            stats.probes += 1;
            if !cursor.seek_next_record(probe)? {
                break;
            }
            let at = cursor.position();
            let probed = match cursor.next_record()? {
                Some(record) => self.alphabet.hash(record.word)?,
                None => break,
            };
            if probed != hash {
                break;
            }
            confirmed = at;
        }

        cursor.seek(confirmed)?;
        Ok(())
    }

    /// Builds the table for the index at `index_path` and writes it to
    /// `table_path`.
    ///
    /// # Crash Safety
    ///
    /// The table is written to `<table_path>.tmp`, fsynced, then atomically
    /// renamed. An aborted build leaves at most the temp file behind; the
    /// previous table (if any) stays intact.
    pub fn build_file(&self, index_path: &Path, table_path: &Path) -> Result<BuildStats> {
        let started = Instant::now();
        let index = File::open(index_path)?;
        let index_len = index.metadata()?.len();
        info!(
            index = %index_path.display(),
            bytes = index_len,
            stride = self.options.skip_stride,
            margin = self.options.trailing_margin,
            "building bucket table"
        );

        let (table, mut stats) = self.build(index, index_len)?;

        let tmp_path = tmp_path_for(table_path);
        if let Err(e) = write_durably(&tmp_path, table_path, &table) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e);
        }

        if let Some(parent) = table_path.parent() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        stats.elapsed = started.elapsed();
        info!(
            table = %table_path.display(),
            records = stats.records_scanned,
            probes = stats.probes,
            buckets = stats.buckets_populated,
            bytes_written = TABLE_BYTES,
            elapsed = ?stats.elapsed,
            "bucket table complete"
        );
        Ok(stats)
    }
}

/// Writes `table` to `tmp_path`, fsyncs it and renames it over `table_path`.
fn write_durably(tmp_path: &Path, table_path: &Path, table: &[u64]) -> Result<()> {
    let raw_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp_path)?;
    let mut file = BufWriter::new(raw_file);
    write_table(&mut file, table)?;
    file.flush()?;
    file.into_inner().map_err(|e| e.into_error())?.sync_all()?;
    rename(tmp_path, table_path)?;
    Ok(())
}

/// `<path>.tmp`, next to the final table.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
