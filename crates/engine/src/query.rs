//! Read path: `lookup()` and its stages.
//!
//! An empty bucket is answered from two table entries alone. A populated
//! bucket costs a handful of seek + read probes followed by one short
//! sequential scan.

use lexicon::{Codec, Error, Result};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, info};

use crate::QueryEngine;

/// Below this window size (in bytes) the binary search stops and the
/// remaining records are scanned sequentially.
pub const LINEAR_SCAN_THRESHOLD: u64 = 1000;

/// Why a lookup found nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
    /// No index record has the word's prefix hash; the index was not read.
    EmptyBucket,
    /// The bucket has records, but none for this exact word.
    NotInWindow,
}

/// Every occurrence of one word, in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrences {
    word: Vec<u8>,
    offsets: Vec<u64>,
}

impl Occurrences {
    /// The normalised, encoded query word.
    #[must_use]
    pub fn word(&self) -> &[u8] {
        &self.word
    }

    /// Byte length of the encoded word.
    #[must_use]
    pub fn word_len(&self) -> u64 {
        self.word.len() as u64
    }

    /// Corpus offsets, one per occurrence.
    #[must_use]
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Number of occurrences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always `false` for a [`Lookup::Found`] result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Outcome of [`QueryEngine::lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// At least one record matched the word exactly.
    Found(Occurrences),
    /// The word does not occur. This is a normal answer, not an error.
    NoOccurrences(Miss),
}

impl Lookup {
    /// Number of occurrences (zero for a miss).
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Lookup::Found(o) => o.len(),
            Lookup::NoOccurrences(_) => 0,
        }
    }

    /// Corpus offsets (empty for a miss).
    #[must_use]
    pub fn offsets(&self) -> &[u64] {
        match self {
            Lookup::Found(o) => o.offsets(),
            Lookup::NoOccurrences(_) => &[],
        }
    }
}

impl<C: Codec> QueryEngine<C> {
    /// Finds every occurrence of `word`.
    ///
    /// The word is trimmed and lower-cased before it is encoded and hashed.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidWord`] for an empty (or all-whitespace) word.
    /// - [`Error::UnsupportedCharacter`] if the word cannot be encoded or
    ///   any of its characters is outside the alphabet.
    /// - [`Error::CorruptTable`] if the table does not match the index.
    /// - [`Error::MalformedRecord`] for a matching record with a bad offset.
    /// - [`Error::Io`] on any read failure.
    pub fn lookup(&mut self, word: &str) -> Result<Lookup> {
        let started = Instant::now();
        let query = self.normalize(word)?;
        let hash = self.alphabet.hash(&query)?;

        let (left, right) = self.table.window(hash, self.index_len)?;
        debug!(hash, left, right, "bounded window");
        if left == right {
            info!(word, elapsed = ?started.elapsed(), "no occurrences (empty bucket)");
            return Ok(Lookup::NoOccurrences(Miss::EmptyBucket));
        }

        let (left, right) = self.narrow(&query, left, right)?;
        debug!(left, right, "narrowed window");

        let first = match self.first_match(&query, left)? {
            Some(first) => first,
            None => {
                info!(word, elapsed = ?started.elapsed(), "no occurrences");
                return Ok(Lookup::NoOccurrences(Miss::NotInWindow));
            }
        };
        debug!(first, "first match");

        let offsets = self.enumerate(&query, first)?;
        info!(word, count = offsets.len(), elapsed = ?started.elapsed(), "lookup complete");
        Ok(Lookup::Found(Occurrences {
            word: query,
            offsets,
        }))
    }

    /// Trim, lower-case and encode. Every byte must be in the alphabet,
    /// not just the hashed prefix.
    fn normalize(&self, word: &str) -> Result<Vec<u8>> {
        let word = word.trim();
        if word.is_empty() {
            return Err(Error::InvalidWord);
        }
        let query = self.codec.encode(&word.to_lowercase())?;
        if let Some(&byte) = query.iter().find(|&&b| !self.alphabet.contains(b)) {
            let c = self
                .codec
                .decode(&[byte])
                .chars()
                .next()
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(Error::UnsupportedCharacter(c));
        }
        Ok(query)
    }

    /// Binary search until the window is at most
    /// [`LINEAR_SCAN_THRESHOLD`] bytes wide.
    ///
    /// Invariant: the record containing `left` sorts before `query` (or
    /// `left` is the bucket start), and the first record at or after
    /// `right` does not.
    pub(crate) fn narrow(&mut self, query: &[u8], mut left: u64, mut right: u64) -> Result<(u64, u64)> {
        while right - left > LINEAR_SCAN_THRESHOLD {
            let mid = left + (right - left) / 2;
            let less = if self.index.seek_next_record(mid)? {
                match self.index.next_record()? {
                    Some(record) => record.word < query,
                    None => false,
                }
            } else {
                false
            };
            if less {
                left = mid;
            } else {
                right = mid;
            }
        }
        Ok((left, right))
    }

    /// Scans from the record containing `left` to the first record equal to
    /// `query`. Returns its start, or `None` once a greater word or the end
    /// of the index is reached.
    pub(crate) fn first_match(&mut self, query: &[u8], left: u64) -> Result<Option<u64>> {
        self.index.seek_record_start(left)?;
        while let Some(record) = self.index.next_record()? {
            match record.word.cmp(query) {
                Ordering::Less => continue,
                Ordering::Equal => return Ok(Some(record.start)),
                Ordering::Greater => return Ok(None),
            }
        }
        Ok(None)
    }

    /// Collects the corpus offsets of the contiguous run of `query` records
    /// starting at `first`.
    pub(crate) fn enumerate(&mut self, query: &[u8], first: u64) -> Result<Vec<u64>> {
        self.index.seek(first)?;
        let mut offsets = Vec::new();
        while let Some(record) = self.index.next_record()? {
            if record.word != query {
                break;
            }
            offsets.push(record.corpus_offset()?);
        }
        Ok(offsets)
    }
}
