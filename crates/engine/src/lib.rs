//! # Engine - word lookup over the sorted index
//!
//! Ties the [`lexicon`] hash, the [`bucket`] table and the two data files
//! together into a single query context.
//!
//! ## Query path
//!
//! ```text
//! word
//!   |  trim, lower-case, encode, hash            (Hash)
//!   v
//! table[h] .. table[h+1]  -> [left, right)       (BoundedWindow)
//!   |  left == right? -> NoOccurrences(EmptyBucket)
//!   v
//! binary search while right - left > 1000       (NarrowedWindow)
//!   v
//! back up to a record start, scan forward        (FirstMatch)
//!   |  passed it / end of file? -> NoOccurrences(NotInWindow)
//!   v
//! collect every record with the same word        (Enumerate)
//!   v
//! Occurrences { word, offsets }                  (Done)
//! ```
//!
//! Each offset is then turned into display text by the
//! [`ContextRenderer`], which reads a small window of the corpus around it.
//!
//! ## Module Responsibilities
//!
//! | Module      | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `lib.rs`    | `QueryEngine` struct, constructor, accessors     |
//! | [`query`]   | `lookup()` and its search stages                 |
//! | [`context`] | `ContextRenderer`: clamped corpus windows        |
//!
//! Nothing is loaded whole: the table is read one entry at a time and both
//! data files are accessed with seeks and short reads.

mod context;
mod query;

pub use context::{ContextRenderer, DEFAULT_CONTEXT_RADIUS};
pub use query::{Lookup, Miss, Occurrences, LINEAR_SCAN_THRESHOLD};

use bucket::{BucketTable, IndexCursor};
use lexicon::{Alphabet, Codec, Result, Windows1252};
use std::fs::File;
use std::path::Path;

/// One open set of index, bucket table and corpus.
///
/// All state of a query run lives here; nothing is global. The engine is
/// generic over the [`Codec`] so another single-byte encoding can be
/// swapped in without touching the search.
pub struct QueryEngine<C: Codec = Windows1252> {
    /// Cursor over the sorted word index.
    pub(crate) index: IndexCursor<File>,
    /// Length of the index file in bytes.
    pub(crate) index_len: u64,
    pub(crate) table: BucketTable,
    pub(crate) alphabet: Alphabet,
    pub(crate) codec: C,
    pub(crate) renderer: ContextRenderer<C>,
}

impl QueryEngine<Windows1252> {
    /// Opens the three files with the default Windows-1252 codec and a
    /// context radius of [`DEFAULT_CONTEXT_RADIUS`].
    ///
    /// # Errors
    ///
    /// Any I/O error opening the files, or [`lexicon::Error::CorruptTable`]
    /// if the table file has the wrong size.
    pub fn open<P: AsRef<Path>>(index_path: P, table_path: P, corpus_path: P) -> Result<Self> {
        Self::with_codec(index_path, table_path, corpus_path, Windows1252)
    }
}

impl<C: Codec + Clone> QueryEngine<C> {
    /// Opens the three files, encoding queries and decoding context with
    /// `codec`.
    pub fn with_codec<P: AsRef<Path>>(
        index_path: P,
        table_path: P,
        corpus_path: P,
        codec: C,
    ) -> Result<Self> {
        let index = File::open(index_path.as_ref())?;
        let index_len = index.metadata()?.len();
        let table = BucketTable::open(table_path)?;
        let renderer = ContextRenderer::open(corpus_path, DEFAULT_CONTEXT_RADIUS, codec.clone())?;

        Ok(Self {
            index: IndexCursor::new(index),
            index_len,
            table,
            alphabet: Alphabet::default(),
            codec,
            renderer,
        })
    }
}

impl<C: Codec> QueryEngine<C> {
    /// Returns the index length in bytes.
    #[must_use]
    pub fn index_len(&self) -> u64 {
        self.index_len
    }

    /// Returns the corpus length in bytes.
    #[must_use]
    pub fn corpus_len(&self) -> u64 {
        self.renderer.corpus_len()
    }

    /// Returns the number of corpus bytes shown on each side of a match.
    #[must_use]
    pub fn context_radius(&self) -> u64 {
        self.renderer.radius()
    }

    /// Updates the context radius.
    pub fn set_context_radius(&mut self, radius: u64) {
        self.renderer.set_radius(radius);
    }

    /// Renders the corpus around a `word_len`-byte occurrence at `offset`.
    ///
    /// # Errors
    ///
    /// [`lexicon::Error::OutOfBounds`] if the offset does not fit in the
    /// corpus; the other occurrences are unaffected.
    pub fn render(&mut self, offset: u64, word_len: u64) -> Result<String> {
        self.renderer.render(offset, word_len)
    }
}

impl<C: Codec> std::fmt::Debug for QueryEngine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("index_len", &self.index_len)
            .field("corpus_len", &self.renderer.corpus_len())
            .field("table", &self.table)
            .field("context_radius", &self.renderer.radius())
            .finish()
    }
}

#[cfg(test)]
mod tests;
