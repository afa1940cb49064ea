use std::io;

use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while building a bucket table, searching the
/// index or rendering corpus context.
///
/// "No occurrences" is not an error; see `engine::Lookup`.
#[derive(Debug, Error)]
pub enum Error {
    /// A character outside the alphabet (when hashing) or outside the codec
    /// (when encoding).
    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),

    /// An empty query, or an index record with an empty word field.
    #[error("invalid word: a word needs at least one character")]
    InvalidWord,

    /// A context window that does not fit inside the corpus.
    #[error("offset {offset} with word length {len} is outside the corpus ({size} bytes)")]
    OutOfBounds { offset: u64, len: u64, size: u64 },

    /// The bucket table file has the wrong size or a negative entry.
    #[error("corrupt bucket table: {0}")]
    CorruptTable(String),

    /// The builder saw a hash smaller than its predecessor.
    #[error("index is not sorted: record at byte {offset} hashes below its predecessor")]
    UnsortedIndex { offset: u64 },

    /// An index record whose offset field is missing or not a number.
    #[error("malformed index record at byte {offset}")]
    MalformedRecord { offset: u64 },

    /// An underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
