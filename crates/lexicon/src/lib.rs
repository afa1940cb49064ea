//! # Lexicon - alphabet, codec and prefix hash
//!
//! The leaf crate of the konkordans workspace. Everything that decides how a
//! word is turned into bytes, and how those bytes are turned into a bucket
//! number, lives here:
//!
//! - [`Alphabet`] maps the 30 recognised single-byte characters
//!   (space, `a`-`z`, `ä`, `å`, `ö`) to ordinals `0..30`.
//! - [`Alphabet::hash`] folds the first three characters of a word into a
//!   bucket number in `0..HASH_SPACE`.
//! - [`Codec`] converts between display text and the single-byte encoding
//!   used by the index and corpus files. [`Windows1252`] is the default.
//! - [`Error`] is the error type shared by every crate in the workspace.
//!
//! ## Example
//!
//! ```rust
//! use lexicon::{Alphabet, Codec, Windows1252};
//!
//! let alphabet = Alphabet::default();
//! let word = Windows1252.encode("båt").unwrap();
//! assert_eq!(alphabet.hash(&word).unwrap(), 30 * 30 * 2 + 30 * 28 + 20);
//! ```

mod alphabet;
mod codec;
mod error;

pub use alphabet::{Alphabet, ALPHABET_SIZE, HASH_SPACE};
pub use codec::{Codec, Windows1252};
pub use error::{Error, Result};
