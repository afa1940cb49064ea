use crate::error::{Error, Result};

/// Number of symbols in the alphabet.
pub const ALPHABET_SIZE: u32 = 30;

/// Number of distinct prefix hashes: `ALPHABET_SIZE ^ 3`.
pub const HASH_SPACE: u32 = ALPHABET_SIZE * ALPHABET_SIZE * ALPHABET_SIZE;

/// Windows-1252 bytes of `" abcdefghijklmnopqrstuvwxyzäåö"`, in ordinal order.
const SYMBOLS: &[u8; ALPHABET_SIZE as usize] = b" abcdefghijklmnopqrstuvwxyz\xe4\xe5\xf6";

/// Marks a byte that is not part of the alphabet.
const UNMAPPED: u8 = u8::MAX;

/// Immutable byte -> ordinal lookup table.
///
/// Space has ordinal 0, so a missing second or third character and an
/// explicit space hash the same way. This is what keeps the hash monotonic
/// with respect to byte order: a word sorts before every longer word it is a
/// prefix of, and it also hashes at or below them.
#[derive(Clone)]
pub struct Alphabet {
    ordinals: [u8; 256],
}

impl Alphabet {
    /// Builds an alphabet from its symbols, given in ordinal order.
    ///
    /// # Panics
    ///
    /// Panics if a symbol is repeated.
    fn from_symbols(symbols: &[u8]) -> Self {
        let mut ordinals = [UNMAPPED; 256];
        for (ordinal, &byte) in symbols.iter().enumerate() {
            assert!(
                ordinals[byte as usize] == UNMAPPED,
                "duplicate alphabet symbol {:#04x}",
                byte
            );
            ordinals[byte as usize] = ordinal as u8;
        }
        Self { ordinals }
    }

    /// Returns the ordinal of `byte`, or `None` if it is not in the alphabet.
    #[must_use]
    pub fn ordinal(&self, byte: u8) -> Option<u32> {
        match self.ordinals[byte as usize] {
            UNMAPPED => None,
            o => Some(u32::from(o)),
        }
    }

    /// Returns `true` if `byte` is one of the 30 symbols.
    #[must_use]
    pub fn contains(&self, byte: u8) -> bool {
        self.ordinals[byte as usize] != UNMAPPED
    }

    /// Hashes the first three characters of `word` into `0..HASH_SPACE`.
    ///
    /// With `v(c)` the ordinal of `c` and `N = 30`:
    ///
    /// ```text
    /// len >= 3:  N*N*v(c1) + N*v(c2) + v(c3)
    /// len == 2:  N*N*v(c1) + N*v(c2)
    /// len == 1:  N*N*v(c1)
    /// ```
    ///
    /// Characters after the third are ignored and never validated.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWord`] for an empty word,
    /// [`Error::UnsupportedCharacter`] if one of the hashed bytes is not in
    /// the alphabet.
    pub fn hash(&self, word: &[u8]) -> Result<u32> {
        if word.is_empty() {
            return Err(Error::InvalidWord);
        }
        let mut hash = 0;
        for i in 0..3 {
            hash *= ALPHABET_SIZE;
            if let Some(&byte) = word.get(i) {
                hash += self
                    .ordinal(byte)
                    .ok_or(Error::UnsupportedCharacter(char::from(byte)))?;
            }
        }
        Ok(hash)
    }
}

impl Default for Alphabet {
    /// The Swedish alphabet: space, `a`-`z`, then `ä`, `å`, `ö`.
    fn default() -> Self {
        Self::from_symbols(SYMBOLS)
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbols = self.ordinals.iter().filter(|&&o| o != UNMAPPED).count();
        f.debug_struct("Alphabet").field("symbols", &symbols).finish()
    }
}
