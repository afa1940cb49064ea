use lexicon::{Codec, Error, Result};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::Path;

/// Default number of corpus bytes shown on each side of a match.
pub const DEFAULT_CONTEXT_RADIUS: u64 = 30;

/// Cuts a window of corpus text around an occurrence and decodes it for
/// display.
pub struct ContextRenderer<C> {
    corpus: File,
    corpus_len: u64,
    radius: u64,
    codec: C,
    /// Reusable read buffer.
    buf: Vec<u8>,
}

impl<C: Codec> ContextRenderer<C> {
    /// Opens the corpus at `path`.
    pub fn open<P: AsRef<Path>>(path: P, radius: u64, codec: C) -> Result<Self> {
        let corpus = File::open(path)?;
        let corpus_len = corpus.metadata()?.len();
        Ok(Self {
            corpus,
            corpus_len,
            radius,
            codec,
            buf: Vec::new(),
        })
    }

    #[must_use]
    pub fn corpus_len(&self) -> u64 {
        self.corpus_len
    }

    #[must_use]
    pub fn radius(&self) -> u64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: u64) {
        self.radius = radius;
    }

    /// Byte range shown for a `word_len`-byte occurrence at `offset`.
    ///
    /// The window is `radius` bytes either side of the word: it starts at
    /// `offset - radius` (or 0 if that would be negative) and ends at
    /// `offset + word_len + radius`, clamped to the corpus length.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if the word itself does not fit, i.e.
    /// `offset + word_len` is past the end of the corpus.
    pub fn window(&self, offset: u64, word_len: u64) -> Result<Range<u64>> {
        let size = self.corpus_len;
        if word_len > size || offset > size - word_len {
            return Err(Error::OutOfBounds {
                offset,
                len: word_len,
                size,
            });
        }
        let start = offset.saturating_sub(self.radius);
        let end = (offset + word_len).saturating_add(self.radius).min(size);
        Ok(start..end)
    }

    /// Reads and decodes the window around `offset`, with line breaks
    /// flattened to spaces.
    pub fn render(&mut self, offset: u64, word_len: u64) -> Result<String> {
        let window = self.window(offset, word_len)?;
        self.buf.resize((window.end - window.start) as usize, 0);
        self.corpus.seek(SeekFrom::Start(window.start))?;
        self.corpus.read_exact(&mut self.buf)?;

        let text = self.codec.decode(&self.buf);
        Ok(text.replace(['\r', '\n'], " "))
    }
}
