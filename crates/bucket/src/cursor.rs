use lexicon::{Error, Result};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

/// How far [`IndexCursor::seek_record_start`] reads back per step.
const BACKTRACK_CHUNK: u64 = 256;

/// One `<word> <offset>` line of the sorted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Byte position of the first character of the line.
    pub start: u64,
    /// The word field (everything before the first space).
    pub word: &'a [u8],
    /// The offset field, still as decimal text.
    pub offset_field: &'a [u8],
}

impl Record<'_> {
    /// Parses the decimal corpus offset of this record.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedRecord`] if the field is missing or not a number.
    pub fn corpus_offset(&self) -> Result<u64> {
        std::str::from_utf8(self.offset_field)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .ok_or(Error::MalformedRecord { offset: self.start })
    }
}

/// Line-aware, position-tracking reader over the sorted word index.
///
/// Every seek goes through [`BufReader::seek`], which drops the buffer, so
/// the tracked position always matches the underlying reader.
pub struct IndexCursor<R> {
    inner: BufReader<R>,
    pos: u64,
    /// Reusable line buffer.
    line: Vec<u8>,
}

impl<R: Read + Seek> IndexCursor<R> {
    /// Wraps `inner`, assumed to be positioned at byte 0.
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
            pos: 0,
            line: Vec::with_capacity(64),
        }
    }

    /// Current byte position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Moves to absolute byte position `pos`.
    pub fn seek(&mut self, pos: u64) -> io::Result<()> {
        self.pos = self.inner.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    /// Advances past the next `\n`. Returns `false` if end of file came
    /// first.
    pub fn skip_line(&mut self) -> io::Result<bool> {
        self.line.clear();
        let n = self.inner.read_until(b'\n', &mut self.line)?;
        self.pos += n as u64;
        Ok(self.line.last() == Some(&b'\n'))
    }

    /// Moves to the first record boundary at or after `pos`. Returns `false`
    /// if end of file came before a line break.
    pub fn seek_next_record(&mut self, pos: u64) -> io::Result<bool> {
        if pos == 0 {
            self.seek(0)?;
            return Ok(true);
        }
        // The byte before a record start is always a newline.
        self.seek(pos - 1)?;
        self.skip_line()
    }

    /// Moves to the start of the record containing `pos`, backing up to the
    /// previous newline if `pos` lands mid-record.
    pub fn seek_record_start(&mut self, pos: u64) -> io::Result<()> {
        let mut end = pos;
        let mut chunk = Vec::with_capacity(BACKTRACK_CHUNK as usize);
        while end > 0 {
            let begin = end.saturating_sub(BACKTRACK_CHUNK);
            chunk.resize((end - begin) as usize, 0);
            self.seek(begin)?;
            self.inner.read_exact(&mut chunk)?;
            if let Some(i) = chunk.iter().rposition(|&b| b == b'\n') {
                return self.seek(begin + i as u64 + 1);
            }
            end = begin;
        }
        self.seek(0)
    }

    /// Reads the record starting at the current position and advances past
    /// it. Returns `None` at end of file. A final line without a trailing
    /// newline is still returned.
    pub fn next_record(&mut self) -> io::Result<Option<Record<'_>>> {
        let start = self.pos;
        self.line.clear();
        let n = self.inner.read_until(b'\n', &mut self.line)?;
        if n == 0 {
            return Ok(None);
        }
        self.pos += n as u64;

        let mut line = self.line.as_slice();
        if let Some(rest) = line.strip_suffix(b"\n") {
            line = rest;
        }
        if let Some(rest) = line.strip_suffix(b"\r") {
            line = rest;
        }
        let (word, offset_field) = match line.iter().position(|&b| b == b' ') {
            Some(i) => (&line[..i], &line[i + 1..]),
            None => (line, &line[line.len()..]),
        };
        Ok(Some(Record {
            start,
            word,
            offset_field,
        }))
    }
}
