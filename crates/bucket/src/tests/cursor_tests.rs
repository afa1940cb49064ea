use crate::*;
use anyhow::Result;
use lexicon::Error;
use std::io::Cursor;

fn cursor(text: &[u8]) -> IndexCursor<Cursor<Vec<u8>>> {
    IndexCursor::new(Cursor::new(text.to_vec()))
}

const TEXT: &[u8] = b"abc 10\nabd 20\nb 300\n";

#[test]
fn next_record_splits_word_and_offset() -> Result<()> {
    let mut c = cursor(TEXT);
    let r = c.next_record()?.expect("first record");
    assert_eq!(r.start, 0);
    assert_eq!(r.word, b"abc");
    assert_eq!(r.corpus_offset()?, 10);
    assert_eq!(c.position(), 7);

    let r = c.next_record()?.expect("second record");
    assert_eq!((r.start, r.word), (7, b"abd".as_slice()));

    let r = c.next_record()?.expect("third record");
    assert_eq!(r.corpus_offset()?, 300);
    assert!(c.next_record()?.is_none());
    Ok(())
}

#[test]
fn missing_offset_is_malformed() -> Result<()> {
    let mut c = cursor(b"abc\nabd x\n");
    let r = c.next_record()?.unwrap();
    assert!(matches!(r.corpus_offset(), Err(Error::MalformedRecord { offset: 0 })));
    let r = c.next_record()?.unwrap();
    assert!(matches!(r.corpus_offset(), Err(Error::MalformedRecord { offset: 4 })));
    Ok(())
}

#[test]
fn carriage_returns_are_stripped() -> Result<()> {
    let mut c = cursor(b"abc 10\r\n");
    assert_eq!(c.next_record()?.unwrap().corpus_offset()?, 10);
    Ok(())
}

#[test]
fn seek_next_record_lands_at_or_after() -> Result<()> {
    let mut c = cursor(TEXT);
    // exactly on a record start
    assert!(c.seek_next_record(7)?);
    assert_eq!(c.position(), 7);
    // mid record
    assert!(c.seek_next_record(8)?);
    assert_eq!(c.position(), 14);
    assert!(c.seek_next_record(0)?);
    assert_eq!(c.position(), 0);
    // inside the last record: lands at end of file
    assert!(c.seek_next_record(16)?);
    assert_eq!(c.position(), 20);
    assert!(c.next_record()?.is_none());

    // no line break before end of file
    let mut c = cursor(b"abc 1\nab");
    assert!(!c.seek_next_record(7)?);
    Ok(())
}

#[test]
fn seek_record_start_backs_up() -> Result<()> {
    let mut c = cursor(TEXT);
    c.seek_record_start(10)?;
    assert_eq!(c.position(), 7);
    c.seek_record_start(7)?;
    assert_eq!(c.position(), 7);
    c.seek_record_start(3)?;
    assert_eq!(c.position(), 0);
    assert_eq!(c.next_record()?.unwrap().word, b"abc");
    Ok(())
}

#[test]
fn seek_record_start_crosses_chunks() -> Result<()> {
    let long_word = vec![b'a'; 1000];
    let mut text = b"a 1\n".to_vec();
    text.extend_from_slice(&long_word);
    text.extend_from_slice(b" 2\n");

    let mut c = cursor(&text);
    c.seek_record_start(900)?;
    assert_eq!(c.position(), 4);
    assert_eq!(c.next_record()?.unwrap().corpus_offset()?, 2);
    Ok(())
}
