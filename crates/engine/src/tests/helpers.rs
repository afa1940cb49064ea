use crate::QueryEngine;
use bucket::{BucketTableBuilder, BuildOptions};
use lexicon::{Alphabet, Codec, Windows1252};
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// Index, table and corpus written to a temp dir.
pub struct Fixture {
    _dir: TempDir,
    pub index: PathBuf,
    pub table: PathBuf,
    pub corpus: PathBuf,
    /// Sorted `(encoded word, corpus offset)` records.
    pub records: Vec<(Vec<u8>, u64)>,
}

impl Fixture {
    /// Writes `corpus` and an index of `records`, then builds the table.
    pub fn from_records(corpus: &[u8], records: &[(&str, u64)]) -> Self {
        let records: Vec<(Vec<u8>, u64)> = records
            .iter()
            .map(|(w, o)| (Windows1252.encode(w).unwrap(), *o))
            .collect();
        Self::write(corpus, records)
    }

    /// Tokenises `text` into words of alphabet letters and indexes every
    /// occurrence.
    pub fn from_corpus(text: &str) -> Self {
        let corpus = Windows1252.encode(text).unwrap();
        let lower = Windows1252.encode(&text.to_lowercase()).unwrap();
        assert_eq!(corpus.len(), lower.len());

        let alphabet = Alphabet::default();
        let is_letter = |b: u8| b != b' ' && alphabet.contains(b);
        let mut records = Vec::new();
        let mut i = 0;
        while i < lower.len() {
            if is_letter(lower[i]) {
                let start = i;
                while i < lower.len() && is_letter(lower[i]) {
                    i += 1;
                }
                records.push((lower[start..i].to_vec(), start as u64));
            } else {
                i += 1;
            }
        }
        Self::write(&corpus, records)
    }

    fn write(corpus: &[u8], mut records: Vec<(Vec<u8>, u64)>) -> Self {
        records.sort();
        let dir = tempdir().unwrap();
        let index = dir.path().join("rawindex.txt");
        let table = dir.path().join("index");
        let corpus_path = dir.path().join("korpus");

        let mut text = Vec::new();
        for (word, offset) in &records {
            text.extend_from_slice(word);
            text.push(b' ');
            text.extend_from_slice(offset.to_string().as_bytes());
            text.push(b'\n');
        }
        fs::write(&index, text).unwrap();
        fs::write(&corpus_path, corpus).unwrap();
        BucketTableBuilder::new(BuildOptions::default())
            .build_file(&index, &table)
            .unwrap();

        Self {
            _dir: dir,
            index,
            table,
            corpus: corpus_path,
            records,
        }
    }

    pub fn engine(&self) -> QueryEngine {
        QueryEngine::open(&self.index, &self.table, &self.corpus).unwrap()
    }

    /// Offsets of `word` found by walking every record.
    pub fn expected(&self, word: &str) -> Vec<u64> {
        let word = Windows1252.encode(word).unwrap();
        self.records
            .iter()
            .filter(|(w, _)| *w == word)
            .map(|(_, o)| *o)
            .collect()
    }
}

/// `n`-th word made of letters only, prefixed with `prefix`.
pub fn letter_word(prefix: &str, mut n: usize) -> String {
    let letters: Vec<char> = "abcdefghijklmnopqrstuvwxyzäåö".chars().collect();
    let mut word = prefix.to_string();
    loop {
        word.push(letters[n % letters.len()]);
        n /= letters.len();
        if n == 0 {
            break;
        }
    }
    word
}

/// A corpus where the `ama` bucket spans many kilobytes of index.
pub fn large_corpus() -> String {
    let mut words = Vec::new();
    for i in 0..1500 {
        words.push(letter_word("ama", i));
        if i % 7 == 0 {
            words.push(letter_word("ama", i));
        }
        if i % 3 == 0 {
            words.push(letter_word("bok", i));
        }
    }
    words.push("i".into());
    words.push("en".into());
    words.push("a".into());
    words.push("öööö".into());
    // shuffle deterministically so corpus order differs from index order
    let mut state = 0x2545_f491u64;
    for i in (1..words.len()).rev() {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let j = (state >> 33) as usize % (i + 1);
        words.swap(i, j);
    }
    let mut text = String::new();
    for (n, w) in words.iter().enumerate() {
        text.push_str(w);
        text.push(if n % 12 == 11 { '\n' } else { ' ' });
    }
    text
}
