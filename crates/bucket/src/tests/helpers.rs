use lexicon::{Alphabet, Codec, Windows1252, HASH_SPACE};

/// Renders `(word, offset)` pairs as index text, sorting them first.
pub fn index_text(entries: &[(&str, u64)]) -> Vec<u8> {
    let mut encoded: Vec<(Vec<u8>, u64)> = entries
        .iter()
        .map(|(w, o)| (Windows1252.encode(w).unwrap(), *o))
        .collect();
    encoded.sort();
    let mut out = Vec::new();
    for (word, offset) in encoded {
        out.extend_from_slice(&word);
        out.push(b' ');
        out.extend_from_slice(offset.to_string().as_bytes());
        out.push(b'\n');
    }
    out
}

/// A sorted index with uneven buckets: some tiny, some many strides long,
/// with empty hashes in between.
pub fn synthetic_index() -> Vec<u8> {
    let letters = "abcdefghijklmnopqrstuvwxyzäåö";
    let mut words: Vec<String> = Vec::new();
    for (i, first) in letters.chars().enumerate() {
        if i % 4 == 3 {
            continue;
        }
        for (j, second) in letters.chars().enumerate().step_by(3) {
            let count = (i * 37 + j * 11) % 160;
            for k in 0..count {
                words.push(format!("{}{}{}x{}", first, second, (b'a' + (k % 3) as u8) as char, k));
            }
        }
    }
    words.push("i".to_string());
    words.push("en".to_string());
    let entries: Vec<(&str, u64)> = words
        .iter()
        .enumerate()
        .map(|(n, w)| (w.as_str(), n as u64 * 7))
        .collect();
    index_text(&entries)
}

/// Bucket table computed the slow way: hash every record, then gap fill
/// backwards from the end.
pub fn reference_table(index: &[u8]) -> Vec<u64> {
    let alphabet = Alphabet::default();
    let mut first: Vec<Option<u64>> = vec![None; HASH_SPACE as usize];
    let mut pos = 0u64;
    for line in index.split_inclusive(|&b| b == b'\n') {
        let word = line.split(|&b| b == b' ').next().unwrap();
        let h = alphabet.hash(word).unwrap() as usize;
        first[h].get_or_insert(pos);
        pos += line.len() as u64;
    }
    let mut table = vec![0u64; HASH_SPACE as usize];
    let mut next = index.len() as u64;
    for h in (0..HASH_SPACE as usize).rev() {
        if let Some(p) = first[h] {
            next = p;
        }
        table[h] = next;
    }
    table
}
