//! djb2 hashing over ASCII-lowercased bytes.

const SEED: u64 = 5381;

/// djb2 of `word` after folding ASCII letters to lowercase, so every case
/// variant of a word hashes identically.
pub fn djb2(word: &[u8]) -> u64 {
    word.iter().fold(SEED, |h, b| {
        // h * 33 + b
        (h << 5)
            .wrapping_add(h)
            .wrapping_add(b.to_ascii_lowercase() as u64)
    })
}

pub fn bucket_index(word: &[u8], bucket_count: usize) -> usize {
    (djb2(word) % bucket_count as u64) as usize
}
