use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{DictionaryError, Result};
use crate::hash::bucket_index;
use crate::word_list::{Word, WordList};

pub const DEFAULT_BUCKET_COUNT: usize = 25_000;
pub const DEFAULT_MAX_WORD_LEN: usize = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    pub bucket_count: usize,
    /// Longest word, in bytes, the index accepts. `None` removes the bound.
    pub max_word_len: Option<usize>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            max_word_len: Some(DEFAULT_MAX_WORD_LEN),
        }
    }
}

impl IndexOptions {
    fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(DictionaryError::InvalidOptions(
                "bucket count must be at least 1".to_string(),
            ));
        }
        if self.max_word_len == Some(0) {
            return Err(DictionaryError::InvalidOptions(
                "maximum word length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// One dictionary word, stored with its original case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    word: Vec<u8>,
}

impl Entry {
    fn new(word: Vec<u8>) -> Entry {
        Entry { word }
    }

    pub(crate) fn matches(&self, query: &[u8]) -> bool {
        self.word.eq_ignore_ascii_case(query)
    }
}

/// Case-insensitive word set with a fixed number of chained buckets.
///
/// Each bucket is a chain whose head is the last element, so the most
/// recently loaded entry is visited first on lookup. Duplicates are kept.
#[derive(Debug)]
pub struct WordIndex {
    buckets: Vec<Vec<Entry>>,
    options: IndexOptions,
    count: usize,
}

impl Default for WordIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl WordIndex {
    pub fn new() -> WordIndex {
        let options = IndexOptions::default();
        WordIndex {
            buckets: vec![Vec::new(); options.bucket_count],
            options,
            count: 0,
        }
    }

    pub fn with_options(options: IndexOptions) -> Result<WordIndex> {
        options.validate()?;
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(options.bucket_count)?;
        buckets.resize_with(options.bucket_count, Vec::new);
        Ok(WordIndex {
            buckets,
            options,
            count: 0,
        })
    }

    pub fn options(&self) -> IndexOptions {
        self.options
    }

    /// Loads every word of the file at `path`.
    ///
    /// Loading is all-or-nothing: on any error the whole index, including
    /// words from earlier loads, is unloaded before the error is returned.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!("Could not open dictionary {}: {err}", path.display());
                self.unload();
                return Err(DictionaryError::io(path, err));
            }
        };
        self.load_words(BufReader::new(file), path)
    }

    /// Same as [`WordIndex::load`], reading from an already open source.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.load_words(reader, Path::new("<reader>"))
    }

    fn load_words<R: BufRead>(&mut self, reader: R, origin: &Path) -> Result<()> {
        let before = self.count;
        if let Err(err) = self.insert_all(reader, origin) {
            warn!("Loading {} failed, unloading: {err}", origin.display());
            self.unload();
            return Err(err);
        }
        info!("Loaded {} words from {}", self.count - before, origin.display());
        debug!(
            "{} words across {} buckets, longest chain {}",
            self.count,
            self.buckets.len(),
            self.longest_chain()
        );
        Ok(())
    }

    fn insert_all<R: BufRead>(&mut self, reader: R, origin: &Path) -> Result<()> {
        for word in WordList::with_limit(reader, self.options.max_word_len) {
            let word = word.map_err(|err| match err.kind() {
                io::ErrorKind::OutOfMemory => DictionaryError::OutOfMemory,
                _ => DictionaryError::io(origin, err),
            })?;
            self.insert(word)?;
        }
        Ok(())
    }

    fn insert(&mut self, word: Word) -> Result<()> {
        if let Some(max) = self.options.max_word_len {
            if word.len > max {
                // Only the first `max` bytes were kept.
                return Err(DictionaryError::WordTooLong {
                    word: String::from_utf8_lossy(&word.bytes).into_owned(),
                    len: word.len,
                    max,
                });
            }
        }
        let word = word.bytes;
        let bucket = &mut self.buckets[bucket_index(&word, self.options.bucket_count)];
        bucket.try_reserve(1)?;
        bucket.push(Entry::new(word));
        self.count += 1;
        Ok(())
    }

    /// Moves every entry of `other` into this index as if it had been loaded
    /// after the entries already present.
    pub(crate) fn absorb(&mut self, other: WordIndex) -> Result<()> {
        if other.options.bucket_count != self.options.bucket_count {
            return Err(DictionaryError::InvalidOptions(format!(
                "cannot merge an index of {} buckets into one of {}",
                other.options.bucket_count, self.options.bucket_count
            )));
        }
        for (dst, src) in self.buckets.iter_mut().zip(other.buckets) {
            dst.try_reserve(src.len())?;
            dst.extend(src);
        }
        self.count += other.count;
        Ok(())
    }

    pub fn check(&self, word: &str) -> bool {
        let query = word.as_bytes();
        if let Some(max) = self.options.max_word_len {
            if query.len() > max {
                return false;
            }
        }
        self.buckets[bucket_index(query, self.options.bucket_count)]
            .iter()
            .rev()
            .any(|entry| entry.matches(query))
    }

    pub fn size(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Drops every entry. Safe to call on an empty index.
    pub fn unload(&mut self) {
        let released = self.count;
        for bucket in self.buckets.iter_mut() {
            *bucket = Vec::new();
        }
        self.count = 0;
        if released > 0 {
            info!("Unloaded {released} words");
        }
    }
}
