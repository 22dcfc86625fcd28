use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::Result;
use crate::word_index::{IndexOptions, WordIndex};

/// A [`WordIndex`] shared between threads.
///
/// Any number of `check`/`size` calls run in parallel under a read lock;
/// `load` and `unload` take the write lock. Loading reads the source into a
/// private index first so readers are only blocked while it is merged in.
#[derive(Clone, Debug, Default)]
pub struct SharedWordIndex(Arc<RwLock<WordIndex>>);

impl SharedWordIndex {
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(WordIndex::new())))
    }

    pub fn with_options(options: IndexOptions) -> Result<Self> {
        Ok(Self(Arc::new(RwLock::new(WordIndex::with_options(
            options,
        )?))))
    }

    pub fn take(&self) -> RwLockReadGuard<'_, WordIndex> {
        self.0.read()
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut staged = self.staging()?;
        let loaded = staged.load(path);
        self.merge(staged, loaded)
    }

    pub fn load_from_reader<R: BufRead>(&self, reader: R) -> Result<()> {
        let mut staged = self.staging()?;
        let loaded = staged.load_from_reader(reader);
        self.merge(staged, loaded)
    }

    pub fn check(&self, word: &str) -> bool {
        self.take().check(word)
    }

    pub fn size(&self) -> usize {
        self.take().size()
    }

    pub fn unload(&self) {
        self.0.write().unload();
    }

    fn staging(&self) -> Result<WordIndex> {
        WordIndex::with_options(self.take().options())
    }

    fn merge(&self, staged: WordIndex, loaded: Result<()>) -> Result<()> {
        let mut index = self.0.write();
        if let Err(err) = loaded {
            index.unload();
            return Err(err);
        }
        debug!("Merging {} staged words", staged.size());
        if let Err(err) = index.absorb(staged) {
            index.unload();
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::thread;

    #[test]
    fn concurrent_checks() {
        let shared = SharedWordIndex::new();
        shared
            .load_from_reader(Cursor::new("apple banana cherry"))
            .unwrap();

        let handles = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        assert!(shared.check(if i % 2 == 0 { "APPLE" } else { "cherry" }));
                        assert!(!shared.check("durian"));
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.size(), 3);
    }

    #[test]
    fn loads_accumulate_like_word_index() {
        let shared = SharedWordIndex::new();
        shared.load_from_reader(Cursor::new("apple")).unwrap();
        shared.load_from_reader(Cursor::new("Pear")).unwrap();
        assert_eq!(shared.size(), 2);
        assert!(shared.check("pear"));
        assert!(shared.take().check("APPLE"));
    }

    #[test]
    fn failed_load_empties_shared_index() {
        let shared = SharedWordIndex::with_options(IndexOptions {
            max_word_len: Some(3),
            ..Default::default()
        })
        .unwrap();
        shared.load_from_reader(Cursor::new("cat dog")).unwrap();

        assert!(shared.load_from_reader(Cursor::new("elephant")).is_err());
        assert_eq!(shared.size(), 0);
        assert!(!shared.check("cat"));

        let dir = tempfile::tempdir().unwrap();
        shared.load_from_reader(Cursor::new("cat")).unwrap();
        assert!(shared.load(dir.path().join("nope")).is_err());
        assert_eq!(shared.size(), 0);
    }

    #[test]
    fn unload_visible_to_clones() {
        let shared = SharedWordIndex::new();
        let other = shared.clone();
        shared.load_from_reader(Cursor::new("apple")).unwrap();
        other.unload();
        other.unload();
        assert_eq!(shared.size(), 0);
        assert!(!shared.check("apple"));
    }
}
