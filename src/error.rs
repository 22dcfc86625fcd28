use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Could not read dictionary {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Out of memory while loading dictionary")]
    OutOfMemory,

    #[error("Word of length {len} exceeds the maximum of {max}: {word}")]
    WordTooLong { word: String, len: usize, max: usize },

    #[error("Invalid index options: {0}")]
    InvalidOptions(String),

    #[error("Could not load config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, DictionaryError>;

impl DictionaryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DictionaryError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<std::collections::TryReserveError> for DictionaryError {
    fn from(_: std::collections::TryReserveError) -> Self {
        DictionaryError::OutOfMemory
    }
}
