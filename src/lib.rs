//! Case-insensitive dictionary index for spell checking.
//!
//! ```no_run
//! use speller::WordIndex;
//!
//! let mut index = WordIndex::new();
//! index.load("dictionaries/large")?;
//! assert!(index.check("Apple") == index.check("apple"));
//! index.unload();
//! # Ok::<(), speller::DictionaryError>(())
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod lexer;
pub mod report;
pub mod shared;
pub mod word_index;
pub mod word_list;

pub use config::{Config, ReportFormat};
pub use error::{DictionaryError, Result};
pub use shared::SharedWordIndex;
pub use word_index::{IndexOptions, WordIndex};
