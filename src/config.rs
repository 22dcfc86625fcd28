use dirs::{config_dir, data_dir, home_dir};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DictionaryError, Result};
use crate::word_index::{IndexOptions, DEFAULT_BUCKET_COUNT, DEFAULT_MAX_WORD_LEN};

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,
    #[serde(default = "default_bucket_count")]
    pub bucket_count: usize,
    /// `null` in the file disables the bound.
    #[serde(default = "default_max_word_len")]
    pub max_word_len: Option<usize>,
    #[serde(default = "default_report_format")]
    pub report: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            bucket_count: default_bucket_count(),
            max_word_len: default_max_word_len(),
            report: default_report_format(),
        }
    }
}

impl Config {
    /// Reads `path` when given, otherwise the per-user config file if there
    /// is one, otherwise falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(p) => expand_tilde(p).unwrap_or_else(|| p.to_path_buf()),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => {
                    debug!("No config file found, using defaults");
                    return Ok(Config::default());
                }
            },
        };
        Config::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        info!("Reading config {}", path.display());
        let config_error = |message: String| DictionaryError::Config {
            path: path.to_path_buf(),
            message,
        };
        let text = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        Config::from_json(&text).map_err(|e| config_error(e.to_string()))
    }

    pub fn from_json(text: &str) -> serde_json::Result<Config> {
        let mut config: Config = serde_json::from_str(text)?;
        if let Some(p) = expand_tilde(&config.dictionary) {
            config.dictionary = p;
        }
        Ok(config)
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            bucket_count: self.bucket_count,
            max_word_len: self.max_word_len,
        }
    }
}

fn default_report_format() -> ReportFormat {
    ReportFormat::Text
}

fn default_bucket_count() -> usize {
    DEFAULT_BUCKET_COUNT
}

fn default_max_word_len() -> Option<usize> {
    Some(DEFAULT_MAX_WORD_LEN)
}

fn default_dictionary() -> PathBuf {
    match data_dir() {
        Some(dir) => dir.join("speller").join("dictionaries").join("large"),
        None => PathBuf::from("dictionaries").join("large"),
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("speller").join("config.json"))
}

pub fn expand_tilde<P: AsRef<Path>>(path_user_input: P) -> Option<PathBuf> {
    let p = path_user_input.as_ref();
    if !p.starts_with("~") {
        return Some(p.to_path_buf());
    }
    if p == Path::new("~") {
        return home_dir();
    }
    let rest = p.strip_prefix("~").ok()?;
    home_dir().map(|h| {
        if h == Path::new("/") {
            // Corner case: home is the root directory;
            // don't prepend extra `/`, just drop the tilde.
            Path::new("/").join(rest)
        } else {
            h.join(rest)
        }
    })
}
