//! Word list loading.
//!
//! The list is loaded once at startup and handed around as a [`WordList`],
//! a cheap-to-clone read-only handle.

use crate::error::{Error, Result};
use log::info;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub const WORD_LENGTH: usize = 5;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Ordered, read-only list of lowercase five-letter words.
///
/// Duplicates are kept as given; the source list is assumed to be clean.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Arc<[String]>,
    lookup: Arc<HashSet<String>>,
}

impl WordList {
    #[must_use]
    pub fn new(words: Vec<String>) -> Self {
        let lookup = words.iter().cloned().collect();
        Self {
            words: words.into(),
            lookup: Arc::new(lookup),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(&word.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    /// Uniform pick, `None` for an empty list.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.words.choose(rng).map(String::as_str)
    }
}

fn normalize_line(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    (word.chars().count() == WORD_LENGTH).then_some(word)
}

#[must_use]
pub fn load_wordbank_from_str(data: &str) -> WordList {
    WordList::new(data.lines().filter_map(normalize_line).collect())
}

/// Load a newline-delimited word list from disk.
///
/// # Errors
///
/// Returns [`Error::WordList`] if the file cannot be read.
pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<WordList> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| Error::WordList {
        path: path.to_path_buf(),
        source,
    })?;
    let words = load_wordbank_from_str(&data);
    info!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

#[must_use]
pub fn embedded_wordbank() -> WordList {
    let words = load_wordbank_from_str(EMBEDDED_WORDBANK);
    info!("Loaded {} embedded words", words.len());
    words
}
