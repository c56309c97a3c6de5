use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read word list from '{}': {source}", .path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage error for key '{key}': {source}")]
    Store {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid pattern '{0}': expected 5 characters of letters or _ . ?")]
    InvalidPattern(String),

    #[error("invalid misplaced constraint '{0}': expected POSITION:LETTERS with POSITION in 1..=5")]
    InvalidMisplaced(String),
}
