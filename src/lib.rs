// Library interface for wordle-buddy
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod persistence;
pub mod solver;
pub mod storage;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{Error, Result};
pub use feedback::{Feedback, LetterStatus, evaluate};
pub use game_state::{Game, GamePhase, game_loop};
pub use persistence::{SavedGame, decode_state, encode_state};
pub use solver::{SolverConstraints, filter_candidates};
pub use storage::{FileStore, MemoryStore, SessionStore};
pub use wordbank::{WordList, embedded_wordbank, load_wordbank_from_file, load_wordbank_from_str};
