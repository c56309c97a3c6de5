use crate::feedback::{Feedback, LetterStatus, evaluate, keyboard_statuses};
use crate::persistence::{SavedGame, decode_state, encode_state};
use crate::storage::SessionStore;
use crate::wordbank::{WORD_LENGTH, WordList};
use crate::{debug_log, info_log};
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_GUESSES: usize = 6;
pub const STORAGE_KEY: &str = "wordle-buddy-play-v1";

pub const MSG_WRONG_LENGTH: &str = "Enter a 5-letter word.";
pub const MSG_NOT_IN_LIST: &str = "Not in word list.";
pub const MSG_WON: &str = "Nice! You found the word.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    #[default]
    Playing,
    Won,
    Lost,
}

/// One game session: the hidden solution, the guess history and the row
/// being typed.
///
/// Every change is written through to `store` under [`STORAGE_KEY`]. Store
/// failures are logged and otherwise ignored.
pub struct Game<S, R> {
    words: WordList,
    store: S,
    rng: R,
    solution: Option<String>,
    guesses: Vec<String>,
    statuses: Vec<Feedback>,
    current_guess: String,
    message: String,
    phase: GamePhase,
}

impl<S: SessionStore, R: Rng> Game<S, R> {
    /// Restore the saved session if it is still valid for `words`,
    /// otherwise start a fresh one. An empty list leaves the game idle.
    pub fn new(words: WordList, store: S, rng: R) -> Self {
        let mut game = Self {
            words,
            store,
            rng,
            solution: None,
            guesses: Vec::new(),
            statuses: Vec::new(),
            current_guess: String::new(),
            message: String::new(),
            phase: GamePhase::Playing,
        };

        if game.words.is_empty() {
            warn!("Word list is empty; game actions are disabled");
            return game;
        }

        match game.load_saved() {
            Some(saved) => {
                info!("Restored saved game ({} guesses)", saved.guesses.len());
                game.restore(saved);
            }
            None => game.pick_solution(),
        }
        game.persist();
        game
    }

    fn load_saved(&self) -> Option<SavedGame> {
        let raw = match self.store.get(STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                debug!("Ignoring unreadable saved game: {e}");
                return None;
            }
        };
        let Some(saved) = decode_state(&raw) else {
            debug!("Ignoring undecodable saved game");
            return None;
        };
        let solution = saved.solution.as_deref()?;
        if !self.words.contains(solution) {
            debug!("Saved solution is not in the word list");
            return None;
        }
        if saved.guesses.len() > MAX_GUESSES
            || saved.statuses.len() != saved.guesses.len()
            || saved.current_guess.len() > WORD_LENGTH
            || !saved.current_guess.chars().all(|c| c.is_ascii_alphabetic())
        {
            debug!("Saved game history is inconsistent");
            return None;
        }
        if !phase_matches_history(&saved, solution) {
            debug!("Saved game phase {:?} does not match its history", saved.phase);
            return None;
        }
        Some(saved)
    }

    fn restore(&mut self, saved: SavedGame) {
        self.solution = saved.solution.map(|s| s.to_lowercase());
        self.guesses = saved.guesses;
        self.statuses = saved.statuses;
        self.current_guess = saved.current_guess.to_uppercase();
        self.message = saved.message;
        self.phase = saved.phase;
    }

    fn pick_solution(&mut self) {
        self.solution = self.words.choose(&mut self.rng).map(str::to_string);
        self.guesses.clear();
        self.statuses.clear();
        self.current_guess.clear();
        self.message.clear();
        self.phase = GamePhase::Playing;
        info!("New game started");
        debug_log!("pick_solution() - solution: {:?}", self.solution);
    }

    fn snapshot(&self) -> SavedGame {
        SavedGame {
            solution: self.solution.clone(),
            guesses: self.guesses.clone(),
            statuses: self.statuses.clone(),
            current_guess: self.current_guess.clone(),
            message: self.message.clone(),
            phase: self.phase,
        }
    }

    fn persist(&mut self) {
        if self.solution.is_none() {
            return;
        }
        let encoded = match encode_state(&self.snapshot()) {
            Ok(encoded) => encoded,
            Err(e) => {
                debug!("Failed to encode game state: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(STORAGE_KEY, &encoded) {
            debug!("Failed to save game state: {e}");
        }
    }

    pub fn handle_letter_input(&mut self, letter: char) {
        if !self.can_play() || !letter.is_ascii_alphabetic() {
            return;
        }
        if self.current_guess.len() >= WORD_LENGTH {
            return;
        }
        self.current_guess.push(letter.to_ascii_uppercase());
        self.persist();
    }

    pub fn handle_backspace(&mut self) {
        if !self.can_play() {
            return;
        }
        if self.current_guess.pop().is_some() {
            self.persist();
        }
    }

    pub fn handle_submit_guess(&mut self) {
        if !self.can_play() {
            return;
        }
        let Some(solution) = self.solution.clone() else {
            return;
        };
        let guess = self.current_guess.to_lowercase();

        if guess.chars().count() != WORD_LENGTH {
            self.reject(MSG_WRONG_LENGTH);
            return;
        }
        if !self.words.contains(&guess) {
            self.reject(MSG_NOT_IN_LIST);
            return;
        }

        let row = evaluate(&guess, &solution);
        info_log!("handle_submit_guess() - '{}' scored {:?}", guess, row);
        self.guesses.push(guess.clone());
        self.statuses.push(row);
        self.current_guess.clear();

        if guess == solution {
            self.phase = GamePhase::Won;
            self.message = MSG_WON.to_string();
            info!("Game won in {} guesses", self.guesses.len());
        } else if self.guesses.len() >= MAX_GUESSES {
            self.phase = GamePhase::Lost;
            self.message = format!("The word was {}.", solution.to_uppercase());
            info!("Game lost");
        } else {
            self.message.clear();
        }
        self.persist();
    }

    /// Replace the current row with `word` and submit it. Used by
    /// line-based front ends.
    pub fn enter_word(&mut self, word: &str) {
        if !self.can_play() {
            return;
        }
        let word = word.trim();
        if word.chars().count() != WORD_LENGTH || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            self.reject(MSG_WRONG_LENGTH);
            return;
        }
        self.current_guess = word.to_ascii_uppercase();
        self.handle_submit_guess();
    }

    fn reject(&mut self, message: &str) {
        debug_log!("reject() - '{}': {}", self.current_guess, message);
        self.message = message.to_string();
        self.persist();
    }

    pub fn start_new_game(&mut self) {
        if self.words.is_empty() {
            return;
        }
        self.pick_solution();
        self.persist();
    }

    #[must_use]
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    #[must_use]
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    #[must_use]
    pub fn statuses(&self) -> &[Feedback] {
        &self.statuses
    }

    #[must_use]
    pub fn current_guess(&self) -> &str {
        &self.current_guess
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// A solution is selected and guesses are being accepted.
    #[must_use]
    pub fn can_play(&self) -> bool {
        self.phase == GamePhase::Playing && self.solution.is_some()
    }

    #[must_use]
    pub fn keyboard_statuses(&self) -> BTreeMap<char, LetterStatus> {
        keyboard_statuses(&self.guesses, &self.statuses)
    }

    #[must_use]
    pub fn word_list(&self) -> &WordList {
        &self.words
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        GameView {
            guesses: &self.guesses,
            statuses: &self.statuses,
            current_guess: &self.current_guess,
            message: &self.message,
            phase: self.phase,
            keys: self.keyboard_statuses(),
            playable: self.can_play(),
            has_words: !self.words.is_empty(),
        }
    }
}

/// A game is won exactly when its last guess is the solution, and lost
/// exactly when all rows are used without finding it.
fn phase_matches_history(saved: &SavedGame, solution: &str) -> bool {
    let found = |guess: &String| guess.eq_ignore_ascii_case(solution);
    let solved = saved.guesses.last().is_some_and(found);
    let found_early = saved.guesses.iter().rev().skip(1).any(found);
    if found_early {
        return false;
    }
    match saved.phase {
        GamePhase::Playing => !solved && saved.guesses.len() < MAX_GUESSES,
        GamePhase::Won => solved,
        GamePhase::Lost => !solved && saved.guesses.len() == MAX_GUESSES,
    }
}

/// Read-only snapshot handed to front ends for drawing.
#[derive(Debug, Clone)]
pub struct GameView<'a> {
    pub guesses: &'a [String],
    pub statuses: &'a [Feedback],
    pub current_guess: &'a str,
    pub message: &'a str,
    pub phase: GamePhase,
    pub keys: BTreeMap<char, LetterStatus>,
    pub playable: bool,
    pub has_words: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Letter(char),
    Backspace,
    Submit,
    /// A whole word typed on one line.
    Word(String),
    NewGame,
    Redraw,
    Exit,
}

pub trait GameInterface {
    fn render(&mut self, view: &GameView<'_>);
    /// `None` when no input arrived yet.
    fn next_action(&mut self) -> Option<UserAction>;
    fn display_exit_message(&mut self);
}

pub fn game_loop<S, R, I>(game: &mut Game<S, R>, interface: &mut I)
where
    S: SessionStore,
    R: Rng,
    I: GameInterface,
{
    interface.render(&game.view());
    loop {
        let Some(action) = interface.next_action() else {
            continue;
        };
        debug_log!("game_loop() - action: {:?}", action);
        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => game.start_new_game(),
            UserAction::Letter(letter) => game.handle_letter_input(letter),
            UserAction::Backspace => game.handle_backspace(),
            UserAction::Submit if game.is_finished() => game.start_new_game(),
            UserAction::Submit => game.handle_submit_guess(),
            UserAction::Word(word) => game.enter_word(&word),
            UserAction::Redraw => {}
        }
        interface.render(&game.view());
    }
}
