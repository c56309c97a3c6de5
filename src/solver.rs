//! Constraint filter for the solve mode.
//!
//! Constraints come straight from user input: a letter fixed at a position
//! (green), letters ruled out at a position (yellow), and letters absent
//! from the word entirely (gray).

use crate::wordbank::{WORD_LENGTH, WordList};
use std::collections::BTreeSet;

pub const MAX_RESULTS: usize = 100;

/// Uppercase ASCII letters of `raw`, everything else dropped.
#[must_use]
pub fn sanitize_letters(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverConstraints {
    correct: [Option<char>; WORD_LENGTH],
    excluded: [BTreeSet<char>; WORD_LENGTH],
    absent: BTreeSet<char>,
}

impl SolverConstraints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn correct(&self) -> &[Option<char>; WORD_LENGTH] {
        &self.correct
    }

    #[must_use]
    pub fn excluded(&self) -> &[BTreeSet<char>; WORD_LENGTH] {
        &self.excluded
    }

    #[must_use]
    pub fn absent(&self) -> &BTreeSet<char> {
        &self.absent
    }

    /// Fix the letter at `position` to the first letter of `raw`, or clear
    /// the slot when `raw` has none.
    ///
    /// # Panics
    ///
    /// Panics if `position >= WORD_LENGTH`.
    pub fn set_correct(&mut self, position: usize, raw: &str) {
        let letter = sanitize_letters(raw).chars().next();
        self.fix_letter(position, letter);
    }

    /// Replace the letters ruled out at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= WORD_LENGTH`.
    pub fn set_excluded(&mut self, position: usize, raw: &str) {
        let letters: BTreeSet<char> = sanitize_letters(raw).chars().collect();
        for letter in &letters {
            self.absent.remove(letter);
        }
        self.excluded[position] = letters;
    }

    /// Replace the absent set. Letters already known to be in the word are
    /// dropped.
    pub fn set_absent(&mut self, raw: &str) {
        let known = self.known_letters();
        self.absent = sanitize_letters(raw)
            .chars()
            .filter(|c| !known.contains(c))
            .collect();
    }

    /// Fill the correct slots from the start with up to five pasted letters.
    pub fn paste_correct(&mut self, raw: &str) {
        for (position, letter) in sanitize_letters(raw).chars().take(WORD_LENGTH).enumerate() {
            self.fix_letter(position, Some(letter));
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn fix_letter(&mut self, position: usize, letter: Option<char>) {
        if let Some(letter) = letter {
            self.absent.remove(&letter);
        }
        self.correct[position] = letter;
    }

    fn known_letters(&self) -> BTreeSet<char> {
        self.correct
            .iter()
            .flatten()
            .copied()
            .chain(self.excluded.iter().flatten().copied())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.correct.iter().all(Option::is_none)
            && self.excluded.iter().all(BTreeSet::is_empty)
            && self.absent.is_empty()
    }

    /// Whether `word` satisfies every constraint.
    ///
    /// A letter ruled out at a position is only forbidden there; it is not
    /// required to appear anywhere else in the word.
    #[must_use]
    pub fn matches(&self, word: &str) -> bool {
        let letters: Vec<char> = word.chars().map(|c| c.to_ascii_uppercase()).collect();
        if letters.len() != WORD_LENGTH {
            return false;
        }
        for (i, letter) in letters.iter().enumerate() {
            if self.correct[i].is_some_and(|c| c != *letter) {
                return false;
            }
            if self.excluded[i].contains(letter) {
                return false;
            }
        }
        !letters.iter().any(|c| self.absent.contains(c))
    }

    /// First [`MAX_RESULTS`] matching words in list order. Empty when no
    /// constraint is set.
    #[must_use]
    pub fn filter(&self, words: &WordList) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        words
            .iter()
            .filter(|word| self.matches(word))
            .take(MAX_RESULTS)
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn criteria(&self) -> Criteria {
        Criteria {
            correct: self.correct.iter().flatten().collect(),
            misplaced: self.excluded.iter().flatten().collect(),
            absent: self.absent.iter().collect(),
        }
    }
}

pub fn filter_candidates(words: &WordList, constraints: &SolverConstraints) -> Vec<String> {
    constraints.filter(words)
}

/// Flattened, uppercase summary of the active constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub correct: String,
    pub misplaced: String,
    pub absent: String,
}

impl Criteria {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.correct.is_empty() && self.misplaced.is_empty() && self.absent.is_empty()
    }
}
