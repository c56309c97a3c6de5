use crate::wordbank::WORD_LENGTH;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-letter result of a guess.
///
/// Ordered `Absent < Present < Correct` so the best status seen for a key
/// is simply the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    Absent,
    Present,
    Correct,
}

pub type Feedback = [LetterStatus; WORD_LENGTH];

/// Score `guess` against `solution` with standard duplicate-letter handling.
///
/// Both words must be five characters in the same case.
#[must_use]
pub fn evaluate(guess: &str, solution: &str) -> Feedback {
    let guess_chars: Vec<char> = guess.chars().collect();
    let solution_chars: Vec<char> = solution.chars().collect();
    debug_assert_eq!(guess_chars.len(), WORD_LENGTH);
    debug_assert_eq!(solution_chars.len(), WORD_LENGTH);

    let mut feedback = [LetterStatus::Absent; WORD_LENGTH];
    let mut consumed = [false; WORD_LENGTH];

    // First pass: greens
    for i in 0..WORD_LENGTH {
        if guess_chars[i] == solution_chars[i] {
            feedback[i] = LetterStatus::Correct;
            consumed[i] = true;
        }
    }
    // Second pass: yellows, leftmost unconsumed occurrence
    for i in 0..WORD_LENGTH {
        if feedback[i] == LetterStatus::Correct {
            continue;
        }
        if let Some(pos) =
            (0..WORD_LENGTH).find(|&j| !consumed[j] && solution_chars[j] == guess_chars[i])
        {
            feedback[i] = LetterStatus::Present;
            consumed[pos] = true;
        }
    }
    feedback
}

/// Best status per uppercase letter across the whole guess history.
#[must_use]
pub fn keyboard_statuses(guesses: &[String], statuses: &[Feedback]) -> BTreeMap<char, LetterStatus> {
    let mut keys = BTreeMap::new();
    for (guess, row) in guesses.iter().zip(statuses) {
        for (letter, &status) in guess.chars().zip(row) {
            keys.entry(letter.to_ascii_uppercase())
                .and_modify(|best: &mut LetterStatus| *best = (*best).max(status))
                .or_insert(status);
        }
    }
    keys
}
