// Integration tests for wordle-buddy
// These exercise the library through its public API

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;
use wordle_buddy::cli::CliInterface;
use wordle_buddy::game_state::{MSG_NOT_IN_LIST, MSG_WON, STORAGE_KEY};
use wordle_buddy::{
    FileStore, Game, GamePhase, LetterStatus, MemoryStore, SavedGame, SessionStore,
    SolverConstraints, decode_state, embedded_wordbank, encode_state, evaluate, filter_candidates,
    game_loop, load_wordbank_from_file, load_wordbank_from_str,
};

const TEST_WORDS: &str = "crane\nslate\nraise\nstare\napple\nallot\npilot\nbrain\ntrace\nabout\n";

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

/// A store that already holds a game with `solution` and no guesses.
fn store_with_solution(solution: &str) -> MemoryStore {
    let saved = SavedGame {
        solution: Some(solution.to_string()),
        ..SavedGame::default()
    };
    let mut store = MemoryStore::new();
    store
        .set(STORAGE_KEY, &encode_state(&saved).unwrap())
        .unwrap();
    store
}

#[test]
fn test_embedded_wordbank_is_usable() {
    let words = embedded_wordbank();
    assert!(words.len() >= 100);
    assert!(words.iter().all(|w| w.len() == 5));
    assert!(words.contains("crane"));
    assert!(words.contains("CRANE"));
}

#[test]
fn test_load_wordbank_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.txt");
    std::fs::write(&path, "Crane\n  slate \ntoolong\nab\n\nPILOT\n").unwrap();

    let words = load_wordbank_from_file(&path).unwrap();
    assert_eq!(words.as_slice(), ["crane", "slate", "pilot"]);
}

#[test]
fn test_load_wordbank_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_wordbank_from_file(dir.path().join("missing.txt"));
    assert!(matches!(result, Err(wordle_buddy::Error::WordList { .. })));
}

#[test]
fn test_game_win_via_keyboard_actions() {
    let words = load_wordbank_from_str(TEST_WORDS);
    let mut game = Game::new(words, store_with_solution("crane"), rng());
    assert_eq!(game.solution(), Some("crane"));

    for c in "slate".chars() {
        game.handle_letter_input(c);
    }
    game.handle_submit_guess();
    assert_eq!(game.guesses(), ["slate"]);
    assert_eq!(game.statuses()[0], evaluate("slate", "crane"));
    assert_eq!(game.phase(), GamePhase::Playing);

    for c in "crane".chars() {
        game.handle_letter_input(c);
    }
    game.handle_submit_guess();
    assert_eq!(game.phase(), GamePhase::Won);
    assert_eq!(game.message(), MSG_WON);
    assert_eq!(game.keyboard_statuses().get(&'C'), Some(&LetterStatus::Correct));
}

#[test]
fn test_game_rejects_unknown_word_without_using_a_row() {
    let words = load_wordbank_from_str(TEST_WORDS);
    let mut game = Game::new(words, store_with_solution("crane"), rng());

    game.enter_word("zzzzz");
    assert_eq!(game.message(), MSG_NOT_IN_LIST);
    assert!(game.guesses().is_empty());
    assert_eq!(game.current_guess(), "ZZZZZ");
}

#[test]
fn test_session_survives_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let words = load_wordbank_from_str(TEST_WORDS);

    let (solution, guess) = {
        let mut game = Game::new(words.clone(), FileStore::new(dir.path()), rng());
        let solution = game.solution().unwrap().to_string();
        let guess = words.iter().find(|w| *w != solution).unwrap().to_string();
        game.enter_word(&guess);
        game.handle_letter_input('s');
        game.handle_letter_input('t');
        (solution, guess)
    };

    let game = Game::new(words, FileStore::new(dir.path()), StdRng::seed_from_u64(99));
    assert_eq!(game.solution(), Some(solution.as_str()));
    assert_eq!(game.guesses(), [guess]);
    assert_eq!(game.current_guess(), "ST");
}

#[test]
fn test_saved_game_from_other_word_list_is_discarded() {
    let words = load_wordbank_from_str(TEST_WORDS);
    let game = Game::new(words, store_with_solution("zebra"), rng());
    let solution = game.solution().unwrap();
    assert_ne!(solution, "zebra");
    assert!(TEST_WORDS.lines().any(|w| w == solution));
}

#[test]
fn test_plain_json_saved_game_is_restored() {
    let json = r#"{"solution":"pilot","guesses":["allot"],"statuses":[["absent","absent","correct","correct","correct"]],"currentGuess":"","message":"","gameState":"playing"}"#;
    let mut store = MemoryStore::new();
    store.set(STORAGE_KEY, json).unwrap();

    let words = load_wordbank_from_str(TEST_WORDS);
    let game = Game::new(words, store, rng());
    assert_eq!(game.solution(), Some("pilot"));
    assert_eq!(game.guesses(), ["allot"]);

    // Written back in the encoded form.
    let raw = game.store().get(STORAGE_KEY).unwrap().unwrap();
    assert!(!raw.starts_with('{'));
    assert_eq!(decode_state(&raw).unwrap().guesses, ["allot"]);
}

#[test]
fn test_console_loop_plays_to_a_win() {
    let words = load_wordbank_from_str(TEST_WORDS);
    let mut game = Game::new(words, store_with_solution("brain"), rng());
    let mut interface = CliInterface::new(Cursor::new("trace\n\nbrain\n"));

    game_loop(&mut game, &mut interface);

    assert_eq!(game.phase(), GamePhase::Won);
    assert_eq!(game.guesses(), ["trace", "brain"]);
}

#[test]
fn test_console_loop_plays_to_a_loss() {
    let words = load_wordbank_from_str(TEST_WORDS);
    let mut game = Game::new(words, store_with_solution("crane"), rng());
    let input = "slate\nraise\nstare\napple\nallot\npilot\nbrain\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));

    game_loop(&mut game, &mut interface);

    assert_eq!(game.phase(), GamePhase::Lost);
    assert_eq!(game.guesses().len(), 6);
    assert_eq!(game.message(), "The word was CRANE.");
}

#[test]
fn test_console_loop_new_game_after_finish() {
    let words = load_wordbank_from_str(TEST_WORDS);
    let mut game = Game::new(words, store_with_solution("crane"), rng());
    let mut interface = CliInterface::new(Cursor::new("crane\nnext\n"));

    game_loop(&mut game, &mut interface);

    assert_eq!(game.phase(), GamePhase::Playing);
    assert!(game.guesses().is_empty());
}

#[test]
fn test_empty_word_list_leaves_game_idle() {
    let mut game = Game::new(load_wordbank_from_str(""), MemoryStore::new(), rng());
    assert_eq!(game.solution(), None);
    game.enter_word("crane");
    game.start_new_game();
    assert!(game.guesses().is_empty());
    assert!(!game.can_play());
    assert_eq!(game.store().get(STORAGE_KEY).unwrap(), None);
}

#[test]
fn test_solver_over_embedded_list() {
    let words = embedded_wordbank();
    let mut constraints = SolverConstraints::new();
    constraints.set_correct(0, "c");
    constraints.set_correct(4, "e");
    constraints.set_absent("st");

    let results = filter_candidates(&words, &constraints);
    assert!(results.iter().any(|w| w == "crane"));
    assert!(results.len() <= 100);
    for word in &results {
        assert!(word.starts_with('c'));
        assert!(word.ends_with('e'));
        assert!(!word.contains('s') && !word.contains('t'));
    }
}

#[test]
fn test_solver_agrees_with_evaluation() {
    // Every word consistent with a scored guess must still be a candidate.
    let words = load_wordbank_from_str(TEST_WORDS);
    let row = evaluate("trace", "crane");
    let mut constraints = SolverConstraints::new();
    for (i, (c, status)) in "trace".chars().zip(row).enumerate() {
        match status {
            LetterStatus::Correct => constraints.set_correct(i, &c.to_string()),
            LetterStatus::Present => constraints.set_excluded(i, &c.to_string()),
            LetterStatus::Absent => {}
        }
    }
    constraints.set_absent("t");

    assert_eq!(filter_candidates(&words, &constraints), ["crane"]);
}
