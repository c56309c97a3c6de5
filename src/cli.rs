use crate::error::{Error, Result};
use crate::feedback::LetterStatus;
use crate::game_state::{GameInterface, GamePhase, GameView, MAX_GUESSES, UserAction};
use crate::solver::{Criteria, SolverConstraints, sanitize_letters};
use crate::wordbank::WORD_LENGTH;
use clap::{Args, Parser, Subcommand};
use std::io::BufRead;
use std::path::PathBuf;

const RESULTS_PER_LINE: usize = 10;

/// Wordle game and word-list solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (defaults to the built-in list)
    #[arg(short = 'i', long = "input", global = true)]
    pub wordbank_path: Option<PathBuf>,

    /// Directory for the saved game and the log file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Write logs here instead of the data directory
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a game (default)
    Play(PlayArgs),
    /// List words matching known letters
    Solve(SolveArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayArgs {
    /// Line-based console mode instead of the terminal UI
    #[arg(long)]
    pub plain: bool,

    /// Neither restore nor save the game
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveArgs {
    /// Letters in their correct positions, e.g. "c_a__" (_ . or ? for unknown)
    #[arg(short, long)]
    pub correct: Option<String>,

    /// Letters that are not at a position, e.g. "2:ae" (repeatable)
    #[arg(short, long)]
    pub misplaced: Vec<String>,

    /// Letters that are not in the word
    #[arg(short, long)]
    pub absent: Option<String>,
}

impl Cli {
    #[must_use]
    pub fn selected_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Play(PlayArgs::default()))
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn parse_pattern(pattern: &str) -> Result<[Option<char>; WORD_LENGTH]> {
    let chars: Vec<char> = pattern.trim().chars().collect();
    if chars.len() != WORD_LENGTH {
        return Err(Error::InvalidPattern(pattern.to_string()));
    }
    let mut slots = [None; WORD_LENGTH];
    for (slot, c) in slots.iter_mut().zip(chars) {
        *slot = match c {
            '_' | '.' | '?' => None,
            c if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
            _ => return Err(Error::InvalidPattern(pattern.to_string())),
        };
    }
    Ok(slots)
}

/// `"2:ae"` -> `(1, "AE")`. Positions are 1-based on the command line.
fn parse_misplaced(entry: &str) -> Result<(usize, String)> {
    let invalid = || Error::InvalidMisplaced(entry.to_string());
    let (position, letters) = entry.split_once(':').ok_or_else(invalid)?;
    let position: usize = position.trim().parse().map_err(|_| invalid())?;
    if !(1..=WORD_LENGTH).contains(&position) {
        return Err(invalid());
    }
    let letters = sanitize_letters(letters);
    if letters.is_empty() {
        return Err(invalid());
    }
    Ok((position - 1, letters))
}

impl SolveArgs {
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] or [`Error::InvalidMisplaced`] for
    /// malformed arguments.
    pub fn to_constraints(&self) -> Result<SolverConstraints> {
        let mut constraints = SolverConstraints::new();
        if let Some(pattern) = &self.correct {
            for (position, letter) in parse_pattern(pattern)?.into_iter().enumerate() {
                if let Some(letter) = letter {
                    constraints.set_correct(position, &letter.to_string());
                }
            }
        }
        for entry in &self.misplaced {
            let (position, letters) = parse_misplaced(entry)?;
            let mut merged: String = constraints.excluded()[position].iter().collect();
            merged.push_str(&letters);
            constraints.set_excluded(position, &merged);
        }
        if let Some(absent) = &self.absent {
            constraints.set_absent(absent);
        }
        Ok(constraints)
    }
}

#[must_use]
pub fn format_solve_results(criteria: &Criteria, words: &[String]) -> String {
    if criteria.is_empty() {
        return "No constraints given. Use --correct, --misplaced or --absent.\n".to_string();
    }
    if words.is_empty() {
        return "No matching words found\nTry adjusting your letter constraints\n".to_string();
    }

    let mut lines = Vec::new();
    if !criteria.correct.is_empty() {
        lines.push(format!("Correct positions: {}", criteria.correct));
    }
    if !criteria.misplaced.is_empty() {
        lines.push(format!("Wrong positions: {}", criteria.misplaced));
    }
    if !criteria.absent.is_empty() {
        lines.push(format!("Absent letters: {}", criteria.absent));
    }
    let plural = if words.len() == 1 { "" } else { "s" };
    lines.push(format!("Found {} matching word{plural}", words.len()));
    for chunk in words.chunks(RESULTS_PER_LINE) {
        let row: Vec<String> = chunk.iter().map(|w| w.to_uppercase()).collect();
        lines.push(row.join(" "));
    }
    join_lines(&lines)
}

fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn display_solve_results(criteria: &Criteria, words: &[String]) {
    print!("{}", format_solve_results(criteria, words));
}

fn tile(letter: char, status: LetterStatus) -> String {
    match status {
        LetterStatus::Correct => format!("[{letter}]"),
        LetterStatus::Present => format!("({letter})"),
        LetterStatus::Absent => format!(" {letter} "),
    }
}

/// Text rendering of the board: `[A]` correct, `(A)` present, ` A ` absent.
#[must_use]
pub fn format_board(view: &GameView<'_>) -> String {
    if !view.has_words {
        return "No words loaded.\n".to_string();
    }

    let mut lines = Vec::new();
    for row in 0..MAX_GUESSES {
        if let (Some(guess), Some(statuses)) = (view.guesses.get(row), view.statuses.get(row)) {
            let tiles: Vec<String> = guess
                .chars()
                .zip(statuses)
                .map(|(c, &s)| tile(c.to_ascii_uppercase(), s))
                .collect();
            lines.push(tiles.join(""));
        } else if row == view.guesses.len() && view.phase == GamePhase::Playing {
            let typed: String = view
                .current_guess
                .chars()
                .chain(std::iter::repeat('_'))
                .take(WORD_LENGTH)
                .map(|c| format!(" {c} "))
                .collect();
            lines.push(format!("{typed} <"));
        } else {
            lines.push(" . ".repeat(WORD_LENGTH));
        }
    }

    for (label, status) in [
        ("correct", LetterStatus::Correct),
        ("present", LetterStatus::Present),
        ("absent", LetterStatus::Absent),
    ] {
        let letters: String = view
            .keys
            .iter()
            .filter(|&(_, &s)| s == status)
            .map(|(&c, _)| c)
            .collect();
        if !letters.is_empty() {
            lines.push(format!("{label}: {letters}"));
        }
    }

    if !view.message.is_empty() {
        lines.push(view.message.to_string());
    }
    if view.phase != GamePhase::Playing {
        lines.push("Type 'next' for a new game or 'exit' to quit.".to_string());
    }
    join_lines(&lines)
}

fn parse_line(line: &str) -> Option<UserAction> {
    let input = line.trim();
    match input.to_ascii_lowercase().as_str() {
        "" => None,
        "exit" | "quit" => Some(UserAction::Exit),
        "next" | "new" => Some(UserAction::NewGame),
        _ => Some(UserAction::Word(input.to_string())),
    }
}

/// Console implementation of [`GameInterface`]: one word per line.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn render(&mut self, view: &GameView<'_>) {
        println!();
        print!("{}", format_board(view));
    }

    fn next_action(&mut self) -> Option<UserAction> {
        println!("\nEnter your guess (5 letters, or 'next' to start a new game, or 'exit' to quit):");
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) | Err(_) => Some(UserAction::Exit),
            Ok(_) => parse_line(&input),
        }
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::evaluate;
    use std::collections::BTreeMap;
    use std::io::Cursor;

    fn view<'a>(
        guesses: &'a [String],
        statuses: &'a [[LetterStatus; 5]],
        current_guess: &'a str,
        message: &'a str,
        phase: GamePhase,
    ) -> GameView<'a> {
        GameView {
            guesses,
            statuses,
            current_guess,
            message,
            phase,
            keys: crate::feedback::keyboard_statuses(guesses, statuses),
            playable: phase == GamePhase::Playing,
            has_words: true,
        }
    }

    #[test]
    fn test_cli_defaults_to_play() {
        let cli = Cli::parse_from(["wordle-buddy"]);
        assert_eq!(cli.selected_command(), Command::Play(PlayArgs::default()));
        assert_eq!(cli.wordbank_path, None);
    }

    #[test]
    fn test_cli_play_flags() {
        let cli = Cli::parse_from(["wordle-buddy", "play", "--plain", "--no-save", "-i", "words.txt"]);
        assert_eq!(
            cli.selected_command(),
            Command::Play(PlayArgs {
                plain: true,
                no_save: true
            })
        );
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("words.txt")));
    }

    #[test]
    fn test_cli_solve_args() {
        let cli = Cli::parse_from([
            "wordle-buddy",
            "solve",
            "--correct",
            "c_a__",
            "-m",
            "2:r",
            "-m",
            "5:e",
            "--absent",
            "xyz",
        ]);
        let Command::Solve(args) = cli.selected_command() else {
            panic!("Expected solve command");
        };
        assert_eq!(args.correct.as_deref(), Some("c_a__"));
        assert_eq!(args.misplaced, ["2:r", "5:e"]);
        assert_eq!(args.absent.as_deref(), Some("xyz"));
    }

    #[test]
    fn test_parse_pattern() {
        assert_eq!(
            parse_pattern("c_a.?").unwrap(),
            [Some('C'), None, Some('A'), None, None]
        );
        assert!(matches!(parse_pattern("c_a"), Err(Error::InvalidPattern(_))));
        assert!(matches!(parse_pattern("c_a_1"), Err(Error::InvalidPattern(_))));
    }

    #[test]
    fn test_parse_misplaced() {
        assert_eq!(parse_misplaced("2:ae").unwrap(), (1, "AE".to_string()));
        assert_eq!(parse_misplaced(" 5 : t ").unwrap(), (4, "T".to_string()));
        assert!(parse_misplaced("0:a").is_err());
        assert!(parse_misplaced("6:a").is_err());
        assert!(parse_misplaced("2").is_err());
        assert!(parse_misplaced("x:a").is_err());
        assert!(parse_misplaced("2:12").is_err());
    }

    #[test]
    fn test_solve_args_to_constraints() {
        let args = SolveArgs {
            correct: Some("c____".to_string()),
            misplaced: vec!["2:r".to_string(), "2:a".to_string()],
            absent: Some("crxz".to_string()),
        };
        let constraints = args.to_constraints().unwrap();
        assert_eq!(constraints.correct()[0], Some('C'));
        assert_eq!(constraints.excluded()[1].iter().collect::<String>(), "AR");
        // C and R are known letters and never end up absent.
        assert_eq!(constraints.absent().iter().collect::<String>(), "XZ");
    }

    #[test]
    fn test_solve_args_default_is_empty() {
        let constraints = SolveArgs::default().to_constraints().unwrap();
        assert!(constraints.is_empty());
    }

    #[test]
    fn test_format_solve_results_no_criteria() {
        let text = format_solve_results(&Criteria::default(), &[]);
        assert!(text.starts_with("No constraints given"));
    }

    #[test]
    fn test_format_solve_results_no_matches() {
        let criteria = Criteria {
            absent: "E".to_string(),
            ..Criteria::default()
        };
        let text = format_solve_results(&criteria, &[]);
        assert!(text.contains("No matching words found"));
    }

    #[test]
    fn test_format_solve_results_lists_words() {
        let criteria = Criteria {
            correct: "C".to_string(),
            misplaced: String::new(),
            absent: "Z".to_string(),
        };
        let words = vec!["crane".to_string()];
        let text = format_solve_results(&criteria, &words);
        assert!(text.contains("Correct positions: C"));
        assert!(!text.contains("Wrong positions"));
        assert!(text.contains("Absent letters: Z"));
        assert!(text.contains("Found 1 matching word\n"));
        assert!(text.contains("CRANE"));
    }

    #[test]
    fn test_format_solve_results_wraps_lines() {
        let criteria = Criteria {
            correct: "A".to_string(),
            ..Criteria::default()
        };
        let words: Vec<String> = (0..25).map(|_| "about".to_string()).collect();
        let text = format_solve_results(&criteria, &words);
        assert!(text.contains("Found 25 matching words"));
        assert_eq!(text.lines().filter(|l| l.starts_with("ABOUT")).count(), 3);
    }

    #[test]
    fn test_format_board_in_progress() {
        let guesses = vec!["apple".to_string()];
        let statuses = vec![evaluate("apple", "allot")];
        let board = format_board(&view(&guesses, &statuses, "LO", "", GamePhase::Playing));
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines[0], "[A] P  P (L) E ");
        assert_eq!(lines[1], " L  O  _  _  _  <");
        assert_eq!(lines[2], " .  .  .  .  . ");
        assert!(board.contains("correct: A\n"));
        assert!(board.contains("present: L\n"));
        assert!(board.contains("absent: EP\n"));
        assert!(!board.contains("Type 'next'"));
    }

    #[test]
    fn test_format_board_finished() {
        let guesses = vec!["crane".to_string()];
        let statuses = vec![[LetterStatus::Correct; 5]];
        let board = format_board(&view(
            &guesses,
            &statuses,
            "",
            "Nice! You found the word.",
            GamePhase::Won,
        ));
        assert!(board.starts_with("[C][R][A][N][E]\n"));
        assert!(!board.contains('<'));
        assert!(board.contains("Nice! You found the word."));
        assert!(board.contains("Type 'next'"));
    }

    #[test]
    fn test_format_board_without_words() {
        let board = format_board(&GameView {
            guesses: &[],
            statuses: &[],
            current_guess: "",
            message: "",
            phase: GamePhase::Playing,
            keys: BTreeMap::new(),
            playable: false,
            has_words: false,
        });
        assert_eq!(board, "No words loaded.\n");
    }

    #[test]
    fn test_format_board_fresh_game_is_six_rows() {
        let board = format_board(&view(&[], &[], "", "", GamePhase::Playing));
        let expected = format!(
            " _  _  _  _  _  <\n{}",
            format!("{}\n", " . ".repeat(5)).repeat(5)
        );
        assert_eq!(board, expected);
    }

    #[test]
    fn test_format_solve_results_exact_output() {
        let mut constraints = SolverConstraints::new();
        constraints.set_correct(0, "c");
        constraints.set_absent("s");
        let words = vec!["crane".to_string(), "crate".to_string()];
        let text = format_solve_results(&constraints.criteria(), &words);
        assert_eq!(
            text,
            "Correct positions: C\nAbsent letters: S\nFound 2 matching words\nCRANE CRATE\n"
        );
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  \n"), None);
        assert_eq!(parse_line("EXIT\n"), Some(UserAction::Exit));
        assert_eq!(parse_line("quit"), Some(UserAction::Exit));
        assert_eq!(parse_line("next\n"), Some(UserAction::NewGame));
        assert_eq!(
            parse_line(" crane \n"),
            Some(UserAction::Word("crane".to_string()))
        );
    }

    #[test]
    fn test_cli_interface_reads_actions() {
        let mut interface = CliInterface::new(Cursor::new("crane\n\nnext\nexit\n"));
        assert_eq!(
            interface.next_action(),
            Some(UserAction::Word("crane".to_string()))
        );
        assert_eq!(interface.next_action(), None);
        assert_eq!(interface.next_action(), Some(UserAction::NewGame));
        assert_eq!(interface.next_action(), Some(UserAction::Exit));
    }

    #[test]
    fn test_cli_interface_eof_exits() {
        let mut interface = CliInterface::new(Cursor::new(""));
        assert_eq!(interface.next_action(), Some(UserAction::Exit));
    }
}
