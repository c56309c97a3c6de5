use anyhow::Context;
use log::{error, info};
use std::io;
use std::path::{Path, PathBuf};
use wordle_buddy::cli::{CliInterface, Command, PlayArgs, SolveArgs, display_solve_results, parse_cli};
use wordle_buddy::logging::{self, LOG_FILE_NAME, default_log_path};
use wordle_buddy::storage::{FileStore, MemoryStore, SessionStore, default_data_dir};
use wordle_buddy::tui::TuiInterface;
use wordle_buddy::wordbank::{WordList, embedded_wordbank, load_wordbank_from_file};
use wordle_buddy::{Game, game_loop};

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    let data_dir = cli.data_dir.clone().or_else(default_data_dir);

    let log_path = cli
        .log_file
        .clone()
        .or_else(|| data_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME)))
        .or_else(default_log_path);
    if let Some(path) = &log_path {
        if let Err(e) = logging::init(path) {
            eprintln!("Logging disabled, could not open '{}': {e}", path.display());
        }
    }
    info!("wordle-buddy {} starting", env!("CARGO_PKG_VERSION"));

    let words = load_words(cli.wordbank_path.as_deref());

    match cli.selected_command() {
        Command::Play(args) => run_play(words, data_dir, &args),
        Command::Solve(args) => run_solve(&words, &args),
    }
}

/// A word list that fails to load leaves the game idle instead of aborting.
fn load_words(path: Option<&Path>) -> WordList {
    match path {
        Some(path) => load_wordbank_from_file(path).unwrap_or_else(|e| {
            error!("Failed to load word list: {e}");
            eprintln!("Failed to load word list from '{}': {e}", path.display());
            WordList::default()
        }),
        None => embedded_wordbank(),
    }
}

fn run_play(words: WordList, data_dir: Option<PathBuf>, args: &PlayArgs) -> anyhow::Result<()> {
    let store: Box<dyn SessionStore> = match data_dir {
        Some(dir) if !args.no_save => Box::new(FileStore::new(dir)),
        _ => Box::new(MemoryStore::new()),
    };
    let mut game = Game::new(words, store, rand::rng());

    if args.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut game, &mut interface);
    } else {
        let mut interface = TuiInterface::new().context("failed to set up the terminal")?;
        game_loop(&mut game, &mut interface);
        interface
            .cleanup()
            .context("failed to restore the terminal")?;
    }
    info!("wordle-buddy exiting");
    Ok(())
}

fn run_solve(words: &WordList, args: &SolveArgs) -> anyhow::Result<()> {
    let constraints = args.to_constraints()?;
    let matches = constraints.filter(words);
    info!("Solver matched {} words", matches.len());
    display_solve_results(&constraints.criteria(), &matches);
    Ok(())
}
