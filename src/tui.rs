//! TUI (Terminal User Interface) for the guessing game
//!
//! Renders the board, an on-screen keyboard colored by the best status seen
//! for each letter, and the session message, using Ratatui.
//!
//! # Keys
//! - Letters type into the current row, BACKSPACE deletes, ENTER submits
//! - ENTER or N on a finished board starts a new game, CTRL-N at any time
//! - ESC or CTRL-C quits

use crate::feedback::LetterStatus;
use crate::game_state::{GameInterface, GamePhase, GameView, MAX_GUESSES, UserAction};
use crate::wordbank::WORD_LENGTH;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::BTreeMap;
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// (background, foreground) for a tile or key.
fn status_colors(status: Option<LetterStatus>) -> (Color, Color) {
    match status {
        None => (Color::DarkGray, Color::White),
        Some(LetterStatus::Correct) => (Color::Green, Color::Black),
        Some(LetterStatus::Present) => (Color::Yellow, Color::Black),
        Some(LetterStatus::Absent) => (Color::Gray, Color::White),
    }
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    finished: bool,
}

impl TuiInterface {
    /// Switch the terminal to raw mode on the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            finished: false,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the terminal cannot be restored.
    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self, view: &GameView<'_>) -> Result<(), io::Error> {
        self.terminal.draw(|f| {
            Self::render_static(f, view);
        })?;
        Ok(())
    }

    fn render_static(f: &mut Frame, view: &GameView<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Board
                Constraint::Length(5),  // Keyboard
                Constraint::Min(3),     // Message
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], view);
        Self::render_keyboard(f, chunks[2], &view.keys);
        Self::render_message(f, chunks[3], view);
        Self::render_instructions(f, chunks[4], view);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE BUDDY")
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, view: &GameView<'_>) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        for row in 0..MAX_GUESSES {
            let tiles: Vec<(char, Option<LetterStatus>)> =
                match (view.guesses.get(row), view.statuses.get(row)) {
                    (Some(guess), Some(statuses)) => guess
                        .chars()
                        .map(|c| c.to_ascii_uppercase())
                        .zip(statuses.iter().copied().map(Some))
                        .collect(),
                    _ if row == view.guesses.len() && view.phase == GamePhase::Playing => view
                        .current_guess
                        .chars()
                        .chain(std::iter::repeat(' '))
                        .take(WORD_LENGTH)
                        .map(|c| (c, None))
                        .collect(),
                    _ => vec![(' ', None); WORD_LENGTH],
                };
            Self::render_tile_row(f, inner, row, &tiles);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_tile_row(f: &mut Frame, area: Rect, row: usize, tiles: &[(char, Option<LetterStatus>)]) {
        let y = area.y + (row as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for &(letter, status) in tiles {
            let (bg_color, fg_color) = status_colors(status);
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }
        Self::render_line(f, area, y, spans);
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_keyboard(f: &mut Frame, area: Rect, keys: &BTreeMap<char, LetterStatus>) {
        let lines: Vec<Line> = KEYBOARD_ROWS
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut spans = Vec::new();
                if i == 2 {
                    spans.push(Span::styled(" ENTER ", Style::default().bg(Color::DarkGray)));
                    spans.push(Span::raw(" "));
                }
                for letter in row.chars() {
                    let (bg_color, fg_color) = status_colors(keys.get(&letter).copied());
                    spans.push(Span::styled(
                        format!(" {letter} "),
                        Style::default().fg(fg_color).bg(bg_color),
                    ));
                    spans.push(Span::raw(" "));
                }
                if i == 2 {
                    spans.push(Span::styled(" BACK ", Style::default().bg(Color::DarkGray)));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Keyboard").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_message(f: &mut Frame, area: Rect, view: &GameView<'_>) {
        let (text, style) = if !view.has_words {
            ("No words loaded.", ERROR_STYLE)
        } else {
            let style = match view.phase {
                GamePhase::Playing => MESSAGE_STYLE,
                GamePhase::Won => SUCCESS_STYLE,
                GamePhase::Lost => ERROR_STYLE,
            };
            (view.message, style)
        };

        let paragraph = Paragraph::new(Line::from(vec![Span::styled(text, style)]))
            .block(Block::default().title("Message").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, view: &GameView<'_>) {
        let text = if view.playable {
            "Type your guess | ENTER: Submit | BACKSPACE: Delete | CTRL-N: New Game | ESC: Quit"
        } else if view.has_words {
            "ENTER / N: New Game | ESC: Quit"
        } else {
            "ESC: Quit"
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let event = event::read()?;
        debug_log!("handle_input() - Event received: {:?}", event);

        match event {
            Event::Resize(_, _) => Ok(Some(UserAction::Redraw)),
            Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {
                debug_log!("handle_input() - Ignoring non-key event");
                Ok(None)
            }
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }
                Ok(self.map_key(key))
            }
        }
    }

    fn map_key(&self, key: KeyEvent) -> Option<UserAction> {
        // Alt-tab can leak replacement and control characters into the stream
        if let KeyCode::Char(c) = key.code {
            if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD {
                debug_log!("map_key() - Ignoring invalid character: {:?}", c);
                return None;
            }
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Char('c') if ctrl => Some(UserAction::Exit),
            KeyCode::Char('n') if ctrl => Some(UserAction::NewGame),
            _ if ctrl || alt => {
                debug_log!("map_key() - Ignoring key with modifier: {:?}", key.modifiers);
                None
            }
            KeyCode::Enter => Some(UserAction::Submit),
            KeyCode::Char('n' | 'N') if self.finished => Some(UserAction::NewGame),
            KeyCode::Backspace => Some(UserAction::Backspace),
            KeyCode::Char(c) if c.is_ascii_alphabetic() => Some(UserAction::Letter(c)),
            _ => {
                debug_log!("map_key() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn render(&mut self, view: &GameView<'_>) {
        self.finished = view.phase != GamePhase::Playing;
        if let Err(e) = self.draw(view) {
            debug_log!("Draw error: {}", e);
        }
    }

    fn next_action(&mut self) -> Option<UserAction> {
        match self.handle_input() {
            Ok(action) => action,
            Err(_e) => {
                info_log!("next_action() - Error handling input, returning Exit");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_exit_message(&mut self) {
        info_log!("display_exit_message() - Leaving TUI");
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
