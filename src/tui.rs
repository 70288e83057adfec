//! TUI (Terminal User Interface) front end for the assistant
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiApp`: screen state and key handling, no terminal access
//! - `TuiInterface`: owns the terminal, draws `TuiApp`, implements `GameInterface`
//!
//! # State Machine
//! - `EnteringGuess` → `MarkingFeedback` → `ConfirmingFeedback` → back to `EnteringGuess`
//! - Terminal state: `GameOver`

use crate::error::{Result, SolverError};
use crate::feedback::{Feedback, Pattern};
use crate::game_state::{GameInterface, Session, UserAction};
use crate::solver::{RankedGuess, Round, Suggestion};
use crate::wordbank::{Dictionary, WORD_LENGTH, Word, letter_index};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const MAX_CANDIDATES_DISPLAY: usize = 12;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

const HELP_TEXT: &str = "Type a guess and press ENTER, then mark each tile: G green, Y yellow, B gray. \
'-' undo, F5 reset, '+'/'_' more/fewer suggestions, TAB list candidates, ESC quit.";

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LetterState {
    Entered,
    Marked(Feedback),
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Entered => (Color::DarkGray, Color::White),
            Self::Marked(feedback) => feedback_colors(feedback),
        }
    }
}

fn feedback_colors(feedback: Feedback) -> (Color, Color) {
    match feedback {
        Feedback::Correct => (Color::Green, Color::Black),
        Feedback::Present => (Color::Yellow, Color::Black),
        Feedback::Absent => (Color::Gray, Color::White),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GuessRow {
    word: Word,
    states: [LetterState; WORD_LENGTH],
}

impl GuessRow {
    fn entered(word: Word) -> Self {
        Self {
            word,
            states: [LetterState::Entered; WORD_LENGTH],
        }
    }

    fn from_round(round: &Round) -> Self {
        Self {
            word: round.guess,
            states: round.pattern.0.map(LetterState::Marked),
        }
    }

    fn to_round(&self) -> Option<Round> {
        let mut feedback = [Feedback::Absent; WORD_LENGTH];
        for (slot, state) in feedback.iter_mut().zip(self.states) {
            match state {
                LetterState::Marked(f) => *slot = f,
                LetterState::Entered => return None,
            }
        }
        Some(Round::new(self.word, Pattern(feedback)))
    }
}

/// Best feedback seen for each letter across `rounds`, for the keyboard.
///
/// `Correct` outranks `Present`, which outranks `Absent`.
pub fn letter_states(rounds: &[Round]) -> [Option<Feedback>; 26] {
    let mut states = [None; 26];
    for round in rounds {
        merge_letter_states(&mut states, round);
    }
    states
}

fn merge_letter_states(states: &mut [Option<Feedback>; 26], round: &Round) {
    fn rank(feedback: Option<Feedback>) -> u8 {
        match feedback {
            None => 0,
            Some(Feedback::Absent) => 1,
            Some(Feedback::Present) => 2,
            Some(Feedback::Correct) => 3,
        }
    }

    for (&letter, &feedback) in round.guess.letters().iter().zip(round.pattern.feedbacks()) {
        let slot = &mut states[letter_index(letter)];
        if rank(Some(feedback)) > rank(*slot) {
            *slot = Some(feedback);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    MarkingFeedback { marking_index: usize },
    ConfirmingFeedback,
    /// Solved; any key leaves
    GameOver,
}

/// Everything shown on screen, plus the key handling that changes it.
#[derive(Debug)]
pub struct TuiApp {
    rows: Vec<GuessRow>,
    pending: Option<GuessRow>,
    current_input: String,
    state: TuiState,
    remaining: usize,
    top_n: usize,
    suggestions: Vec<RankedGuess>,
    candidates_display: Vec<Word>,
    keyboard: [Option<Feedback>; 26],
    message: String,
    error_message: String,
    status: String,
}

impl Default for TuiApp {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            pending: None,
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            remaining: 0,
            top_n: 0,
            suggestions: Vec::new(),
            candidates_display: Vec::new(),
            keyboard: [None; 26],
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        }
    }
}

impl TuiApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the session after every loop iteration.
    pub fn sync(&mut self, session: &Session, suggestion: &Suggestion) {
        self.rows = session.rounds().iter().map(GuessRow::from_round).collect();
        self.keyboard = letter_states(session.rounds());
        self.remaining = suggestion.remaining.len();
        self.top_n = session.top_n();
        self.suggestions.clone_from(&suggestion.suggestions);
        if !self.candidates_display.is_empty() {
            self.candidates_display.clone_from(&suggestion.remaining);
        }
        self.status = match (suggestion.remaining.len(), suggestion.solution()) {
            (0, _) => "No candidates remain. Check your inputs.".to_string(),
            (_, Some(answer)) => format!("Solution found: {answer}"),
            (n, None) => format!("{n} candidates remaining"),
        };
    }

    /// Feed one key press; returns an action once the player completes one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        if has_modifier_keys(&key) {
            debug_log!("handle_key() - Ignoring key with modifier: {:?}", key.modifiers);
            return None;
        }
        match self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key),
            TuiState::MarkingFeedback { marking_index } => {
                self.handle_feedback_input(key, marking_index)
            }
            TuiState::ConfirmingFeedback => self.handle_confirming_feedback_input(key),
            TuiState::GameOver => Some(UserAction::Exit),
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.current_input.len() < WORD_LENGTH {
                    self.current_input.push(c.to_ascii_lowercase());
                    debug_log!("handle_guess_input() - input now '{}'", self.current_input);
                }
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Enter => {
                match Word::parse(&self.current_input) {
                    Ok(word) => {
                        info_log!("handle_guess_input() - guess entered: {}", word);
                        self.current_input.clear();
                        self.pending = Some(GuessRow::entered(word));
                        self.state = TuiState::MarkingFeedback { marking_index: 0 };
                        self.status = format!("Guess entered: {word} - now mark feedback");
                    }
                    Err(_) => self.error_message = "Guess must be exactly 5 letters!".to_string(),
                }
                None
            }
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Tab => Some(UserAction::List),
            KeyCode::F(5) => Some(UserAction::Reset),
            KeyCode::Char('-') => Some(UserAction::Undo),
            KeyCode::Char('?') => Some(UserAction::Help),
            KeyCode::Char('+' | '=') => Some(UserAction::Top(self.top_n + 1)),
            KeyCode::Char('_') => Some(UserAction::Top(self.top_n.saturating_sub(1))),
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                None
            }
            _ => {
                debug_log!("handle_guess_input() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn handle_feedback_input(&mut self, key: KeyEvent, marking_index: usize) -> Option<UserAction> {
        let Some(row) = self.pending.as_mut() else {
            self.state = TuiState::EnteringGuess;
            return None;
        };

        let mark = match key.code {
            KeyCode::Esc => return Some(UserAction::Exit),
            KeyCode::Backspace if marking_index > 0 => {
                row.states[marking_index - 1] = LetterState::Entered;
                self.state = TuiState::MarkingFeedback {
                    marking_index: marking_index - 1,
                };
                return None;
            }
            KeyCode::Backspace => {
                // Back out of marking and edit the guess again
                self.current_input = row.word.to_string();
                self.pending = None;
                self.state = TuiState::EnteringGuess;
                return None;
            }
            KeyCode::Char(c) => Feedback::from_char(c),
            _ => return None,
        };

        match mark {
            Some(feedback) => {
                self.error_message.clear();
                row.states[marking_index] = LetterState::Marked(feedback);
                self.state = if marking_index + 1 < WORD_LENGTH {
                    TuiState::MarkingFeedback {
                        marking_index: marking_index + 1,
                    }
                } else {
                    self.status = "Press ENTER to confirm feedback".to_string();
                    TuiState::ConfirmingFeedback
                };
            }
            None => {
                self.error_message =
                    "Invalid feedback! Use G (green), Y (yellow), or B (gray).".to_string();
            }
        }
        None
    }

    fn handle_confirming_feedback_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Enter => {
                let round = self.pending.take().and_then(|row| row.to_round());
                self.state = TuiState::EnteringGuess;
                info_log!("handle_confirming_feedback_input() - confirmed {:?}", round);
                round.map(UserAction::Submit)
            }
            KeyCode::Backspace => {
                if let Some(row) = self.pending.as_mut() {
                    row.states[WORD_LENGTH - 1] = LetterState::Entered;
                }
                self.state = TuiState::MarkingFeedback {
                    marking_index: WORD_LENGTH - 1,
                };
                None
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(12),   // Board and suggestions
                Constraint::Length(5), // Keyboard
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(20)])
            .split(chunks[1]);

        render_title(f, chunks[0]);
        self.render_board(f, middle[0]);
        self.render_info(f, middle[1]);
        self.render_keyboard(f, chunks[2]);
        render_status(f, chunks[3], &self.status);
        render_instructions(f, chunks[4], self.state);
    }

    fn render_board(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut rows: Vec<Vec<Span>> = self.rows.iter().map(tile_spans).collect();
        if let Some(pending) = &self.pending {
            let mut spans = tile_spans(pending);
            if let TuiState::MarkingFeedback { marking_index } = self.state {
                spans.push(Span::raw(format!("<- {}", marking_index + 1)));
            }
            rows.push(spans);
        } else if self.state == TuiState::EnteringGuess {
            rows.push(input_spans(&self.current_input));
        }

        // Keep the most recent rows when the board overflows
        let available_rows = (inner.height / ROW_SPACING).max(1) as usize;
        let skip_count = rows.len().saturating_sub(available_rows);
        for (display_index, spans) in rows.into_iter().skip(skip_count).enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let y = inner.y + display_index as u16 * ROW_SPACING;
            if y >= inner.y + inner.height {
                break;
            }
            f.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect {
                    x: inner.x,
                    y,
                    width: inner.width,
                    height: 1,
                },
            );
        }
    }

    fn render_info(&self, f: &mut Frame, area: Rect) {
        let mut lines = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            format!("Remaining candidates: {}", self.remaining),
            INFO_STYLE,
        )]));
        lines.push(Line::from(""));

        if !self.suggestions.is_empty() {
            let source = if self.remaining == 0 {
                " (full allowed list)"
            } else {
                ""
            };
            lines.push(Line::from(vec![Span::styled(
                format!("Top {} suggestions{source}:", self.suggestions.len()),
                HEADER_STYLE,
            )]));
            for (i, ranked) in self.suggestions.iter().enumerate() {
                let style = if i == 0 { SUCCESS_STYLE } else { Style::default() };
                lines.push(Line::from(vec![Span::styled(
                    format!("  {:>2}. {}  {}", i + 1, ranked.word, ranked.score),
                    style,
                )]));
            }
            lines.push(Line::from(""));
        }

        if !self.candidates_display.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                format!("Possible candidates ({}):", self.candidates_display.len()),
                INFO_STYLE,
            )]));
            let shown: Vec<String> = self
                .candidates_display
                .iter()
                .take(MAX_CANDIDATES_DISPLAY)
                .map(Word::to_string)
                .collect();
            lines.push(Line::from(format!("  {}", shown.join(" "))));
            if self.candidates_display.len() > MAX_CANDIDATES_DISPLAY {
                lines.push(Line::from(format!(
                    "  ... and {} more",
                    self.candidates_display.len() - MAX_CANDIDATES_DISPLAY
                )));
            }
            lines.push(Line::from(""));
        }

        if !self.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                self.message.as_str(),
                MESSAGE_STYLE,
            )]));
        }
        if !self.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                self.error_message.as_str(),
                ERROR_STYLE,
            )]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_keyboard(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = KEYBOARD_ROWS
            .iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .bytes()
                    .map(|letter| {
                        let (bg, fg) = match self.keyboard[letter_index(letter)] {
                            Some(feedback) => feedback_colors(feedback),
                            None => (Color::Reset, Color::White),
                        };
                        Span::styled(
                            format!(" {} ", letter.to_ascii_uppercase() as char),
                            Style::default().fg(fg).bg(bg),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Letters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

fn tile_spans(row: &GuessRow) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw("  ")];
    for (&letter, state) in row.word.letters().iter().zip(row.states) {
        let (bg, fg) = state.colors();
        spans.push(Span::styled(
            format!(" {} ", letter.to_ascii_uppercase() as char),
            Style::default().fg(fg).bg(bg),
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

fn input_spans(current_input: &str) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw("  ")];
    for i in 0..WORD_LENGTH {
        let letter = current_input.chars().nth(i).unwrap_or(' ');
        spans.push(Span::styled(
            format!(" {} ", letter.to_ascii_uppercase()),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDLE ASSIST")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
    let text = match state {
        TuiState::EnteringGuess => {
            "Type a guess | ENTER: Submit | -: Undo | F5: Reset | +/_: Suggestions | TAB: List | ?: Help | ESC: Quit"
        }
        TuiState::MarkingFeedback { .. } => {
            "G: Green (correct) | Y: Yellow (wrong position) | B/X: Gray (not in word) | BACKSPACE: Go back"
        }
        TuiState::ConfirmingFeedback => "ENTER: Confirm feedback | BACKSPACE: Go back and edit",
        TuiState::GameOver => "Press any key to exit",
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Full-screen terminal front end.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: TuiApp,
}

impl TuiInterface {
    pub fn new() -> io::Result<Self> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info_log!("TuiInterface::new() - Terminal ready");
        Ok(Self {
            terminal,
            app: TuiApp::new(),
        })
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        let app = &self.app;
        self.terminal.draw(|f| app.render(f))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Wait for the next key press that is worth handling.
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            // Only Press events, so a key is not handled twice on release
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Replacement and control characters leak in from escape sequences on focus changes
            if let KeyCode::Char(c) = key.code {
                if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD {
                    debug_log!("next_key() - Ignoring invalid character: {:?}", c);
                    continue;
                }
            }
            return Ok(key);
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self, dictionary: &Dictionary) {
        self.app.message = format!(
            "Loaded candidates={}, allowed={}. Press ? for help.",
            dictionary.candidates().len(),
            dictionary.allowed().len()
        );
        self.draw_or_log();
    }

    fn display_suggestions(&mut self, session: &Session, suggestion: &Suggestion) {
        self.app.sync(session, suggestion);
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Result<UserAction> {
        loop {
            if let Err(e) = self.draw() {
                log::warn!("failed to draw: {e}");
                return Ok(UserAction::Exit);
            }
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    log::warn!("failed to read terminal input: {e}");
                    return Ok(UserAction::Exit);
                }
            };
            if let Some(action) = self.app.handle_key(key) {
                info_log!("read_action() - {:?}", action);
                self.app.message.clear();
                return Ok(action);
            }
        }
    }

    fn display_candidates(&mut self, candidates: &[Word]) {
        if self.app.candidates_display.is_empty() {
            self.app.candidates_display = candidates.to_vec();
        } else {
            self.app.candidates_display.clear();
        }
        self.draw_or_log();
    }

    fn display_help(&mut self) {
        self.app.message = HELP_TEXT.to_string();
        self.draw_or_log();
    }

    fn display_error(&mut self, error: &SolverError) {
        self.app.error_message = error.to_string();
        self.draw_or_log();
    }

    fn display_solved(&mut self, round: &Round) {
        self.app.rows.push(GuessRow::from_round(round));
        merge_letter_states(&mut self.app.keyboard, round);
        self.app.state = TuiState::GameOver;
        self.app.message = format!("Solved: {}. Good game.", round.guess);
        self.app.status = format!("Game Over - Solution: {}", round.guess);
        if self.draw().is_err() {
            return;
        }
        // Hold the final board until the game-over state accepts a key
        loop {
            match self.next_key() {
                Ok(key) => {
                    if self.app.handle_key(key).is_some() {
                        break;
                    }
                }
                Err(e) => {
                    debug_log!("display_solved() - input error: {}", e);
                    break;
                }
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.app.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::DEFAULT_TOP_N;
    use crate::solver::GuessPool;

    fn press(app: &mut TuiApp, code: KeyCode) -> Option<UserAction> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut TuiApp, text: &str) -> Option<UserAction> {
        let mut last = None;
        for c in text.chars() {
            last = press(app, KeyCode::Char(c));
        }
        last
    }

    #[test]
    fn test_full_round_entry() {
        let mut app = TuiApp::new();
        assert_eq!(type_text(&mut app, "CRANE"), None);
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        assert_eq!(app.state, TuiState::MarkingFeedback { marking_index: 0 });

        assert_eq!(type_text(&mut app, "gybxG"), None);
        assert_eq!(app.state, TuiState::ConfirmingFeedback);

        let action = press(&mut app, KeyCode::Enter);
        assert_eq!(
            action,
            Some(UserAction::Submit(Round::parse("crane gybbg").unwrap()))
        );
        assert_eq!(app.state, TuiState::EnteringGuess);
        assert!(app.pending.is_none());
        assert!(app.current_input.is_empty());
    }

    #[test]
    fn test_short_guess_shows_error() {
        let mut app = TuiApp::new();
        type_text(&mut app, "cra");
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        assert_eq!(app.state, TuiState::EnteringGuess);
        assert!(!app.error_message.is_empty());
        // Extra letters past five are ignored
        type_text(&mut app, "nesss");
        assert_eq!(app.current_input, "crane");
    }

    #[test]
    fn test_backspace_steps_back_through_marking() {
        let mut app = TuiApp::new();
        type_text(&mut app, "slate");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "gg");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.state, TuiState::MarkingFeedback { marking_index: 1 });
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.state, TuiState::MarkingFeedback { marking_index: 0 });
        // One more leaves marking and restores the typed guess
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.state, TuiState::EnteringGuess);
        assert_eq!(app.current_input, "slate");
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_confirm_backspace_reopens_last_tile() {
        let mut app = TuiApp::new();
        type_text(&mut app, "slate");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "bbbbb");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.state, TuiState::MarkingFeedback { marking_index: 4 });
        type_text(&mut app, "y");
        let action = press(&mut app, KeyCode::Enter);
        assert_eq!(
            action,
            Some(UserAction::Submit(Round::parse("slate bbbby").unwrap()))
        );
    }

    #[test]
    fn test_invalid_feedback_key() {
        let mut app = TuiApp::new();
        type_text(&mut app, "slate");
        press(&mut app, KeyCode::Enter);
        assert_eq!(press(&mut app, KeyCode::Char('q')), None);
        assert_eq!(app.state, TuiState::MarkingFeedback { marking_index: 0 });
        assert!(app.error_message.contains("Invalid feedback"));
    }

    #[test]
    fn test_command_keys() {
        let mut app = TuiApp::new();
        app.top_n = 5;
        assert_eq!(press(&mut app, KeyCode::Char('-')), Some(UserAction::Undo));
        assert_eq!(press(&mut app, KeyCode::F(5)), Some(UserAction::Reset));
        assert_eq!(press(&mut app, KeyCode::Tab), Some(UserAction::List));
        assert_eq!(press(&mut app, KeyCode::Char('?')), Some(UserAction::Help));
        assert_eq!(press(&mut app, KeyCode::Char('+')), Some(UserAction::Top(6)));
        assert_eq!(press(&mut app, KeyCode::Char('_')), Some(UserAction::Top(4)));
        assert_eq!(press(&mut app, KeyCode::Esc), Some(UserAction::Exit));
        assert_eq!(press(&mut app, KeyCode::Char('3')), None);
        assert!(app.error_message.contains("'3'"));
    }

    #[test]
    fn test_modifier_keys_are_ignored() {
        let mut app = TuiApp::new();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(key), None);
        assert!(app.current_input.is_empty());
    }

    #[test]
    fn test_game_over_any_key_exits() {
        let mut app = TuiApp::new();
        app.state = TuiState::GameOver;
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), None);
        assert_eq!(press(&mut app, KeyCode::Char('x')), Some(UserAction::Exit));
    }

    #[test]
    fn test_letter_states_keep_best_feedback() {
        let rounds = [
            Round::parse("array bybgb").unwrap(),
            Round::parse("cigar ggggg").unwrap(),
        ];
        let states = letter_states(&rounds);
        // 'r' was gray and yellow in "array", then green in "cigar"
        assert_eq!(states[letter_index(b'r')], Some(Feedback::Correct));
        assert_eq!(states[letter_index(b'y')], Some(Feedback::Absent));
        assert_eq!(states[letter_index(b'z')], None);

        let states = letter_states(&rounds[..1]);
        assert_eq!(states[letter_index(b'r')], Some(Feedback::Present));
        assert_eq!(states[letter_index(b'a')], Some(Feedback::Correct));
    }

    #[test]
    fn test_sync_mirrors_session() {
        let words: Vec<Word> = ["cigar", "rebut", "humph"]
            .iter()
            .map(|s| Word::parse(s).unwrap())
            .collect();
        let dict = Dictionary::new(words, Vec::new());
        let mut session = Session::new(&dict, DEFAULT_TOP_N, GuessPool::Candidates).unwrap();
        session.push_round(Round::parse("cigar bbbbb").unwrap());

        let mut app = TuiApp::new();
        app.sync(&session, &session.suggest());
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.remaining, 1);
        assert_eq!(app.top_n, DEFAULT_TOP_N);
        assert_eq!(app.status, "Solution found: humph");
        assert_eq!(app.keyboard[letter_index(b'c')], Some(Feedback::Absent));

        session.reset();
        app.sync(&session, &session.suggest());
        assert!(app.rows.is_empty());
        assert_eq!(app.status, "3 candidates remaining");
    }
}
