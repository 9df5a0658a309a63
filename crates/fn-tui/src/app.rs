use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fn_core::{next_focus, Board, LettersQuery, RequestTracker, SIDE};
use tracing::{debug, warn};

use crate::client::{ApiClient, ApiError, ApiEvent};
use crate::theme::Theme;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Which surface currently has input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Function index (landing screen)
    Home,
    /// The sudoku board editor
    Sudoku,
    /// The letters-to-words editor
    Letters,
}

/// One entry on the home screen
pub struct Function {
    pub name: &'static str,
    pub endpoint: &'static str,
    pub description: &'static str,
    pub screen: Screen,
}

/// The functions this client fronts, in home-screen order.
pub const FUNCTIONS: [Function; 2] = [
    Function {
        name: "sudoku",
        endpoint: "/api/sudoku-solver",
        description: "Given an unsolved board (0 for unsolved), returns a solution, if possible.",
        screen: Screen::Sudoku,
    },
    Function {
        name: "letters",
        endpoint: "/api/letters-to-words",
        description: "Given a set of letters, return a list of words that can be made from those letters.",
        screen: Screen::Letters,
    },
];

/// A status line entry
pub struct Message {
    pub text: String,
    pub error: bool,
}

/// The main application state
pub struct App {
    /// Active screen
    pub screen: Screen,
    /// Selected entry on the home screen
    pub home_selection: usize,
    /// The board store
    pub board: Board,
    /// Grid cursor, a flat cell index
    pub cursor: usize,
    /// The letters query store
    pub query: LettersQuery,
    /// Latest generated words; replaced wholesale per response
    pub words: Vec<String>,
    /// In-flight solve requests
    solve_requests: RequestTracker,
    /// In-flight words requests
    words_requests: RequestTracker,
    /// Color theme
    pub theme: Theme,
    /// Status line message
    pub message: Option<Message>,
    /// Message timer
    message_timer: u32,
    /// HTTP dispatcher
    client: ApiClient,
}

impl App {
    /// Create the app with an empty board and an empty query.
    pub fn new(client: ApiClient, theme: Theme) -> Self {
        Self {
            screen: Screen::Home,
            home_selection: 0,
            board: Board::empty(),
            cursor: 0,
            query: LettersQuery::new(),
            words: Vec::new(),
            solve_requests: RequestTracker::new(),
            words_requests: RequestTracker::new(),
            theme,
            message: None,
            message_timer: 0,
            client,
        }
    }

    /// Whether a solve request is in flight
    pub fn solving(&self) -> bool {
        self.solve_requests.is_pending()
    }

    /// Whether a words request is in flight
    pub fn generating(&self) -> bool {
        self.words_requests.is_pending()
    }

    /// Base URL of the API (for display)
    pub fn api_base(&self) -> &str {
        self.client.base()
    }

    /// Show a temporary status message
    pub fn show_message(&mut self, text: &str) {
        self.message = Some(Message {
            text: text.to_string(),
            error: false,
        });
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Show an error in the status line; stays up longer than an info
    /// message.
    pub fn show_error(&mut self, text: &str) {
        self.message = Some(Message {
            text: text.to_string(),
            error: true,
        });
        self.message_timer = 80;
    }

    /// Count down the message timer (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Sudoku => self.handle_sudoku_key(key),
            Screen::Letters => self.handle_letters_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                if self.home_selection > 0 {
                    self.home_selection -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.home_selection < FUNCTIONS.len() - 1 {
                    self.home_selection += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.screen = FUNCTIONS[self.home_selection].screen;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_sudoku_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Esc => self.screen = Screen::Home,

            // Submit the board as it stands at this keystroke.
            KeyCode::Enter => self.submit_board(),

            // Digit entry: set the cell under the cursor, then advance.
            KeyCode::Char(c @ '0'..='9') => self.enter_digit(c),

            // Clear the cell without advancing
            KeyCode::Backspace | KeyCode::Delete => {
                self.board = self
                    .board
                    .with_cell(self.cursor, 0)
                    .expect("cursor stays on the board");
            }

            // Clear the whole board
            KeyCode::Char('X') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.board = Board::empty();
                self.show_message("Board cleared");
            }

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            _ => {}
        }
        AppAction::Continue
    }

    fn handle_letters_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc => self.screen = Screen::Home,

            // Submit the query as it stands at this keystroke.
            KeyCode::Enter => self.submit_letters(),

            KeyCode::Backspace => self.query.pop_letter(),

            // Toggle the minimum word length between the offered values
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                let min = self.query.min().toggle();
                self.query.set_min(min);
            }

            // Letters only; 'q' types a letter here, quit via Esc
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                self.query.push_letter(c.to_ascii_lowercase());
            }

            _ => {}
        }
        AppAction::Continue
    }

    fn enter_digit(&mut self, c: char) {
        let digit = c.to_digit(10).expect("matched a digit key") as u8;
        self.board = self
            .board
            .with_cell(self.cursor, digit)
            .expect("cursor stays on the board");
        if let Some(next) = next_focus(c, self.cursor) {
            self.cursor = next;
        }
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let row = (Board::row(self.cursor) as i32 + row_delta).clamp(0, SIDE as i32 - 1);
        let col = (Board::col(self.cursor) as i32 + col_delta).clamp(0, SIDE as i32 - 1);
        self.cursor = Board::index(row as usize, col as usize);
    }

    fn submit_board(&mut self) {
        let seq = self.solve_requests.begin();
        // Board is a value type; this is the snapshot the request carries.
        self.client.solve(self.board, seq);
        self.show_message("Solving...");
    }

    fn submit_letters(&mut self) {
        let seq = self.words_requests.begin();
        self.client.generate(self.query.to_request(), seq);
        self.show_message("Generating...");
    }

    /// Apply a completion delivered by a dispatch worker.
    pub fn handle_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Solve { seq, result } => match result {
                Ok(board) => {
                    if self.solve_requests.settle(seq) {
                        self.board = board;
                        self.show_message("Solved");
                    } else {
                        debug!(seq, "discarding stale solve response");
                    }
                }
                Err(err) => self.fail_solve(seq, &err),
            },
            ApiEvent::Words { seq, result } => match result {
                Ok(words) => {
                    if self.words_requests.settle(seq) {
                        let count = words.len();
                        self.words = words;
                        self.show_message(&format!(
                            "{} word{}",
                            count,
                            if count == 1 { "" } else { "s" }
                        ));
                    } else {
                        debug!(seq, "discarding stale words response");
                    }
                }
                Err(err) => self.fail_words(seq, &err),
            },
        }
    }

    fn fail_solve(&mut self, seq: u64, err: &ApiError) {
        self.solve_requests.abandon(seq);
        warn!(seq, %err, "solve request failed");
        self.show_error(&format!("Solve failed: {err}"));
    }

    fn fail_words(&mut self, seq: u64, err: &ApiError) {
        self.words_requests.abandon(seq);
        warn!(seq, %err, "words request failed");
        self.show_error(&format!("Generate failed: {err}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{self, Receiver};

    fn test_app() -> (App, Receiver<ApiEvent>) {
        let (tx, rx) = mpsc::channel();
        let client = ApiClient::new("http://localhost:8000", tx);
        (App::new(client, Theme::dark()), rx)
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn home_opens_the_selected_function() {
        let (mut app, _rx) = test_app();
        assert_eq!(app.screen, Screen::Home);
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.screen, Screen::Sudoku);

        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.screen, Screen::Home);
        app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.screen, Screen::Letters);
    }

    #[test]
    fn digit_entry_sets_the_cell_and_advances() {
        let (mut app, _rx) = test_app();
        app.screen = Screen::Sudoku;
        app.handle_key(key('5'));
        assert_eq!(app.board.get(0), Some(5));
        assert_eq!(app.cursor, 1);
        app.handle_key(key('0'));
        assert_eq!(app.board.get(1), Some(0));
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn digit_entry_wraps_from_the_last_cell() {
        let (mut app, _rx) = test_app();
        app.screen = Screen::Sudoku;
        app.cursor = 80;
        app.handle_key(key('9'));
        assert_eq!(app.board.get(80), Some(9));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn arrow_movement_does_not_advance_like_a_digit() {
        let (mut app, _rx) = test_app();
        app.screen = Screen::Sudoku;
        app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(app.cursor, 9);
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        assert_eq!(app.cursor, 10);
        assert!(app.board.cells().iter().all(|&d| d == 0));
    }

    #[test]
    fn letters_screen_edits_the_query() {
        let (mut app, _rx) = test_app();
        app.screen = Screen::Letters;
        for c in ['a', 'c', 'T'] {
            app.handle_key(key(c));
        }
        assert_eq!(app.query.letters(), "act");
        app.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(app.query.letters(), "ac");
    }

    #[test]
    fn min_toggle_stays_in_the_offered_set() {
        let (mut app, _rx) = test_app();
        app.screen = Screen::Letters;
        for _ in 0..5 {
            app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
            assert!(matches!(app.query.min().as_u8(), 3 | 4));
        }
    }

    #[test]
    fn solve_response_replaces_the_board() {
        let (mut app, _rx) = test_app();
        app.board = app.board.with_cell(0, 5).unwrap();
        let seq = app.solve_requests.begin();

        let wire = "5".to_string() + &"0".repeat(80);
        let solved = Board::from_wire(&wire).unwrap();
        app.handle_api_event(ApiEvent::Solve {
            seq,
            result: Ok(solved),
        });
        assert_eq!(app.board, solved);
        assert!(!app.solving());
    }

    #[test]
    fn failed_solve_leaves_the_board_unchanged() {
        let (mut app, _rx) = test_app();
        let before = app.board;
        let seq = app.solve_requests.begin();
        let err = fn_core::SolveResponse {
            original: String::new(),
            solution: "5".repeat(79),
        }
        .board()
        .unwrap_err();
        app.handle_api_event(ApiEvent::Solve {
            seq,
            result: Err(ApiError::Malformed(err)),
        });
        assert_eq!(app.board, before);
        assert!(!app.solving());
        assert!(app.message.as_ref().is_some_and(|m| m.error));
    }

    #[test]
    fn later_issued_solve_wins_over_a_stale_arrival() {
        let (mut app, _rx) = test_app();
        let first = app.solve_requests.begin();
        let second = app.solve_requests.begin();

        let board_a = Board::from_wire(&("1".to_string() + &"0".repeat(80))).unwrap();
        let board_b = Board::from_wire(&("2".to_string() + &"0".repeat(80))).unwrap();

        // The later submission's response arrives first and wins.
        app.handle_api_event(ApiEvent::Solve {
            seq: second,
            result: Ok(board_b),
        });
        app.handle_api_event(ApiEvent::Solve {
            seq: first,
            result: Ok(board_a),
        });
        assert_eq!(app.board, board_b);
    }

    #[test]
    fn words_response_fully_replaces_the_list() {
        let (mut app, _rx) = test_app();
        app.words = vec!["old".to_string()];
        let seq = app.words_requests.begin();
        app.handle_api_event(ApiEvent::Words {
            seq,
            result: Ok(vec!["act".to_string(), "cat".to_string()]),
        });
        assert_eq!(app.words, vec!["act", "cat"]);

        let seq = app.words_requests.begin();
        app.handle_api_event(ApiEvent::Words {
            seq,
            result: Ok(Vec::new()),
        });
        assert!(app.words.is_empty());
    }

    #[test]
    fn failed_words_request_keeps_the_previous_list() {
        let (mut app, _rx) = test_app();
        app.words = vec!["act".to_string()];
        let seq = app.words_requests.begin();
        app.handle_api_event(ApiEvent::Words {
            seq,
            result: Err(ApiError::Malformed(fn_core::Error::MalformedResponse(
                "not a list".to_string(),
            ))),
        });
        assert_eq!(app.words, vec!["act"]);
        assert!(!app.generating());
    }

    #[test]
    fn message_expires_after_its_timer() {
        let (mut app, _rx) = test_app();
        app.show_message("hello");
        assert!(app.message.is_some());
        for _ in 0..30 {
            app.tick();
        }
        assert!(app.message.is_none());
    }
}
