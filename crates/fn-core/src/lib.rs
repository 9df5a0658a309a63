//! Client-side state for the Fn puzzle services.
//!
//! Pure state and wire types shared by the terminal and browser surfaces:
//! the 81-cell board store, the letters query store, keystroke focus
//! navigation, the request/response bodies for the two endpoints, and
//! sequence-numbered bookkeeping for overlapping submissions. Nothing in
//! this crate performs I/O; the surfaces own the transports.

pub mod board;
pub mod dispatch;
pub mod error;
pub mod focus;
pub mod protocol;
pub mod query;

pub use board::{Board, CELLS, SIDE};
pub use dispatch::RequestTracker;
pub use error::Error;
pub use focus::next_focus;
pub use protocol::{SolveResponse, WordsRequest, LETTERS_TO_WORDS_PATH, SUDOKU_SOLVER_PATH};
pub use query::{LettersQuery, MinWordLen};
