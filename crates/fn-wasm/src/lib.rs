//! Browser client for the Fn puzzle services.
//!
//! Each panel attaches to a container element, builds its own inputs, and
//! wires a document-level keydown listener. Enter submits the current state
//! to the service and the response replaces it in place. Listeners hold a
//! shared handle to the panel state, so they always observe the latest
//! board or query without any re-registration.
//!
//! The host page mounts one panel at a time (routing is the page's
//! concern, as the two panels both submit on Enter).

use wasm_bindgen::prelude::*;

mod fetch;
mod keys;
mod letters;
mod sudoku;

pub use letters::LettersPanel;
pub use sudoku::SudokuPanel;

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
