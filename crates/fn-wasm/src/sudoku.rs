//! The sudoku board panel.

use std::cell::RefCell;
use std::rc::Rc;

use fn_core::{next_focus, Board, RequestTracker, SolveResponse, CELLS, SUDOKU_SOLVER_PATH};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, Document, Event, HtmlInputElement, KeyboardEvent};

use crate::fetch;
use crate::keys;

/// DOM id of the input for a cell index.
fn cell_id(index: usize) -> String {
    format!("item-{}", index)
}

/// Panel state shared with the event listeners. Listeners hold an `Rc`
/// handle, so they always read the latest board; nothing is re-registered
/// when state changes.
struct State {
    board: Board,
    requests: RequestTracker,
}

/// The sudoku board panel: 81 single-digit inputs plus a document-level
/// keydown listener that submits the board on Enter.
///
/// Typing a digit fills the cell and advances focus to the next cell,
/// wrapping from the last cell to the first. Enter posts the board as it
/// stands at that keystroke; the solved board replaces the inputs when the
/// response arrives. Overlapping submissions are allowed and arbitrated by
/// sequence number, so a stale response never overwrites a newer one.
#[wasm_bindgen]
pub struct SudokuPanel {
    state: Rc<RefCell<State>>,
    document: Document,
    // Listeners live exactly as long as the panel.
    _edit_listeners: Vec<Closure<dyn FnMut(Event)>>,
    _key_listeners: Vec<Closure<dyn FnMut(KeyboardEvent)>>,
}

#[wasm_bindgen]
impl SudokuPanel {
    /// Attach the panel to a container element, building the cell inputs.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<SudokuPanel, JsValue> {
        let document = web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or("container not found")?;

        let state = Rc::new(RefCell::new(State {
            board: Board::empty(),
            requests: RequestTracker::new(),
        }));

        let mut edit_listeners = Vec::with_capacity(CELLS);
        let mut key_listeners = Vec::with_capacity(CELLS + 1);

        for index in 0..CELLS {
            let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
            input.set_id(&cell_id(index));
            input.set_max_length(1);
            input.set_value("0");
            container.append_child(&input)?;

            // Mirror edits into the board store.
            let edit_state = state.clone();
            let edit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(input) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                let digit = input
                    .value()
                    .chars()
                    .last()
                    .and_then(|c| c.to_digit(10))
                    .unwrap_or(0) as u8;
                let mut state = edit_state.borrow_mut();
                match state.board.with_cell(index, digit) {
                    Ok(board) => state.board = board,
                    Err(err) => console::warn_1(&JsValue::from_str(&err.to_string())),
                }
            });
            input.add_event_listener_with_callback("input", edit.as_ref().unchecked_ref())?;
            edit_listeners.push(edit);

            // Advance focus after a digit key, wrapping 80 -> 0.
            let advance_document = document.clone();
            let advance = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                let Some(digit) = keys::digit_for(&event.code()) else {
                    return;
                };
                let Some(target) = next_focus(digit, index) else {
                    return;
                };
                focus_cell(&advance_document, target);
            });
            input.add_event_listener_with_callback("keyup", advance.as_ref().unchecked_ref())?;
            key_listeners.push(advance);
        }

        let submit = submit_listener(&state, &document);
        document.add_event_listener_with_callback("keydown", submit.as_ref().unchecked_ref())?;
        key_listeners.push(submit);

        Ok(SudokuPanel {
            state,
            document,
            _edit_listeners: edit_listeners,
            _key_listeners: key_listeners,
        })
    }

    /// The board in wire form (81 digit characters).
    #[wasm_bindgen]
    pub fn board_wire(&self) -> String {
        self.state.borrow().board.to_wire()
    }

    /// Rewrite every mounted cell input from the board store.
    #[wasm_bindgen]
    pub fn refresh(&self) {
        refresh_cells(&self.document, &self.state.borrow().board);
    }
}

/// Build the Enter listener: snapshot the board and its sequence number at
/// the keystroke, then resolve the request asynchronously.
fn submit_listener(
    state: &Rc<RefCell<State>>,
    document: &Document,
) -> Closure<dyn FnMut(KeyboardEvent)> {
    let state = state.clone();
    let document = document.clone();
    Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if !keys::is_submit(&event.code()) {
            return;
        }
        event.prevent_default();

        // Snapshot now, not when the future first runs.
        let (wire, seq) = {
            let mut state = state.borrow_mut();
            let seq = state.requests.begin();
            (state.board.to_wire(), seq)
        };

        let state = state.clone();
        let document = document.clone();
        spawn_local(async move {
            match fetch::post_json::<SolveResponse>(SUDOKU_SOLVER_PATH, &wire).await {
                Ok(response) => match response.board() {
                    Ok(board) => {
                        let apply = {
                            let mut state = state.borrow_mut();
                            let apply = state.requests.settle(seq);
                            if apply {
                                state.board = board;
                            }
                            apply
                        };
                        if apply {
                            refresh_cells(&document, &board);
                        }
                    }
                    Err(err) => {
                        state.borrow_mut().requests.abandon(seq);
                        console::error_1(&JsValue::from_str(&err.to_string()));
                    }
                },
                Err(err) => {
                    state.borrow_mut().requests.abandon(seq);
                    console::error_1(&err);
                }
            }
        });
    })
}

/// Move focus to a cell and select its content so the next digit
/// overwrites it. A cell that is not currently mounted is a no-op.
fn focus_cell(document: &Document, index: usize) {
    let Some(input) = document
        .get_element_by_id(&cell_id(index))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let _ = input.focus();
    input.select();
}

/// Rewrite every mounted cell input from a board. Unmounted cells are
/// skipped.
fn refresh_cells(document: &Document, board: &Board) {
    for index in 0..CELLS {
        let Some(input) = document
            .get_element_by_id(&cell_id(index))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };
        let digit = board.get(index).unwrap_or(0);
        input.set_value(&digit.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_ids_use_the_item_prefix() {
        assert_eq!(cell_id(0), "item-0");
        assert_eq!(cell_id(80), "item-80");
    }
}
