//! The letters-to-words panel.

use std::cell::RefCell;
use std::rc::Rc;

use fn_core::{LettersQuery, MinWordLen, RequestTracker, LETTERS_TO_WORDS_PATH};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, Document, Event, HtmlInputElement, HtmlSelectElement, KeyboardEvent};

use crate::fetch;
use crate::keys;

/// Panel state shared with the event listeners.
struct State {
    query: LettersQuery,
    words: Vec<String>,
    requests: RequestTracker,
}

/// The letters-to-words panel: a letters field, a minimum-word-size
/// selector offering 3 and 4, and a result list that is fully replaced by
/// each successful response.
#[wasm_bindgen]
pub struct LettersPanel {
    state: Rc<RefCell<State>>,
    document: Document,
    _edit_listeners: Vec<Closure<dyn FnMut(Event)>>,
    _key_listeners: Vec<Closure<dyn FnMut(KeyboardEvent)>>,
}

#[wasm_bindgen]
impl LettersPanel {
    /// Attach the panel to a container element, building its fields.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<LettersPanel, JsValue> {
        let document = web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or("container not found")?;

        let state = Rc::new(RefCell::new(State {
            query: LettersQuery::new(),
            words: Vec::new(),
            requests: RequestTracker::new(),
        }));

        let letters: HtmlInputElement = document.create_element("input")?.dyn_into()?;
        letters.set_id("letters");
        letters.set_placeholder("letters from which to generate words");
        container.append_child(&letters)?;

        let min: HtmlSelectElement = document.create_element("select")?.dyn_into()?;
        min.set_id("min-length");
        for value in ["3", "4"] {
            let option = document.create_element("option")?;
            option.set_attribute("value", value)?;
            option.set_text_content(Some(value));
            min.append_child(&option)?;
        }
        container.append_child(&min)?;

        let words = document.create_element("div")?;
        words.set_id("words");
        container.append_child(&words)?;

        let mut edit_listeners = Vec::new();

        // Mirror the letters field into the query store.
        let letters_state = state.clone();
        let on_letters = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(input) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            letters_state.borrow_mut().query.set_letters(input.value());
        });
        letters.add_event_listener_with_callback("input", on_letters.as_ref().unchecked_ref())?;
        edit_listeners.push(on_letters);

        // The selector only offers the two valid values; anything else is
        // rejected before it reaches the store.
        let min_state = state.clone();
        let on_min = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(select) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            else {
                return;
            };
            match select
                .value()
                .parse::<u8>()
                .map_err(|_| fn_core::Error::InvalidOption(0))
                .and_then(MinWordLen::try_from)
            {
                Ok(min) => min_state.borrow_mut().query.set_min(min),
                Err(err) => console::warn_1(&JsValue::from_str(&err.to_string())),
            }
        });
        min.add_event_listener_with_callback("change", on_min.as_ref().unchecked_ref())?;
        edit_listeners.push(on_min);

        let submit = submit_listener(&state, &document);
        document.add_event_listener_with_callback("keydown", submit.as_ref().unchecked_ref())?;

        Ok(LettersPanel {
            state,
            document,
            _edit_listeners: edit_listeners,
            _key_listeners: vec![submit],
        })
    }

    /// The current generated words.
    #[wasm_bindgen]
    pub fn words(&self) -> Vec<String> {
        self.state.borrow().words.clone()
    }

    /// Rewrite the result list from the store.
    #[wasm_bindgen]
    pub fn refresh(&self) {
        render_words(&self.document, &self.state.borrow().words);
    }
}

/// Build the Enter listener: snapshot the query and its sequence number at
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

        let (request, seq) = {
            let mut state = state.borrow_mut();
            let seq = state.requests.begin();
            (state.query.to_request(), seq)
        };
        let body = match serde_json::to_string(&request) {
            Ok(body) => body,
            Err(err) => {
                state.borrow_mut().requests.abandon(seq);
                console::error_1(&JsValue::from_str(&err.to_string()));
                return;
            }
        };

        let state = state.clone();
        let document = document.clone();
        spawn_local(async move {
            match fetch::post_json::<Vec<String>>(LETTERS_TO_WORDS_PATH, &body).await {
                Ok(words) => {
                    let apply = {
                        let mut state = state.borrow_mut();
                        let apply = state.requests.settle(seq);
                        if apply {
                            state.words = words;
                        }
                        apply
                    };
                    if apply {
                        render_words(&document, &state.borrow().words);
                    }
                }
                Err(err) => {
                    state.borrow_mut().requests.abandon(seq);
                    console::error_1(&err);
                }
            }
        });
    })
}

/// Replace the result list wholesale. A missing list element is a no-op.
fn render_words(document: &Document, words: &[String]) {
    let Some(list) = document.get_element_by_id("words") else {
        return;
    };
    list.set_inner_html("");
    for word in words {
        let Ok(item) = document.create_element("div") else {
            continue;
        };
        item.set_text_content(Some(word));
        let _ = list.append_child(&item);
    }
}
