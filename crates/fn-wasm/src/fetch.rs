//! Thin `fetch` wrappers returning deserialized JSON payloads.

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// POST `body` to `url` and decode the JSON response.
///
/// A non-success status resolves to an error carrying the response text,
/// so an application-level rejection (e.g. an unsolvable board) surfaces
/// with the server's own message.
pub async fn post_json<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    let window = web_sys::window().ok_or("no window")?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    if !response.ok() {
        let text = JsFuture::from(response.text()?).await?;
        return Err(text);
    }

    let payload = JsFuture::from(response.json()?).await?;
    serde_wasm_bindgen::from_value(payload).map_err(|e| JsValue::from_str(&e.to_string()))
}
