//! HTTP dispatch for the two service endpoints.
//!
//! The event loop never blocks: each submission runs on a worker thread
//! with a cloned blocking client, and the completion comes back over a
//! channel tagged with its sequence number. Workers never touch state;
//! the loop applies completions through the stores, arbitrating between
//! overlapping requests with [`fn_core::RequestTracker`].

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use fn_core::{Board, SolveResponse, WordsRequest, LETTERS_TO_WORDS_PATH, SUDOKU_SOLVER_PATH};
use thiserror::Error;
use tracing::debug;

/// A dispatch failure. The pending request ends here; prior state is
/// never touched by a failed completion.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection, DNS, timeout, body decode.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the request, e.g. an unsolvable board.
    #[error("{status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response arrived but its payload violates the wire contract.
    #[error(transparent)]
    Malformed(#[from] fn_core::Error),
}

/// A completion delivered back to the event loop.
#[derive(Debug)]
pub enum ApiEvent {
    /// A solve request finished.
    Solve {
        seq: u64,
        result: Result<Board, ApiError>,
    },
    /// A words request finished.
    Words {
        seq: u64,
        result: Result<Vec<String>, ApiError>,
    },
}

/// Client for the Fn service API.
#[derive(Clone)]
pub struct ApiClient {
    base: String,
    http: reqwest::blocking::Client,
    tx: Sender<ApiEvent>,
}

impl ApiClient {
    /// Create a client for the API at `base`, delivering completions on
    /// `tx`.
    pub fn new(base: &str, tx: Sender<ApiEvent>) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("default HTTP client configuration is valid"),
            tx,
        }
    }

    /// Base URL of the API (for display).
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Submit a board snapshot to the solver. Returns immediately; the
    /// completion arrives later as an [`ApiEvent::Solve`] tagged with
    /// `seq`. The snapshot decouples the request from edits made while it
    /// is in flight.
    pub fn solve(&self, board: Board, seq: u64) {
        let url = format!("{}{}", self.base, SUDOKU_SOLVER_PATH);
        let http = self.http.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            debug!(seq, %url, "dispatching solve request");
            let result = post_solve(&http, &url, board.to_wire());
            // The loop may already be gone during shutdown.
            let _ = tx.send(ApiEvent::Solve { seq, result });
        });
    }

    /// Submit a words request snapshot to the generator.
    pub fn generate(&self, request: WordsRequest, seq: u64) {
        let url = format!("{}{}", self.base, LETTERS_TO_WORDS_PATH);
        let http = self.http.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            debug!(seq, %url, "dispatching words request");
            let result = post_words(&http, &url, &request);
            let _ = tx.send(ApiEvent::Words { seq, result });
        });
    }
}

fn post_solve(
    http: &reqwest::blocking::Client,
    url: &str,
    body: String,
) -> Result<Board, ApiError> {
    let response = http.post(url).body(body).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Rejected {
            status,
            body: response.text().unwrap_or_default(),
        });
    }
    let payload: SolveResponse = response.json()?;
    Ok(payload.board()?)
}

fn post_words(
    http: &reqwest::blocking::Client,
    url: &str,
    request: &WordsRequest,
) -> Result<Vec<String>, ApiError> {
    let response = http.post(url).json(request).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Rejected {
            status,
            body: response.text().unwrap_or_default(),
        });
    }
    Ok(response.json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn base_url_is_normalized() {
        let (tx, _rx) = mpsc::channel();
        let client = ApiClient::new("http://localhost:8000/", tx);
        assert_eq!(client.base(), "http://localhost:8000");
    }

    #[test]
    fn malformed_payload_maps_to_malformed_error() {
        let response = SolveResponse {
            original: String::new(),
            solution: "123".to_string(),
        };
        let err = ApiError::from(response.board().unwrap_err());
        assert!(matches!(err, ApiError::Malformed(_)));
    }
}
