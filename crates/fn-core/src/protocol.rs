//! Request and response bodies for the two service endpoints.
//!
//! The solver takes the board as a bare 81-character digit string and
//! answers with JSON; the word generator takes and returns JSON. Both are
//! reached by POST under `/api`.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::Error;

/// Path of the sudoku solver endpoint.
pub const SUDOKU_SOLVER_PATH: &str = "/api/sudoku-solver";
/// Path of the letters-to-words endpoint.
pub const LETTERS_TO_WORDS_PATH: &str = "/api/letters-to-words";

/// Body of a letters-to-words request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordsRequest {
    /// Letters from which to generate words.
    pub letters: String,
    /// Minimum length of each generated word.
    pub min: u8,
}

/// Response of the sudoku solver: the submitted board and its solution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolveResponse {
    /// The board as submitted, echoed back by the server.
    #[serde(default)]
    pub original: String,
    /// The fully solved board, 81 digit characters.
    pub solution: String,
}

impl SolveResponse {
    /// Validate the solution payload into a board.
    ///
    /// The solution must be a full 81-cell wire string; anything else is a
    /// malformed response and must never reach the board store.
    pub fn board(&self) -> Result<Board, Error> {
        Board::from_wire(&self.solution).map_err(|e| Error::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_request_serializes_as_a_json_object() {
        let request = WordsRequest {
            letters: "act".to_string(),
            min: 3,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "letters": "act", "min": 3 }));
    }

    #[test]
    fn solve_response_parses_the_server_shape() {
        let body = format!(
            r#"{{"original":"{}","solution":"{}"}}"#,
            "0".repeat(81),
            "5".repeat(81)
        );
        let response: SolveResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(response.original, "0".repeat(81));
        assert_eq!(response.board().unwrap().to_wire(), "5".repeat(81));
    }

    #[test]
    fn solve_response_tolerates_a_missing_original() {
        let body = format!(r#"{{"solution":"{}"}}"#, "1".repeat(81));
        let response: SolveResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(response.original, "");
        assert!(response.board().is_ok());
    }

    #[test]
    fn short_solution_is_malformed() {
        let response = SolveResponse {
            original: String::new(),
            solution: "5".repeat(79),
        };
        assert!(matches!(
            response.board(),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn non_digit_solution_is_malformed() {
        let response = SolveResponse {
            original: String::new(),
            solution: "x".repeat(81),
        };
        assert!(matches!(
            response.board(),
            Err(Error::MalformedResponse(_))
        ));
    }
}
