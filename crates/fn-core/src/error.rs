use thiserror::Error;

/// Errors produced by the state stores and the wire codec.
///
/// The validation variants are rejected before any state mutation; a store
/// is never observed half-updated. `MalformedResponse` is the runtime
/// condition for a response payload that violates the wire contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Cell index outside the 81-cell board.
    #[error("cell index {0} is out of range (0..81)")]
    OutOfRange(usize),

    /// A board replacement that is not exactly 81 cells.
    #[error("board must have exactly 81 cells, got {0}")]
    InvalidShape(usize),

    /// A cell value outside 0..=9.
    #[error("cell value {0} is not a digit (0..=9)")]
    InvalidDigit(u8),

    /// A wire character outside '0'..='9'.
    #[error("invalid board character {0:?}")]
    InvalidChar(char),

    /// A minimum word length outside the offered set {3, 4}.
    #[error("minimum word length must be 3 or 4, got {0}")]
    InvalidOption(u8),

    /// A response whose payload does not match the wire contract.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
