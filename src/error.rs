//! Error types for the rules engine and its persistence format.

use derive_more::{Display, Error, From};

/// Everything a public engine or session call can fail with.
///
/// Illegal but well-formed moves are not errors; they are reported as a
/// `false` / `None` result by the placing call.
#[derive(Debug, Display, Error, From)]
pub enum ReversiError {
    /// Board dimension is odd, too small or too large.
    #[display("invalid board size {size}: must be an even number from 4 to {max}")]
    InvalidSize { size: usize, max: usize },

    /// Coordinate outside `[0, size)`.
    #[display("position ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: i64, col: i64, size: usize },

    /// Player name that cannot be written into a save line.
    #[display("{field} {value:?} must not contain `;`, `\\r` or `\\n`")]
    InvalidName { field: &'static str, value: String },

    /// Malformed or inconsistent persisted encoding.
    #[display("could not decode saved game: {_0}")]
    #[from]
    Decode(DecodeError),

    /// Reading or writing a save file failed.
    #[display("save file I/O failed: {_0}")]
    #[from]
    Io(std::io::Error),
}

/// Reasons a persisted game line or board string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DecodeError {
    #[display("expected {expected} `;`-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[display("field `{field}` is not a non-negative integer: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[display("board run #{index} is empty")]
    MissingTag { index: usize },

    #[display("board run #{index} has unknown cell tag {tag:?}")]
    InvalidTag { index: usize, tag: char },

    #[display("board run #{index} has invalid count {count:?}")]
    InvalidCount { index: usize, count: String },

    #[display("board runs cover {actual} cells, expected {expected}")]
    RunLengthMismatch { expected: usize, actual: usize },

    #[display("saved board size {size} is not a playable size")]
    InvalidSize { size: usize },
}

pub type Result<T> = std::result::Result<T, ReversiError>;
