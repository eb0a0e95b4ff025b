//! Text persistence for engine state.
//!
//! A board is written row-major as comma-separated runs of `<tag><count>`,
//! where the tag is `b`, `w` or `-`. The 4x4 opening reads
//! `-5,w1,b1,-2,b1,w1,-5`. The engine fragment of a save line is
//! `<turnNumber>;<size>;<board>`.

use tracing::warn;

use crate::board::{self, Board};
use crate::error::DecodeError;
use crate::types::Cell;

pub const FIELD_DELIMITER: char = ';';
pub const RUN_DELIMITER: char = ',';

/// Number of `;` fields in an engine fragment.
pub const FRAGMENT_FIELDS: usize = 3;

/// Run-length encodes the board in row-major order.
pub fn encode_board(board: &Board) -> String {
    let mut runs: Vec<(Cell, usize)> = Vec::new();
    for &cell in board.cells() {
        match runs.last_mut() {
            Some((tag, count)) if *tag == cell => *count += 1,
            _ => runs.push((cell, 1)),
        }
    }

    runs.iter()
        .map(|(cell, count)| format!("{}{}", cell.tag(), count))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes a run-length board string for a `size`x`size` board.
pub fn decode_board(size: usize, encoded: &str) -> Result<Board, DecodeError> {
    if !board::is_valid_size(size) {
        return Err(DecodeError::InvalidSize { size });
    }

    let expected = size * size;
    let mut cells = Vec::with_capacity(expected);
    let mut total = 0usize;

    for (index, token) in encoded.split(RUN_DELIMITER).enumerate() {
        let (cell, count) = parse_run(index, token.trim())?;
        total = total.saturating_add(count);
        if total > expected {
            // Keep scanning for malformed tokens but stop growing the grid.
            continue;
        }
        cells.extend(std::iter::repeat_n(cell, count));
    }

    if total != expected {
        warn!(expected, actual = total, "board run lengths do not fill the board");
        return Err(DecodeError::RunLengthMismatch {
            expected,
            actual: total,
        });
    }

    Ok(Board::from_cells(size, cells))
}

/// `<turnNumber>;<size>;<board>`.
pub fn encode_fragment(turn_number: u32, board: &Board) -> String {
    format!(
        "{turn_number}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}",
        board.size(),
        encode_board(board)
    )
}

/// Parses an engine fragment into its turn number and board.
pub fn decode_fragment(fragment: &str) -> Result<(u32, Board), DecodeError> {
    let fields: Vec<&str> = fragment.trim().split(FIELD_DELIMITER).collect();
    if fields.len() != FRAGMENT_FIELDS {
        return Err(DecodeError::FieldCount {
            expected: FRAGMENT_FIELDS,
            found: fields.len(),
        });
    }
    decode_fields(fields[0], fields[1], fields[2])
}

fn decode_fields(
    turn_number: &str,
    size: &str,
    board: &str,
) -> Result<(u32, Board), DecodeError> {
    let turn_number = parse_number("turnNumber", turn_number)?;
    let size = parse_number("size", size)?;
    let board = decode_board(size, board)?;
    Ok((turn_number, board))
}

/// Parses a non-negative decimal field. Signs and blanks are rejected.
pub(crate) fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    value: &str,
) -> Result<T, DecodeError> {
    let value = value.trim();
    let invalid = || DecodeError::InvalidNumber {
        field,
        value: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

fn parse_run(index: usize, token: &str) -> Result<(Cell, usize), DecodeError> {
    let mut chars = token.chars();
    let tag = chars.next().ok_or(DecodeError::MissingTag { index })?;
    let cell = Cell::from_tag(tag).ok_or(DecodeError::InvalidTag { index, tag })?;

    let count = chars.as_str();
    let invalid = || DecodeError::InvalidCount {
        index,
        count: count.to_string(),
    };
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let count = count.parse().map_err(|_| invalid())?;
    Ok((cell, count))
}
