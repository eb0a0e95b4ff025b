use std::fmt;

use tracing::{debug, instrument};

use crate::board::Board;
use crate::codec;
use crate::error::{ReversiError, Result};
use crate::types::{Cell, GameResult, Player, Position};

/// Rules engine for one game of Reversi.
///
/// The side to move is never stored: it is always `Player::for_turn`
/// of the turn counter, and piece counts are always read off the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    turn_number: u32,
}

impl GameEngine {
    /// Starts a game on a `size`x`size` board with the standard opening.
    #[instrument]
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self {
            board: Board::new(size)?,
            turn_number: 0,
        })
    }

    /// Rebuilds a game from a saved turn number, size and run-length board.
    #[instrument(skip(board_string))]
    pub fn from_encoding(turn_number: u32, size: usize, board_string: &str) -> Result<Self> {
        let board = codec::decode_board(size, board_string)?;
        Ok(Self { board, turn_number })
    }

    /// Parses the `<turnNumber>;<size>;<board>` fragment of a save line.
    pub fn from_fragment(fragment: &str) -> Result<Self> {
        let (turn_number, board) = codec::decode_fragment(fragment)?;
        Ok(Self { board, turn_number })
    }

    /// Returns the `<turnNumber>;<size>;<board>` fragment of a save line.
    pub fn to_encoding_fragment(&self) -> String {
        codec::encode_fragment(self.turn_number, &self.board)
    }

    pub fn piece_at(&self, row: i32, col: i32) -> Result<Cell> {
        let (r, c) = self.checked_coords(row, col)?;
        self.board
            .get(r, c)
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_size(&self) -> usize {
        self.board.size()
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn current_player(&self) -> Player {
        Player::for_turn(self.turn_number)
    }

    pub fn black_count(&self) -> usize {
        self.board.count().0
    }

    pub fn white_count(&self) -> usize {
        self.board.count().1
    }

    pub fn empty_count(&self) -> usize {
        self.board.empty_count()
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        self.board.has_legal_move(player)
    }

    /// Legal positions for the side to move, row-major.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.board.legal_moves(self.current_player())
    }

    pub fn is_game_over(&self) -> bool {
        !self.has_legal_move(Player::Black) && !self.has_legal_move(Player::White)
    }

    /// Current counts and the side leading them.
    pub fn winner(&self) -> GameResult {
        let (black_count, white_count) = self.board.count();
        GameResult::from_counts(black_count, white_count)
    }

    /// Places the current player's piece. Returns `false` and leaves the
    /// game untouched when the move is off the board, occupied, or captures
    /// nothing.
    pub fn place_piece(&mut self, row: i32, col: i32) -> bool {
        self.try_place(row, col).is_some()
    }

    /// Like [`place_piece`](Self::place_piece), but returns the flipped
    /// positions of an accepted move.
    #[instrument(skip(self), fields(player = %self.current_player(), turn = self.turn_number))]
    pub fn try_place(&mut self, row: i32, col: i32) -> Option<Vec<Position>> {
        let (row, col) = self.checked_coords(row, col).ok()?;
        let player = self.current_player();

        let flipped = self.board.place(row, col, player)?;
        self.advance_turn();

        debug!(flips = flipped.len(), "move accepted");
        Some(flipped)
    }

    /// Hands the turn to the other player without placing a piece.
    #[instrument(skip(self), fields(player = %self.current_player(), turn = self.turn_number))]
    pub fn skip_turn(&mut self) {
        self.advance_turn();
        debug!("turn skipped");
    }

    /// `u32::MAX` is odd, so wrapping to 0 still alternates the player.
    fn advance_turn(&mut self) {
        self.turn_number = self.turn_number.wrapping_add(1);
    }

    fn checked_coords(&self, row: i32, col: i32) -> Result<(usize, usize)> {
        let size = self.board.size();
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) if r < size && c < size => Ok((r, c)),
            _ => Err(self.out_of_bounds(row, col)),
        }
    }

    fn out_of_bounds(&self, row: i32, col: i32) -> ReversiError {
        ReversiError::OutOfBounds {
            row: row.into(),
            col: col.into(),
            size: self.board.size(),
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, turn_number: u32) {
        self.board = board;
        self.turn_number = turn_number;
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self {
            board: Board::default(),
            turn_number: 0,
        }
    }
}

impl fmt::Display for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_encoding_fragment())
    }
}
