use std::fmt;

use crate::error::{ReversiError, Result};
use crate::types::{Cell, Player, Position};

pub const DEFAULT_BOARD_SIZE: usize = 8;
pub const MIN_BOARD_SIZE: usize = 4;
pub const MAX_BOARD_SIZE: usize = 256;

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Square Reversi board stored as a row-major cell grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the opening position for a `size`x`size` board.
    ///
    /// With `m = size / 2`: (m-1,m-1)=white, (m-1,m)=black, (m,m-1)=black,
    /// (m,m)=white.
    pub fn new(size: usize) -> Result<Self> {
        validate_size(size)?;
        Ok(Self::seeded(size))
    }

    fn seeded(size: usize) -> Self {
        let mut cells = vec![Cell::Empty; size * size];
        let m = size / 2;
        cells[(m - 1) * size + (m - 1)] = Cell::White;
        cells[(m - 1) * size + m] = Cell::Black;
        cells[m * size + (m - 1)] = Cell::Black;
        cells[m * size + m] = Cell::White;
        Self { size, cells }
    }

    /// Builds a board from row-major cells. The caller has already checked
    /// that `size` is valid and `cells.len() == size * size`.
    pub(crate) fn from_cells(size: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns `None` for coordinates off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Returns every empty position where `player` would capture, row-major.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        (0..self.cells.len())
            .filter(|&idx| !self.collect_flips(idx, player).is_empty())
            .map(|idx| self.position_of(idx))
            .collect()
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        (0..self.cells.len()).any(|idx| !self.collect_flips(idx, player).is_empty())
    }

    /// Places one piece and flips captured pieces.
    /// Returns the flipped positions, or `None` (board untouched) when the
    /// move is off the board, occupied, or captures nothing.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Option<Vec<Position>> {
        if row >= self.size || col >= self.size {
            return None;
        }

        let idx = row * self.size + col;
        let flips = self.collect_flips(idx, player);
        if flips.is_empty() {
            return None;
        }

        let me = Cell::from(player);
        for &flip in &flips {
            self.cells[flip] = me;
        }
        self.cells[idx] = me;

        Some(flips.into_iter().map(|flip| self.position_of(flip)).collect())
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(black, white), cell| match cell.owner() {
                Some(Player::Black) => (black + 1, white),
                Some(Player::White) => (black, white + 1),
                None => (black, white),
            })
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> usize {
        let (black_count, white_count) = self.count();
        self.cells.len() - black_count - white_count
    }

    /// Converts board to row-major codes where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.code()).collect()
    }

    /// Opponent cells that a move at `idx` would flip, across all capturing
    /// directions. Empty when the move is illegal.
    fn collect_flips(&self, idx: usize, player: Player) -> Vec<usize> {
        if self.cells[idx] != Cell::Empty {
            return Vec::new();
        }

        let me = Cell::from(player);
        let opp = Cell::from(player.opponent());
        let (row, col) = (idx / self.size, idx % self.size);
        let mut flips = Vec::new();

        for (dr, dc) in DIRECTIONS {
            let mut line = Vec::new();
            let mut r = row as isize + dr;
            let mut c = col as isize + dc;

            while let Some(square) = self.index_of(r, c) {
                let cell = self.cells[square];
                if cell == opp {
                    line.push(square);
                } else {
                    if cell == me {
                        flips.append(&mut line);
                    }
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }

    fn index_of(&self, row: isize, col: isize) -> Option<usize> {
        let size = self.size as isize;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(row as usize * self.size + col as usize)
        } else {
            None
        }
    }

    fn position_of(&self, idx: usize) -> Position {
        Position::new(idx / self.size, idx % self.size)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::seeded(DEFAULT_BOARD_SIZE)
    }
}

/// One line per row, cells as space-separated `b`, `w` or `-`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: Vec<String> = row.iter().map(|cell| cell.tag().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Accepts even sizes from `MIN_BOARD_SIZE` to `MAX_BOARD_SIZE`.
pub fn validate_size(size: usize) -> Result<()> {
    if is_valid_size(size) {
        Ok(())
    } else {
        Err(ReversiError::InvalidSize {
            size,
            max: MAX_BOARD_SIZE,
        })
    }
}

pub fn is_valid_size(size: usize) -> bool {
    size % 2 == 0 && (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells_from(rows: &[&str]) -> Board {
        let size = rows.len();
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|tag| Cell::from_tag(tag).unwrap())
            .collect();
        Board::from_cells(size, cells)
    }

    #[test]
    fn initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::default();

        let expected = vec![
            Position::new(2, 3),
            Position::new(3, 2),
            Position::new(4, 5),
            Position::new(5, 4),
        ];

        assert_eq!(board.legal_moves(Player::Black), expected);
    }

    #[test]
    fn default_board_matches_seeded_eight_by_eight() {
        assert_eq!(Board::default(), Board::new(8).unwrap());
    }

    #[test]
    fn new_rejects_odd_and_tiny_sizes() {
        for size in [0, 1, 2, 3, 5, 9, MAX_BOARD_SIZE + 2] {
            assert!(
                matches!(Board::new(size), Err(ReversiError::InvalidSize { .. })),
                "size {size} should be rejected"
            );
        }
        assert!(Board::new(4).is_ok());
        assert!(Board::new(MAX_BOARD_SIZE).is_ok());
    }

    #[test]
    fn place_flips_opponent_stones_and_updates_counts() {
        let mut board = Board::default();

        let flips = board.place(2, 3, Player::Black).unwrap();

        assert_eq!(flips, vec![Position::new(3, 3)]);
        assert_eq!(board.count(), (4, 1));
        assert_eq!(board.empty_count(), 59);

        assert_eq!(board.get(2, 3), Some(Cell::Black));
        assert_eq!(board.get(3, 3), Some(Cell::Black));
        assert_eq!(board.get(3, 4), Some(Cell::Black));
        assert_eq!(board.get(4, 3), Some(Cell::Black));
        assert_eq!(board.get(4, 4), Some(Cell::White));
    }

    #[test]
    fn illegal_place_returns_none_and_keeps_board_unchanged() {
        let mut board = Board::default();
        let before = board.clone();

        assert_eq!(board.place(0, 0, Player::Black), None);
        assert_eq!(board.place(3, 3, Player::Black), None);
        assert_eq!(board.place(8, 0, Player::Black), None);
        assert_eq!(board, before);
    }

    #[test]
    fn only_runs_closed_by_own_piece_capture() {
        let mut board = cells_from(&[
            "b--b", //
            "ww-w", //
            "-wwb", //
            "b---",
        ]);

        // Only the down-left run closes on a black piece; the others run off
        // the board, hit an empty cell, or start next to black.
        let flips = board.place(1, 2, Player::Black).unwrap();

        assert_eq!(flips, vec![Position::new(2, 1)]);
        assert_eq!(board.get(1, 2), Some(Cell::Black));
        assert_eq!(board.get(1, 1), Some(Cell::White));
        assert_eq!(board.get(2, 2), Some(Cell::White));
    }

    #[test]
    fn captures_in_three_directions_at_once() {
        let mut board = cells_from(&[
            "-wb-", //
            "ww--", //
            "b-b-", //
            "----",
        ]);

        let flips = board.place(0, 0, Player::Black).unwrap();

        assert_eq!(
            flips,
            vec![Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
        );
        assert_eq!(board, cells_from(&["bbb-", "bb--", "b-b-", "----"]));
    }

    #[test]
    fn long_run_flips_every_cell_up_to_own_piece() {
        let mut board = cells_from(&[
            "-wwwb-", //
            "------", //
            "------", //
            "------", //
            "------", //
            "------",
        ]);

        let flips = board.place(0, 0, Player::Black).unwrap();

        assert_eq!(
            flips,
            vec![Position::new(0, 1), Position::new(0, 2), Position::new(0, 3)]
        );
        assert_eq!(board.count(), (5, 0));
    }

    #[test]
    fn display_prints_one_row_per_line() {
        let board = Board::new(4).unwrap();

        assert_eq!(board.to_string(), "- - - -\n- w b -\n- b w -\n- - - -\n");
    }

    #[test]
    fn full_board_has_no_legal_moves() {
        let board = cells_from(&["bwbw", "wbwb", "bwbw", "wbwb"]);

        assert!(!board.has_legal_move(Player::Black));
        assert!(!board.has_legal_move(Player::White));
        assert_eq!(board.empty_count(), 0);
    }
}
