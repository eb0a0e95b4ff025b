use serde::{Deserialize, Serialize};

/// One of the two sides. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Side to move for a given turn number: even turns are Black's.
    pub fn for_turn(turn_number: u32) -> Self {
        if turn_number % 2 == 0 {
            Player::Black
        } else {
            Player::White
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Numeric code used in the JS-facing snapshot.
    pub fn code(self) -> u8 {
        match self {
            Player::Black => PLAYER_BLACK,
            Player::White => PLAYER_WHITE,
        }
    }
}

pub const PLAYER_BLACK: u8 = 1;
pub const PLAYER_WHITE: u8 = 2;

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Single-character tag used by the run-length board encoding.
    pub fn tag(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Black => 'b',
            Cell::White => 'w',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            '-' => Some(Cell::Empty),
            'b' => Some(Cell::Black),
            'w' => Some(Cell::White),
            _ => None,
        }
    }

    /// 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => PLAYER_BLACK,
            Cell::White => PLAYER_WHITE,
        }
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Who is ahead on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// Piece counts and the side that leads them.
///
/// Only final once the game is over; before that it reports the current lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub black_count: usize,
    pub white_count: usize,
}

impl GameResult {
    pub fn from_counts(black_count: usize, white_count: usize) -> Self {
        let outcome = if black_count > white_count {
            Outcome::Winner(Player::Black)
        } else if white_count > black_count {
            Outcome::Winner(Player::White)
        } else {
            Outcome::Draw
        };
        Self {
            outcome,
            black_count,
            white_count,
        }
    }

    /// 1=black, 2=white, 0=draw.
    pub fn winner_code(&self) -> u8 {
        match self.outcome {
            Outcome::Winner(player) => player.code(),
            Outcome::Draw => 0,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.outcome {
            Outcome::Winner(Player::Black) => {
                write!(f, "Black wins with {} points", self.black_count)
            }
            Outcome::Winner(Player::White) => {
                write!(f, "White wins with {} points", self.white_count)
            }
            Outcome::Draw => write!(f, "Game was a draw"),
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub size: usize,
    /// Row-major cell codes: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub turn_number: u32,
    pub black_count: usize,
    pub white_count: usize,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: list of flipped positions.
    /// - Pass: must be an empty list.
    pub flipped: Vec<Position>,
}
