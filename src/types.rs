use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::board::BOARD_SIZE;
use crate::error::PositionError;

/// Wire code for an empty cell, a missing player or a tie.
pub const CODE_NONE: u8 = 0;
pub const CODE_BLACK: u8 = 1;
pub const CODE_WHITE: u8 = 2;

/// One of the two sides. An empty cell or "no player" is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Player::Black => CODE_BLACK,
            Player::White => CODE_WHITE,
        }
    }

    /// Decodes a wire code; `0` and unknown values map to `None`.
    pub fn from_code(code: u8) -> Option<Player> {
        match code {
            CODE_BLACK => Some(Player::Black),
            CODE_WHITE => Some(Player::White),
            _ => None,
        }
    }
}

/// Wire code for an optional player (`0` when absent).
pub fn player_code(player: Option<Player>) -> u8 {
    player.map_or(CODE_NONE, Player::code)
}

/// A board coordinate, always inside the 8x8 grid.
///
/// Ordering is row-major, so sorted collections of positions scan the
/// board the same way [`crate::Board::occupied_positions`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Result<Self, PositionError> {
        if !in_bounds(row, col) {
            return Err(PositionError::OutOfBounds { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Converts a row-major square index. Caller guarantees `index < 64`.
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < BOARD_SIZE * BOARD_SIZE);
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major square index in `0..64`.
    pub fn index(self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }

    /// Steps one cell along `(dr, dc)`, or `None` past the edge.
    pub(crate) fn offset(self, dr: i32, dc: i32) -> Option<Self> {
        Self::new(self.row as i32 + dr, self.col as i32 + dc).ok()
    }
}

pub(crate) fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

/// Algebraic notation: column letter then 1-based row, e.g. `d3` = (2, 3).
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PositionError::InvalidNotation(s.to_string());
        let mut chars = s.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let col = match file.to_ascii_lowercase() {
            c @ 'a'..='h' => c as i32 - 'a' as i32,
            _ => return Err(invalid()),
        };
        let row = match rank {
            r @ '1'..='8' => r as i32 - '1' as i32,
            _ => return Err(invalid()),
        };

        Position::new(row, col)
    }
}

/// Disc tally per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiscCount {
    pub black: u8,
    pub white: u8,
}

impl DiscCount {
    pub fn get(&self, player: Player) -> u8 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    pub(crate) fn get_mut(&mut self, player: Player) -> &mut u8 {
        match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        }
    }

    pub fn total(&self) -> u8 {
        self.black + self.white
    }
}

/// Legal moves for one side: empty target cell -> opponent discs it flips.
pub type LegalMoves = BTreeMap<Position, Vec<Position>>;

/// Record of an accepted move, handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveInfo {
    pub player: Player,
    pub position: Position,
    pub outflanked: Vec<Position>,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameOutcome {
    Winner(Player),
    Tie,
}

/// Public game state handed to host layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// 64 cells, row-major: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    /// `0` once the game is over.
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `0` while the game is running or when it ended in a tie.
    /// - `1`/`2` for the side with strictly more discs at the end.
    pub winner: u8,
    pub legal_moves: Vec<Position>,
}
