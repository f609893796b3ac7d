use std::str::FromStr;

use crate::error::ParseBoardError;
use crate::types::{LegalMoves, Player, Position, player_code};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 8x8 grid, row-major. `None` is an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Player>; NUM_SQUARES],
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.cells[27] = Some(Player::White);
        board.cells[28] = Some(Player::Black);
        board.cells[35] = Some(Player::Black);
        board.cells[36] = Some(Player::White);
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
        }
    }

    pub fn get(&self, pos: Position) -> Option<Player> {
        self.cells[pos.index()]
    }

    pub fn set(&mut self, pos: Position, player: Option<Player>) {
        self.cells[pos.index()] = player;
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Number of discs `player` has on the board.
    pub fn count(&self, player: Player) -> u8 {
        self.cells.iter().filter(|&&cell| cell == Some(player)).count() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        self.cells.iter().filter(|cell| cell.is_none()).count() as u8
    }

    /// Every non-empty cell, row-major. Lazy; call again to restart.
    pub fn occupied_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_some())
            .map(|(idx, _)| Position::from_index(idx))
    }

    /// Opponent discs `player` would flip along one direction from `pos`.
    ///
    /// The run only counts when it closes on one of `player`'s discs; hitting
    /// an empty cell or the edge first yields nothing.
    pub fn outflanked_in_dir(&self, pos: Position, player: Player, dr: i32, dc: i32) -> Vec<Position> {
        let opp = player.opponent();
        let mut line = Vec::new();
        let mut cursor = pos.offset(dr, dc);

        while let Some(square) = cursor {
            match self.get(square) {
                Some(p) if p == opp => line.push(square),
                Some(_) => return line,
                None => break,
            }
            cursor = square.offset(dr, dc);
        }

        Vec::new()
    }

    /// Union of [`Self::outflanked_in_dir`] over all eight directions.
    pub fn outflanked(&self, pos: Position, player: Player) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .flat_map(|&(dr, dc)| self.outflanked_in_dir(pos, player, dr, dc))
            .collect()
    }

    /// Every empty cell that flips at least one disc for `player`.
    pub fn legal_moves(&self, player: Player) -> LegalMoves {
        let mut legal = LegalMoves::new();

        for idx in 0..NUM_SQUARES {
            let pos = Position::from_index(idx);
            if !self.is_empty_at(pos) {
                continue;
            }
            let flips = self.outflanked(pos, player);
            if !flips.is_empty() {
                legal.insert(pos, flips);
            }
        }

        legal
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        (0..NUM_SQUARES)
            .map(Position::from_index)
            .any(|pos| self.is_empty_at(pos) && !self.outflanked(pos, player).is_empty())
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (out, cell) in board.iter_mut().zip(self.cells.iter()) {
            *out = player_code(*cell);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses 64 cells row-major: `B`/`X` black, `W`/`O` white, `.`/`-` empty.
/// Whitespace is ignored so boards can be written one row per line.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::empty();
        let mut count = 0usize;

        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match ch {
                'B' | 'b' | 'X' | 'x' => Some(Player::Black),
                'W' | 'w' | 'O' | 'o' => Some(Player::White),
                '.' | '-' => None,
                other => return Err(ParseBoardError::InvalidCell(other)),
            };
            if count < NUM_SQUARES {
                board.cells[count] = cell;
            }
            count += 1;
        }

        if count != NUM_SQUARES {
            return Err(ParseBoardError::CellCount(count));
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn t01_initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        let legal = board.legal_moves(Player::Black);
        let keys: Vec<Position> = legal.keys().copied().collect();

        // d3, c4, f5, e6
        assert_eq!(keys, vec![pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]);
        assert!(legal.values().all(|flips| flips.len() == 1));
        assert_eq!(legal[&pos(2, 3)], vec![pos(3, 3)]);
    }

    #[test]
    fn initial_board_has_four_discs() {
        let board = Board::new();

        assert_eq!(board.count(Player::Black), 2);
        assert_eq!(board.count(Player::White), 2);
        assert_eq!(board.empty_count(), 60);
        assert_eq!(board.get(pos(3, 3)), Some(Player::White));
        assert_eq!(board.get(pos(3, 4)), Some(Player::Black));
        assert_eq!(board.get(pos(4, 3)), Some(Player::Black));
        assert_eq!(board.get(pos(4, 4)), Some(Player::White));
    }

    #[test]
    fn outflank_requires_closing_disc() {
        let board: Board = "
            .WWB....
            .WW.....
            ........
            ........
            ........
            ........
            ........
            ........
        "
        .parse()
        .unwrap();

        // East: two whites closed by black.
        assert_eq!(
            board.outflanked_in_dir(pos(0, 0), Player::Black, 0, 1),
            vec![pos(0, 1), pos(0, 2)]
        );
        // South-east: white run ends on an empty cell.
        assert!(board.outflanked_in_dir(pos(0, 0), Player::Black, 1, 1).is_empty());
        // North: off the board immediately.
        assert!(board.outflanked_in_dir(pos(0, 0), Player::Black, -1, 0).is_empty());
    }

    #[test]
    fn outflank_run_to_edge_yields_nothing() {
        let board: Board = "
            .WWWWWWW
            ........
            ........
            ........
            ........
            ........
            ........
            ........
        "
        .parse()
        .unwrap();

        assert!(board.outflanked(pos(0, 0), Player::Black).is_empty());
        assert!(board.legal_moves(Player::Black).is_empty());
        assert!(!board.has_legal_move(Player::Black));
    }

    #[test]
    fn outflanked_unions_all_directions() {
        let board: Board = "
            B.B.B...
            .WWW....
            BW.WB...
            .WWW....
            B.B.B...
            ........
            ........
            ........
        "
        .parse()
        .unwrap();

        let mut flips = board.outflanked(pos(2, 2), Player::Black);
        flips.sort();

        assert_eq!(
            flips,
            vec![
                pos(1, 1),
                pos(1, 2),
                pos(1, 3),
                pos(2, 1),
                pos(2, 3),
                pos(3, 1),
                pos(3, 2),
                pos(3, 3),
            ]
        );
    }

    #[test]
    fn occupied_cells_are_never_candidates() {
        let board = Board::new();
        let legal = board.legal_moves(Player::White);

        assert!(legal.keys().all(|&p| board.is_empty_at(p)));
        assert!(!legal.contains_key(&pos(3, 3)));
        assert_eq!(legal.len(), 4);
    }

    #[test]
    fn occupied_positions_scan_row_major_and_restart() {
        let board = Board::new();

        let first: Vec<Position> = board.occupied_positions().collect();
        let second: Vec<Position> = board.occupied_positions().collect();

        assert_eq!(first, vec![pos(3, 3), pos(3, 4), pos(4, 3), pos(4, 4)]);
        assert_eq!(first, second);
    }

    #[test]
    fn to_array_uses_wire_codes() {
        let cells = Board::new().to_array();

        assert_eq!(cells[27], 2);
        assert_eq!(cells[28], 1);
        assert_eq!(cells[35], 1);
        assert_eq!(cells[36], 2);
        assert_eq!(cells.iter().filter(|&&c| c == 0).count(), 60);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!("B".parse::<Board>(), Err(ParseBoardError::CellCount(1)));
        assert_eq!(
            ".".repeat(65).parse::<Board>(),
            Err(ParseBoardError::CellCount(65))
        );
        assert_eq!(
            format!("{}?", ".".repeat(63)).parse::<Board>(),
            Err(ParseBoardError::InvalidCell('?'))
        );
    }

    #[test]
    fn parse_round_trips_starting_position() {
        let text = "
            ........
            ........
            ........
            ...WB...
            ...BW...
            ........
            ........
            ........
        ";
        assert_eq!(text.parse::<Board>().unwrap(), Board::new());
    }
}
