use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::error::MoveError;
use crate::types::{
    DiscCount, GameOutcome, GameSnapshot, LegalMoves, MoveInfo, Player, Position, player_code,
};

/// Authoritative state of one game: board, tally, side to move and its
/// legal moves.
///
/// `legal_moves` is derived from `board` and `current_player` and is
/// rebuilt every time the side to move changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    disc_count: DiscCount,
    current_player: Option<Player>,
    game_over: bool,
    winner: Option<Player>,
    legal_moves: LegalMoves,
}

impl GameState {
    /// Starting position with Black to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::Black)
    }

    /// Builds a state from an arbitrary position.
    ///
    /// If `to_move` has no legal move the turn passes to the opponent, and
    /// if neither side can move the game is finished immediately.
    #[instrument(skip(board))]
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let disc_count = DiscCount {
            black: board.count(Player::Black),
            white: board.count(Player::White),
        };
        let mut state = Self {
            board,
            disc_count,
            current_player: Some(to_move),
            game_over: false,
            winner: None,
            legal_moves: board.legal_moves(to_move),
        };
        state.settle_turn();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn disc_count(&self) -> DiscCount {
        self.disc_count
    }

    /// `None` once the game is over.
    pub fn current_player(&self) -> Option<Player> {
        self.current_player
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The side with more discs at the end; `None` for a tie or while the
    /// game is still running.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.game_over {
            return None;
        }
        Some(self.winner.map_or(GameOutcome::Tie, GameOutcome::Winner))
    }

    pub fn legal_moves(&self) -> &LegalMoves {
        &self.legal_moves
    }

    pub fn is_legal(&self, pos: Position) -> bool {
        self.legal_moves.contains_key(&pos)
    }

    pub fn occupied_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.board.occupied_positions()
    }

    /// Plays `pos` for the side to move.
    ///
    /// On rejection nothing changes. On success the disc is placed, the
    /// outflanked discs flip and the turn advances (with a pass or game end
    /// when the next side has no move).
    #[instrument(skip(self), fields(player = ?self.current_player))]
    pub fn make_move(&mut self, pos: Position) -> Result<MoveInfo, MoveError> {
        let Some(player) = self.current_player.filter(|_| !self.game_over) else {
            debug!("move rejected: game is over");
            return Err(MoveError::GameOver);
        };
        let Some(outflanked) = self.legal_moves.get(&pos).cloned() else {
            debug!(%pos, "move rejected: not legal");
            return Err(MoveError::IllegalMove(pos));
        };

        self.board.set(pos, Some(player));
        self.flip_discs(&outflanked);
        self.update_disc_counts(player, outflanked.len() as u8);
        self.pass_turn();

        Ok(MoveInfo {
            player,
            position: pos,
            outflanked,
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_array().to_vec(),
            current_player: player_code(self.current_player),
            black_count: self.disc_count.black,
            white_count: self.disc_count.white,
            is_game_over: self.game_over,
            winner: player_code(self.winner),
            legal_moves: self.legal_moves.keys().copied().collect(),
        }
    }

    fn flip_discs(&mut self, positions: &[Position]) {
        for &pos in positions {
            let flipped = self.board.get(pos).map(Player::opponent);
            self.board.set(pos, flipped);
        }
    }

    fn update_disc_counts(&mut self, mover: Player, outflanked: u8) {
        *self.disc_count.get_mut(mover) += outflanked + 1;
        *self.disc_count.get_mut(mover.opponent()) -= outflanked;
    }

    fn change_player(&mut self, player: Player) {
        self.current_player = Some(player);
        self.legal_moves = self.board.legal_moves(player);
    }

    fn pass_turn(&mut self) {
        if let Some(player) = self.current_player {
            self.change_player(player.opponent());
            self.settle_turn();
        }
    }

    /// Hands the turn back when the side to move is stuck, and ends the
    /// game when both sides are.
    fn settle_turn(&mut self) {
        let Some(stuck) = self.current_player else {
            return;
        };
        if !self.legal_moves.is_empty() {
            return;
        }

        debug!(player = ?stuck, "no legal moves, passing");
        self.change_player(stuck.opponent());
        if !self.legal_moves.is_empty() {
            return;
        }

        self.current_player = None;
        self.game_over = true;
        self.winner = self.find_winner();
        info!(
            black = self.disc_count.black,
            white = self.disc_count.white,
            winner = ?self.winner,
            "game over"
        );
    }

    fn find_winner(&self) -> Option<Player> {
        let DiscCount { black, white } = self.disc_count;
        if black > white {
            Some(Player::Black)
        } else if white > black {
            Some(Player::White)
        } else {
            None
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
