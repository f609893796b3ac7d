pub mod board;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::{BOARD_SIZE, Board, NUM_SQUARES};
pub use error::{MoveError, ParseBoardError, PositionError};
pub use game::GameState;
pub use types::{DiscCount, GameOutcome, GameSnapshot, LegalMoves, MoveInfo, Player, Position};
