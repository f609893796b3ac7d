use crate::types::Position;

/// Errors returned when a move is rejected. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("illegal move at {0}")]
    IllegalMove(Position),

    #[error("game is already over")]
    GameOver,
}

/// Errors raised while building a [`Position`] from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("row/col out of range: ({row}, {col})")]
    OutOfBounds { row: i32, col: i32 },

    #[error("invalid square notation: {0:?}")]
    InvalidNotation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 64 cells, got {0}")]
    CellCount(usize),

    #[error("invalid cell character: {0:?}")]
    InvalidCell(char),
}
