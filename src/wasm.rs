//! WASM bindings for the rules engine.
//!
//! Players cross the boundary as `u8`: 0 = none, 1 = black, 2 = white.

use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::game::GameState;
use crate::types::{Player, Position, player_code};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// WASM-friendly wrapper around [`GameState`].
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameState,
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a new game from the standard opening.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            inner: GameState::new(),
        }
    }

    /// Set up a position from a 64-cell diagram (`B`, `W`, `.`).
    #[wasm_bindgen(js_name = fromBoard)]
    pub fn from_board(text: &str, to_move: u8) -> Result<WasmGame, String> {
        let board: Board = text.parse().map_err(|e| format!("{e}"))?;
        let to_move =
            Player::from_code(to_move).ok_or_else(|| format!("invalid player: {to_move}"))?;
        Ok(WasmGame {
            inner: GameState::from_board(board, to_move),
        })
    }

    /// Play at (row, col). Returns the move record on success.
    pub fn place(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let info = self.try_place(row, col).map_err(|e| JsValue::from_str(&e))?;
        Ok(serde_wasm_bindgen::to_value(&info)?)
    }

    #[wasm_bindgen(js_name = isLegal)]
    pub fn is_legal(&self, row: u8, col: u8) -> bool {
        position(row, col).is_ok_and(|pos| self.inner.is_legal(pos))
    }

    /// Legal moves as a flat array `[row, col, row, col, ...]`.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Vec<u8> {
        self.inner
            .legal_moves()
            .keys()
            .flat_map(|pos| [pos.row() as u8, pos.col() as u8])
            .collect()
    }

    /// Discs flipped by playing (row, col), flat like [`Self::legal_moves`].
    #[wasm_bindgen(js_name = flipsFor)]
    pub fn flips_for(&self, row: u8, col: u8) -> Vec<u8> {
        position(row, col)
            .ok()
            .and_then(|pos| self.inner.legal_moves().get(&pos))
            .map(|flips| {
                flips
                    .iter()
                    .flat_map(|p| [p.row() as u8, p.col() as u8])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 64 cells, row-major.
    pub fn board(&self) -> Vec<u8> {
        self.inner.board().to_array().to_vec()
    }

    /// Occupied cells as square indices, row-major.
    #[wasm_bindgen(js_name = occupiedSquares)]
    pub fn occupied_squares(&self) -> Vec<u8> {
        self.inner
            .occupied_positions()
            .map(|pos| pos.index() as u8)
            .collect()
    }

    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        player_code(self.inner.current_player())
    }

    pub fn winner(&self) -> u8 {
        player_code(self.inner.winner())
    }

    #[wasm_bindgen(js_name = blackCount)]
    pub fn black_count(&self) -> u8 {
        self.inner.disc_count().black
    }

    #[wasm_bindgen(js_name = whiteCount)]
    pub fn white_count(&self) -> u8 {
        self.inner.disc_count().white
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    /// Full state as a plain JS object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.snapshot())?)
    }
}

impl WasmGame {
    fn try_place(&mut self, row: u8, col: u8) -> Result<crate::types::MoveInfo, String> {
        let pos = position(row, col).map_err(|e| e.to_string())?;
        self.inner.make_move(pos).map_err(|e| e.to_string())
    }
}

fn position(row: u8, col: u8) -> Result<Position, crate::error::PositionError> {
    Position::new(row as i32, col as i32)
}
