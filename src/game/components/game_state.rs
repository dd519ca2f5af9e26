//! Game state snapshot
//!
//! [`GameState`] is a read-only projection of a game produced on demand by
//! `ChessGame::state`: board occupancy, status and the full move list. It
//! is never stored by the engine, so holding one can't go stale in a
//! dangerous way; it simply describes the moment it was taken.

use crate::game::resources::game_over::GameStatus;
use crate::game::resources::history::{self, MoveRecord};
use crate::game::rules::{Board, BoardSnapshot};
use crate::game::types::Color;
use serde::{Deserialize, Serialize};

/// Board, status and history at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: BoardSnapshot,
    pub status: GameStatus,
    pub history: Vec<MoveRecord>,
}

impl GameState {
    /// Snapshot of `board` before any move, White to move
    pub fn initial(board: &Board) -> Self {
        GameState {
            board: board.snapshot(),
            status: GameStatus::default(),
            history: Vec::new(),
        }
    }

    /// Side to move, `None` once the game is over
    pub fn turn(&self) -> Option<Color> {
        self.status.side_to_move()
    }

    pub fn formatted_history(&self) -> Vec<String> {
        history::format_history(&self.history)
    }

    /// Serialize to pretty JSON for debugging and export
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
