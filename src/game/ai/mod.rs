//! Chess AI opponent interface
//!
//! The engine does not play chess; it asks a [`MovePolicy`] to pick one of
//! the candidate moves it has already validated. Candidates are generated by
//! `ChessGame::legal_moves` and carry what a simple evaluator needs: the
//! piece captured, whether the move gives check and whether it promotes.
//!
//! # Integration Strategy
//!
//! 1. `ChessGame::play_ai_turn` finds the side to move and its player
//! 2. Legal candidates for that side are generated with king safety applied
//! 3. The player's policy picks a (from, to) pair
//! 4. The pair goes through `try_move`, exactly like a human move
//!
//! This ensures AI moves follow the same validation rules as human moves.

use crate::game::components::GameState;
use crate::game::rules::BoardSnapshot;
use crate::game::types::{Cell, Color, Piece};

pub mod policy;

pub use policy::{GreedyPolicy, RandomPolicy};

/// A legal move together with its immediate consequences
///
/// The result of simulating the move on a scratch board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateMove {
    pub from: Cell,
    pub to: Cell,
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Whether the opponent's king would be attacked afterwards
    pub gives_check: bool,
    pub promotes: bool,
}

impl CandidateMove {
    /// Material gained by the move, in pawns
    pub fn material_gain(&self) -> i32 {
        self.captured.map_or(0, |piece| piece.kind.value())
    }
}

/// Strategy deciding an AI player's move
pub trait MovePolicy: Send {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Pick one of `candidates`, or `None` to pass
    ///
    /// Returning a pair that is not among the candidates is allowed; the
    /// engine rejects it like any other illegal move.
    fn select_move(&mut self, state: &GameState, candidates: &[CandidateMove])
        -> Option<(Cell, Cell)>;
}

/// Material on the board for `color` minus the opponent's, in pawns
pub fn material_balance(board: &BoardSnapshot, color: Color) -> i32 {
    board
        .occupied()
        .map(|(_, piece)| {
            if piece.color == color {
                piece.kind.value()
            } else {
                -piece.kind.value()
            }
        })
        .sum()
}
