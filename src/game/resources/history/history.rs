//! Move history tracking
//!
//! Maintains a complete chronological record of all moves made during the game.
//! The history is append-only: records are pushed by the engine after a move
//! has been fully applied (including promotion and the check flag) and are
//! never edited afterwards.
//!
//! # Architecture
//!
//! [`MoveHistory`] stores a `Vec<MoveRecord>` where each record contains:
//! - The piece moved, as it stood before the move
//! - From/to cells
//! - Captured piece (if any)
//! - Promotion target (if any)
//! - Whether the move put the opponent in check
//!
//! Formatting for display lives in [`super::notation`].

use crate::game::types::{Cell, Color, Piece, PieceKind};
use serde::{Deserialize, Serialize};

/// One executed move and its consequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Cell,
    pub to: Cell,
    /// The moved piece before the move was applied
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
    /// Set once, right after execution, when the opponent's king is attacked
    pub gives_check: bool,
}

impl MoveRecord {
    pub fn new(from: Cell, to: Cell, piece: Piece) -> Self {
        MoveRecord {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            gives_check: false,
        }
    }

    pub fn color(&self) -> Color {
        self.piece.color
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Complete move history for the current game
///
/// # Examples
///
/// ```rust,ignore
/// let mut history = MoveHistory::default();
/// history.add_move(record);
///
/// if let Some(last) = history.last_move() {
///     println!("Last move: {} to {}", last.from, last.to);
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveHistory {
    /// Chronological list of all moves made in the game
    ///
    /// Index 0 = Move 1 (White's first move)
    /// Index 1 = Move 1 (Black's response)
    /// Index 2 = Move 2 (White's move)
    /// etc.
    moves: Vec<MoveRecord>,
}

impl MoveHistory {
    /// Append a move to the history
    ///
    /// Should be called after the move is fully applied but before switching turns.
    pub fn add_move(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    /// Get the most recent move, if any
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    /// Number of half-moves (ply) made
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Get a specific move by zero-based ply index
    pub fn get_move(&self, index: usize) -> Option<&MoveRecord> {
        self.moves.get(index)
    }

    /// Iterate over all moves in chronological order
    pub fn iter(&self) -> std::slice::Iter<'_, MoveRecord> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Full-move number of the next ply (1 at game start)
    pub fn move_number(&self) -> usize {
        self.moves.len() / 2 + 1
    }
}
