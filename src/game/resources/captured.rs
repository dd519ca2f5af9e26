//! Captured pieces tracking
//!
//! Tracks pieces captured by each side and calculates material advantage.
//! Used for the captured-piece display next to the board.
//!
//! # Material Values
//!
//! Standard chess piece values in pawns (see [`PieceKind::value`]):
//! - Pawn: 1
//! - Knight/Bishop: 3
//! - Rook: 5
//! - Queen: 9
//! - King: 0 (cannot be captured)
//!
//! # Material Advantage
//!
//! Positive advantage means the owner is ahead. Example: if the owner
//! captured (Rook=5, Pawn=1) and the opponent captured (Knight=3), the
//! owner's advantage is (5+1) - 3 = +3 pawns.

use crate::game::types::{Piece, PieceKind};
use serde::{Deserialize, Serialize};

/// Pieces one player has taken from the opponent, in capture order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPieces {
    pieces: Vec<Piece>,
}

impl CapturedPieces {
    /// Record a capture credited to this player
    pub fn add_capture(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Number of captured pieces of a given kind
    pub fn count(&self, kind: PieceKind) -> usize {
        self.pieces.iter().filter(|piece| piece.kind == kind).count()
    }

    /// Total material value captured, in pawns
    pub fn material(&self) -> i32 {
        self.pieces.iter().map(|piece| piece.kind.value()).sum()
    }

    /// This tally's material minus the opponent's
    pub fn material_advantage(&self, opponent: &CapturedPieces) -> i32 {
        self.material() - opponent.material()
    }
}
