//! Pawn promotion choice
//!
//! When a pawn reaches the farthest row the engine asks a
//! [`PromotionChooser`] (normally the UI's selection dialog) which piece it
//! becomes. With no chooser installed, or when the chooser declines or
//! answers with something a pawn can't become, the configured default
//! (queen) is used. Promotion never fails a move.

use crate::game::types::{Cell, Color, PieceKind};

/// Collaborator that picks the piece a pawn promotes to
///
/// Called synchronously while the move is being applied; the game accepts
/// no other move until it returns.
pub trait PromotionChooser: Send {
    /// Kind to promote to, or `None` to accept the default
    fn choose(&mut self, color: Color, cell: Cell) -> Option<PieceKind>;
}

impl<F> PromotionChooser for F
where
    F: FnMut(Color, Cell) -> Option<PieceKind> + Send,
{
    fn choose(&mut self, color: Color, cell: Cell) -> Option<PieceKind> {
        self(color, cell)
    }
}

/// Chooser that always answers with the same kind
#[derive(Debug, Clone, Copy)]
pub struct FixedPromotion(pub PieceKind);

impl PromotionChooser for FixedPromotion {
    fn choose(&mut self, _color: Color, _cell: Cell) -> Option<PieceKind> {
        Some(self.0)
    }
}

/// Check if a move by `kind` of `color` landing on `target_row` promotes
pub fn is_promotion_move(kind: PieceKind, color: Color, target_row: u8, board_size: u8) -> bool {
    kind == PieceKind::Pawn && target_row == color.promotion_row(board_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_promotion_move() {
        assert!(is_promotion_move(PieceKind::Pawn, Color::White, 8, 8));
        assert!(is_promotion_move(PieceKind::Pawn, Color::Black, 1, 8));
        assert!(!is_promotion_move(PieceKind::Pawn, Color::White, 1, 8));
        assert!(!is_promotion_move(PieceKind::Pawn, Color::White, 7, 8));
        assert!(!is_promotion_move(PieceKind::Queen, Color::White, 8, 8));
        assert!(is_promotion_move(PieceKind::Pawn, Color::White, 5, 5));
    }

    #[test]
    fn test_closure_chooser() {
        let mut chooser = |color: Color, _cell: Cell| match color {
            Color::White => Some(PieceKind::Knight),
            Color::Black => None,
        };
        assert_eq!(
            chooser.choose(Color::White, Cell::new(8, 'a')),
            Some(PieceKind::Knight)
        );
        assert_eq!(chooser.choose(Color::Black, Cell::new(1, 'a')), None);
    }
}
