//! Error types for game module
//!
//! Two separate taxonomies:
//!
//! - [`GameError`] - invalid usage of the API (caller bugs such as promoting a
//!   non-pawn or addressing a cell that is not on the board)
//! - [`MoveRejection`] - an expected game-rule outcome explaining why
//!   `try_move` refused a move. Not a failure; no state is changed.

use crate::game::types::{Cell, Color, PieceKind};

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Cell outside the board
    #[error("Cell {cell} is not on a {size}x{size} board")]
    CellOffBoard { cell: Cell, size: u8 },

    /// Text that is not algebraic cell notation
    #[error("Invalid cell notation: {text:?}")]
    InvalidCell { text: String },

    /// Operation needs a piece but the square is empty
    #[error("No piece at {cell}")]
    EmptySquare { cell: Cell },

    /// Setup tried to place a piece on an occupied square
    #[error("Square {cell} is already occupied")]
    SquareOccupied { cell: Cell },

    /// Promotion requested for a piece that is not a pawn
    #[error("Piece at {cell} is a {kind}, not a pawn")]
    NotAPawn { cell: Cell, kind: PieceKind },

    /// Promotion target must be queen, rook, bishop or knight
    #[error("Cannot promote to {kind}")]
    InvalidPromotion { kind: PieceKind },

    /// Board dimension outside the supported range
    #[error("Unsupported board size {size}")]
    UnsupportedBoardSize { size: u8 },

    /// Players or board handed to the engine do not form a valid game
    #[error("Invalid game configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;

/// Reason a move attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("the game is over")]
    GameOver,

    #[error("it is not {requester}'s turn")]
    WrongTurn { requester: Color },

    #[error("there is no piece on {cell}")]
    NoPiece { cell: Cell },

    #[error("the piece on {cell} belongs to the opponent")]
    NotYourPiece { cell: Cell },

    #[error("the piece cannot move from {from} to {to}")]
    IllegalTarget { from: Cell, to: Cell },

    #[error("moving from {from} to {to} would leave the king in check")]
    SelfCheck { from: Cell, to: Cell },
}
