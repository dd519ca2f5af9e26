//! Chess rules module - pure game logic
//!
//! Move generation and board state management as plain functions and
//! values, with no knowledge of turns, players or history.
//!
//! # Module Structure
//!
//! - `piece_moves` - the movement rule table: per piece kind a pseudo-move
//!   generator and a legality check (pawn, knight, bishop, rook, queen, king)
//! - `board_state` - [`Board`], the square map plus piece reverse index
//!
//! Check, checkmate and turn order are layered on top in
//! [`crate::game::engine`]. Castling and en passant are not part of the
//! rule set.

pub mod board_state;
pub mod piece_moves;


// Re-export commonly used items
pub use board_state::{Board, BoardSnapshot};
pub use piece_moves::{is_legal, pseudo_moves, ray_directions};
