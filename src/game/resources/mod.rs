//! Chess game resources - state owned by the engine
//!
//! # Resource Categories
//!
//! ## Game History
//! - [`MoveHistory`] - append-only move record, formatted by [`history::notation`]
//! - [`CapturedPieces`] - material tracking and advantage calculation
//!
//! ## Game Status
//! - [`GameStatus`] / [`GameOutcome`] - whose turn it is, or how the game ended
//!
//! ## Players
//! - [`Player`] - name, color, controller and captured pieces
//! - [`PromotionChooser`] - collaborator choosing promotion pieces

pub mod captured;
pub mod game_over;
pub mod history;
pub mod player;

// Re-export all resources for convenience
pub use captured::*;
pub use game_over::*;
pub use history::*;
pub use player::*;
