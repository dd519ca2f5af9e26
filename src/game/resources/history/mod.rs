//! Move history and notation
//!
//! Append-only move records plus the text formatting used by move lists.

pub mod history;
pub mod notation;

pub use history::*;
pub use notation::{format_history, last_move_summary, move_token, movetext};
