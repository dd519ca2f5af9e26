//! Chess rules and game-state engine
//!
//! ```rust,ignore
//! use tabletop_chess::game::{ChessGame, Color};
//!
//! let mut game = ChessGame::two_humans();
//! let e2 = "e2".parse()?;
//! let e4 = "e4".parse()?;
//! game.try_move(e2, e4, Color::White)?;
//! assert_eq!(game.formatted_history(), ["1. Pe2-e4"]);
//! ```

pub mod core;
pub mod game;
