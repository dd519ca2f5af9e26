//! Chess game logic module
//!
//! A rules engine with no rendering or input handling. A UI drives it by
//! calling [`ChessGame::try_move`] and reading back [`GameState`] snapshots;
//! AI players plug in through [`ai::MovePolicy`].
//!
//! # Module Organization
//!
//! - `types` - cells, colors, piece kinds and pieces
//! - `rules` - pure chess logic (movement rule table, board state)
//! - `engine` - [`ChessGame`], turn order, check, checkmate and promotion
//! - `resources` - history, captured pieces, game status, players
//! - `components` - [`GameState`] snapshot handed to UIs and AI policies
//! - `ai` - move policy interface and reference policies
//! - `events` - move listeners
//! - `session` - shared game and background AI game loop
//!
//! # Layering
//!
//! ```text
//! session ─► engine ─► rules::Board ─► rules::piece_moves
//!               │
//!               ├─► resources (history, players, status)
//!               └─► ai::MovePolicy (via Player)
//! ```
//!
//! The rule table and board know nothing about turns or check; the engine
//! is the only place that combines them.

pub mod ai;
pub mod components;
pub mod engine;
pub mod error;
pub mod events;
pub mod resources;
pub mod rules;
pub mod session;
pub mod types;

pub use components::GameState;
pub use engine::{AiTurn, ChessGame};
pub use error::{GameError, GameResult, MoveRejection};
pub use types::{Cell, Color, Piece, PieceKind};
