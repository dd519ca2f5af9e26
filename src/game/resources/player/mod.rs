//! Player resources
//!
//! A [`Player`] owns a color, a controller and the pieces it has captured.
//!
//! - **Human**: turns are driven externally by UI-originated
//!   `ChessGame::try_move` calls; [`Player::take_turn`] does nothing.
//! - **AI**: a pluggable [`MovePolicy`] picks a (from, to) pair which the
//!   engine feeds into the same `try_move` entry point.

use crate::game::ai::{CandidateMove, MovePolicy};
use crate::game::resources::captured::CapturedPieces;
use crate::game::components::GameState;
use crate::game::types::{Cell, Color, Piece};
use std::fmt;

pub mod promotion;
pub use promotion::*;

/// Who decides a player's moves
pub enum Controller {
    Human,
    Ai(Box<dyn MovePolicy>),
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Controller::Human => f.write_str("Human"),
            Controller::Ai(policy) => write!(f, "Ai({})", policy.name()),
        }
    }
}

/// Individual player information
#[derive(Debug)]
pub struct Player {
    /// Display name (e.g., "Player 1", "AI")
    pub name: String,
    color: Color,
    controller: Controller,
    captured: CapturedPieces,
}

impl Player {
    /// Create a human-controlled player
    pub fn human(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            controller: Controller::Human,
            captured: CapturedPieces::default(),
        }
    }

    /// Create an AI player driven by `policy`
    pub fn ai(name: impl Into<String>, color: Color, policy: impl MovePolicy + 'static) -> Self {
        Self {
            name: name.into(),
            color,
            controller: Controller::Ai(Box::new(policy)),
            captured: CapturedPieces::default(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human)
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Pieces this player has taken
    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub(crate) fn credit_capture(&mut self, piece: Piece) {
        self.captured.add_capture(piece);
    }

    /// Decide this player's move
    ///
    /// Humans move through the UI, so this is `None` for them. AI players
    /// delegate to their policy.
    pub fn take_turn(
        &mut self,
        state: &GameState,
        candidates: &[CandidateMove],
    ) -> Option<(Cell, Cell)> {
        match &mut self.controller {
            Controller::Human => None,
            Controller::Ai(policy) => policy.select_move(state, candidates),
        }
    }
}
