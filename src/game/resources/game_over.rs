//! Game status and result tracking
//!
//! The engine's state machine:
//!
//! ```text
//! ToMove(White) ⇄ ToMove(Black) → GameOver(Checkmate { winner } | Stalemate)
//! ```
//!
//! `GameOver` is terminal; no further moves are accepted.
//!
//! # Game Over Conditions
//!
//! - **Checkmate**: the side to move is in check with no move that escapes it
//! - **Stalemate**: the side to move is not in check but has no legal move
//!
//! Draws by repetition, the fifty-move rule, insufficient material and time
//! forfeits are not detected.

use crate::game::types::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
}

impl GameOutcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameOutcome::Checkmate { winner } => Some(*winner),
            GameOutcome::Stalemate => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, GameOutcome::Stalemate)
    }

    /// Human-readable result for the game over banner
    pub fn message(&self) -> &'static str {
        match self {
            GameOutcome::Checkmate {
                winner: Color::White,
            } => "White wins by checkmate!",
            GameOutcome::Checkmate {
                winner: Color::Black,
            } => "Black wins by checkmate!",
            GameOutcome::Stalemate => "Draw by stalemate",
        }
    }
}

/// Where the game currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game in progress, waiting for this side to move
    ToMove(Color),
    /// Terminal state
    GameOver(GameOutcome),
}

impl Default for GameStatus {
    fn default() -> Self {
        GameStatus::ToMove(Color::White)
    }
}

impl GameStatus {
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameStatus::GameOver(_))
    }

    pub fn side_to_move(&self) -> Option<Color> {
        match self {
            GameStatus::ToMove(color) => Some(*color),
            GameStatus::GameOver(_) => None,
        }
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self {
            GameStatus::ToMove(_) => None,
            GameStatus::GameOver(outcome) => Some(*outcome),
        }
    }

    pub fn winner(&self) -> Option<Color> {
        self.outcome().and_then(|outcome| outcome.winner())
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::ToMove(color) => write!(f, "{color} to move"),
            GameStatus::GameOver(outcome) => f.write_str(outcome.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_status_default() {
        //! Verifies a new game starts with White to move
        let status = GameStatus::default();
        assert_eq!(status, GameStatus::ToMove(Color::White));
        assert!(!status.is_game_over());
        assert_eq!(status.side_to_move(), Some(Color::White));
        assert_eq!(status.winner(), None);
    }

    #[test]
    fn test_checkmate_has_winner() {
        let status = GameStatus::GameOver(GameOutcome::Checkmate {
            winner: Color::Black,
        });
        assert!(status.is_game_over());
        assert_eq!(status.side_to_move(), None);
        assert_eq!(status.winner(), Some(Color::Black));
        assert_eq!(status.to_string(), "Black wins by checkmate!");
    }

    #[test]
    fn test_stalemate_is_draw() {
        let outcome = GameOutcome::Stalemate;
        assert!(outcome.is_draw());
        assert_eq!(outcome.winner(), None);
        assert_eq!(outcome.message(), "Draw by stalemate");
    }
}
