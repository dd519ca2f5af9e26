//! Chess game data components
//!
//! Pure data structures handed out by the engine.

pub mod game_state;

// Re-export all components for convenience
pub use game_state::*;
