//! Core module - application infrastructure around the game engine
//!
//! - [`EngineSettings`] - user preferences persisted as JSON
//! - [`CoreError`] - settings I/O and parse failures

pub mod error;
pub mod settings;

pub use error::{CoreError, CoreResult};
pub use settings::EngineSettings;
