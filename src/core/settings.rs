//! Engine settings and their persistence
//!
//! [`EngineSettings`] is stored as pretty-printed JSON in `settings.json`
//! inside the platform configuration directory, e.g.
//! `~/.config/tabletop-chess/settings.json` on Linux. When no config
//! directory can be resolved the file lives in the working directory.
//!
//! # Error Handling
//!
//! - [`EngineSettings::load`] never fails: missing, unreadable or invalid
//!   files fall back to defaults with a warning
//! - [`EngineSettings::load_from`] and [`EngineSettings::save_to`] report
//!   errors as [`CoreError`] for callers that want to handle them

use super::error::{CoreError, CoreResult};
use crate::game::types::PieceKind;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// User-tunable engine behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Piece a pawn becomes when no valid choice is made
    pub default_promotion: PieceKind,

    /// Game loop poll interval while waiting for a human move
    pub ai_poll_interval_ms: u64,

    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,

    /// Ply limit for self-play runs
    pub max_self_play_plies: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_promotion: PieceKind::Queen,
            ai_poll_interval_ms: 50,
            log_filter: "info".to_string(),
            max_self_play_plies: 200,
        }
    }
}

impl EngineSettings {
    /// Path of `settings.json` in the user's configuration directory
    pub fn default_path() -> PathBuf {
        match ProjectDirs::from("com", "tabletop", "tabletop-chess") {
            Some(dirs) => dirs.config_dir().join(SETTINGS_FILENAME),
            None => PathBuf::from(SETTINGS_FILENAME),
        }
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                info!("[SETTINGS] Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to load settings from {:?}: {}. Using defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    /// Read and validate settings from `path`
    pub fn load_from(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: EngineSettings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write to the default location
    pub fn save(&self) -> CoreResult<PathBuf> {
        let path = Self::default_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("[SETTINGS] Saved settings to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !self.default_promotion.is_promotion_target() {
            return Err(CoreError::InvalidSetting {
                field: "default_promotion",
                message: format!("a pawn cannot promote to {}", self.default_promotion),
            });
        }
        if self.ai_poll_interval_ms == 0 {
            return Err(CoreError::InvalidSetting {
                field: "ai_poll_interval_ms",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn ai_poll_interval(&self) -> Duration {
        Duration::from_millis(self.ai_poll_interval_ms)
    }
}
