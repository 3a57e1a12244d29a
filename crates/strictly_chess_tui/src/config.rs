//! Player preferences loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strictly_chess::Color;
use tracing::{debug, info, instrument};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "strictly_chess.toml";

/// Preferences for the terminal front end. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ChessConfig {
    /// Whether audio cues play.
    sound: bool,
    /// Side the human takes in single-player games.
    human_side: Color,
    /// Settling delay before the AI replies, in milliseconds.
    ai_delay_ms: u64,
    /// Where tracing output goes.
    log_file: PathBuf,
}

impl Default for ChessConfig {
    fn default() -> Self {
        Self {
            sound: true,
            human_side: Color::White,
            ai_delay_ms: 500,
            log_file: PathBuf::from("strictly_chess.log"),
        }
    }
}

impl ChessConfig {
    /// Loads preferences from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(
            sound = config.sound,
            human_side = %config.human_side,
            ai_delay_ms = config.ai_delay_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses preferences from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or wrongly typed fields.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// The AI settling delay.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ChessConfig::from_toml_str("").unwrap(), ChessConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = ChessConfig::from_toml_str("human_side = \"black\"\n").unwrap();
        assert_eq!(config.human_side(), &Color::Black);
        assert!(*config.sound());
        assert_eq!(config.ai_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_bad_side_is_an_error() {
        let err = ChessConfig::from_toml_str("human_side = \"green\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
