//! Lobby settings, editable at runtime from the settings screen.

use strictly_chess::Color;
use tracing::instrument;

use crate::ChessConfig;

/// User-adjustable preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LobbySettings {
    /// Whether audio cues play. Read each time a cue fires.
    pub sound: bool,
    /// Side the human takes in single-player games.
    pub human_side: Color,
}

impl LobbySettings {
    /// Initial settings from the loaded config.
    #[instrument(skip(config))]
    pub fn from_config(config: &ChessConfig) -> Self {
        Self {
            sound: *config.sound(),
            human_side: *config.human_side(),
        }
    }

    /// Label for the sound toggle.
    pub fn sound_label(self) -> &'static str {
        if self.sound { "On" } else { "Off" }
    }

    /// Flips sound on or off.
    pub fn toggle_sound(&mut self) {
        self.sound = !self.sound;
    }

    /// Switches the human between White and Black.
    pub fn toggle_human_side(&mut self) {
        self.human_side = self.human_side.opponent();
    }
}

impl Default for LobbySettings {
    fn default() -> Self {
        Self::from_config(&ChessConfig::default())
    }
}
