//! Settings screen: sound and the human's side.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use strictly_chess::{GameController, NavEvent};
use tracing::{debug, info, instrument};

use super::{MenuCursor, render_menu};
use crate::LobbySettings;
use crate::lobby::screen::{Screen, ScreenTransition};

const SOUND_ROW: usize = 0;

/// State for the settings screen.
#[derive(Debug)]
pub struct SettingsScreen {
    settings: LobbySettings,
    cursor: MenuCursor,
}

impl SettingsScreen {
    /// Creates a settings screen pre-populated with the current settings.
    #[instrument(skip(settings))]
    pub fn new(settings: LobbySettings) -> Self {
        debug!("Initializing SettingsScreen");
        Self {
            settings,
            cursor: MenuCursor::new(2),
        }
    }

    /// Returns the edited settings (called by the controller on the way out).
    pub fn settings(&self) -> LobbySettings {
        self.settings
    }

    fn toggle_selected(&mut self) {
        if self.cursor.selected() == SOUND_ROW {
            self.settings.toggle_sound();
            info!(sound = self.settings.sound, "Toggled sound");
        } else {
            self.settings.toggle_human_side();
            info!(human_side = %self.settings.human_side, "Toggled human side");
        }
    }
}

impl Screen for SettingsScreen {
    fn render(&self, frame: &mut Frame, _game: &GameController, _settings: &LobbySettings) {
        let items = vec![
            format!("Sound          [ {} ]", self.settings.sound_label()),
            format!("Play as        [ {} ]", self.settings.human_side),
        ];
        render_menu(
            frame,
            "Settings",
            items,
            &self.cursor,
            "↑↓: Navigate | ←→ / Enter: Toggle | Esc: Back",
        );
    }

    #[instrument(skip(self, key, _game))]
    fn handle_key(&mut self, key: KeyEvent, _game: &GameController) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.cursor.previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.cursor.next();
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.toggle_selected();
                ScreenTransition::Stay
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                info!("Leaving settings screen");
                ScreenTransition::Nav(NavEvent::BackSignal)
            }
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use strictly_chess::{Color, DEFAULT_REPLY_DELAY, RandomMover};

    fn press(screen: &mut SettingsScreen, code: KeyCode) -> ScreenTransition {
        let game = GameController::standard(RandomMover::seeded(0), DEFAULT_REPLY_DELAY);
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &game)
    }

    #[test]
    fn test_toggle_each_row() {
        let mut screen = SettingsScreen::new(LobbySettings::default());
        press(&mut screen, KeyCode::Enter);
        assert!(!screen.settings().sound);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.settings().human_side, Color::Black);
    }

    #[test]
    fn test_escape_goes_back() {
        let mut screen = SettingsScreen::new(LobbySettings::default());
        assert_eq!(
            press(&mut screen, KeyCode::Esc),
            ScreenTransition::Nav(NavEvent::BackSignal)
        );
    }
}
