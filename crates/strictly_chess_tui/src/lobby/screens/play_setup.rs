//! Play setup: one player against the random mover, or two at one board.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use strictly_chess::{Color, GameController, GameMode, NavEvent};
use tracing::{debug, info, instrument};

use super::{MenuCursor, render_menu};
use crate::LobbySettings;
use crate::lobby::screen::{Screen, ScreenTransition};

/// State for the play setup screen.
#[derive(Debug)]
pub struct PlaySetupScreen {
    human_side: Color,
    cursor: MenuCursor,
}

impl PlaySetupScreen {
    /// Creates the setup screen; single-player games put the human on `human_side`.
    #[instrument]
    pub fn new(human_side: Color) -> Self {
        debug!("Initializing PlaySetupScreen");
        Self {
            human_side,
            cursor: MenuCursor::new(2),
        }
    }

    fn modes(&self) -> [GameMode; 2] {
        [
            GameMode::SinglePlayer {
                human: self.human_side,
            },
            GameMode::TwoPlayer,
        ]
    }
}

impl Screen for PlaySetupScreen {
    fn render(&self, frame: &mut Frame, _game: &GameController, _settings: &LobbySettings) {
        let items = vec![
            format!("1 Player (as {})", self.human_side),
            "2 Players".to_string(),
        ];
        render_menu(
            frame,
            "New Game",
            items,
            &self.cursor,
            "↑↓: Navigate | Enter: Start | Esc: Back",
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
            KeyCode::Enter => {
                let mode = self.modes()[self.cursor.selected()];
                info!(mode = mode.label(), "Game mode chosen");
                ScreenTransition::Nav(NavEvent::StartGame(mode))
            }
            KeyCode::Esc => ScreenTransition::Nav(NavEvent::BackSignal),
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use strictly_chess::{DEFAULT_REPLY_DELAY, RandomMover};

    fn press(screen: &mut PlaySetupScreen, code: KeyCode) -> ScreenTransition {
        let game = GameController::standard(RandomMover::seeded(0), DEFAULT_REPLY_DELAY);
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &game)
    }

    #[test]
    fn test_single_player_uses_configured_side() {
        let mut screen = PlaySetupScreen::new(Color::Black);
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            ScreenTransition::Nav(NavEvent::StartGame(GameMode::SinglePlayer {
                human: Color::Black
            }))
        );
    }

    #[test]
    fn test_two_player_option() {
        let mut screen = PlaySetupScreen::new(Color::White);
        press(&mut screen, KeyCode::Down);
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            ScreenTransition::Nav(NavEvent::StartGame(GameMode::TwoPlayer))
        );
    }

    #[test]
    fn test_escape_goes_back() {
        let mut screen = PlaySetupScreen::new(Color::White);
        assert_eq!(
            press(&mut screen, KeyCode::Esc),
            ScreenTransition::Nav(NavEvent::BackSignal)
        );
    }
}
