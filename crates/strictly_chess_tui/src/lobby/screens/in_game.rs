//! In-game screen: the board, a cursor, and the result dialog.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use strictly_chess::{GameController, NavEvent};
use tracing::{debug, instrument};

use crate::LobbySettings;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::tui::{Cursor, draw_game, move_cursor};

/// In-game screen state. The game itself lives in the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InGameScreen {
    cursor: Cursor,
}

impl InGameScreen {
    /// Creates the screen with the cursor at `cursor`.
    #[instrument]
    pub fn new(cursor: Cursor) -> Self {
        debug!("Initializing InGameScreen");
        Self { cursor }
    }
}

impl Screen for InGameScreen {
    fn render(&self, frame: &mut Frame, game: &GameController, settings: &LobbySettings) {
        draw_game(frame, game, self.cursor, settings.sound);
    }

    #[instrument(skip(self, key, game))]
    fn handle_key(&mut self, key: KeyEvent, game: &GameController) -> ScreenTransition {
        if game.is_over() {
            // Only the result dialog is live.
            return match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => ScreenTransition::Nav(NavEvent::Restart),
                KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => {
                    ScreenTransition::Nav(NavEvent::ExitToMenu)
                }
                _ => ScreenTransition::Stay,
            };
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => ScreenTransition::Tap {
                row: self.cursor.row(),
                col: self.cursor.col(),
            },
            KeyCode::Char('u') | KeyCode::Char('U') => ScreenTransition::Undo,
            KeyCode::Char('r') | KeyCode::Char('R') => ScreenTransition::Nav(NavEvent::Restart),
            KeyCode::Esc => ScreenTransition::Nav(NavEvent::BackSignal),
            code => {
                self.cursor = move_cursor(self.cursor, code);
                ScreenTransition::Stay
            }
        }
    }
}
