//! Pause menu shown over a suspended game.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use strictly_chess::{GameController, NavEvent};
use strum::{EnumIter, IntoEnumIterator};
use tracing::{debug, info, instrument};

use super::{MenuCursor, render_menu};
use crate::LobbySettings;
use crate::lobby::screen::{Screen, ScreenTransition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
enum PauseOption {
    Continue,
    Restart,
    Settings,
    ExitToMenu,
}

impl PauseOption {
    fn label(self) -> &'static str {
        match self {
            Self::Continue => "Continue",
            Self::Restart => "Restart",
            Self::Settings => "Settings",
            Self::ExitToMenu => "Exit to Menu",
        }
    }

    fn event(self) -> NavEvent {
        match self {
            Self::Continue => NavEvent::Continue,
            Self::Restart => NavEvent::Restart,
            Self::Settings => NavEvent::OpenSettings,
            Self::ExitToMenu => NavEvent::ExitToMenu,
        }
    }
}

/// State for the pause menu.
#[derive(Debug)]
pub struct PauseMenuScreen {
    cursor: MenuCursor,
}

impl PauseMenuScreen {
    /// Creates the pause menu with "Continue" highlighted.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing PauseMenuScreen");
        Self {
            cursor: MenuCursor::new(PauseOption::iter().count()),
        }
    }

    fn selected_option(&self) -> PauseOption {
        PauseOption::iter()
            .nth(self.cursor.selected())
            .unwrap_or(PauseOption::Continue)
    }
}

impl Default for PauseMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for PauseMenuScreen {
    fn render(&self, frame: &mut Frame, game: &GameController, _settings: &LobbySettings) {
        let title = match game.session() {
            Some(session) => format!("Paused - {}", session.mode().label()),
            None => "Paused".to_string(),
        };
        let items = PauseOption::iter().map(|o| o.label().to_string()).collect();
        render_menu(
            frame,
            &title,
            items,
            &self.cursor,
            "↑↓: Navigate | Enter: Select | Esc: Continue",
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
                let option = self.selected_option();
                info!(option = ?option, "Pause menu option selected");
                ScreenTransition::Nav(option.event())
            }
            KeyCode::Esc => ScreenTransition::Nav(NavEvent::BackSignal),
            _ => ScreenTransition::Stay,
        }
    }
}
