//! Screen trait and transition type for the lobby.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use strictly_chess::{GameController, NavEvent};

use crate::LobbySettings;

/// The result of handling a key on a screen.
///
/// Screens never change screens themselves: navigation goes through
/// [`ScreenTransition::Nav`] and the core navigator, board input goes to the
/// game controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Nothing for the controller to do.
    Stay,
    /// Feed this event to the navigator.
    Nav(NavEvent),
    /// Tap the board at grid position `(row, col)`.
    Tap {
        /// Grid row, 0 being rank 8.
        row: usize,
        /// Grid column, 0 being the a-file.
        col: usize,
    },
    /// Take back one move.
    Undo,
}

/// Trait implemented by each screen in the lobby.
///
/// Each screen owns its own widget state, renders itself from the shared game
/// and settings, and maps keys to transitions.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, game: &GameController, settings: &LobbySettings);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, game: &GameController) -> ScreenTransition;
}
