//! Main menu: play, settings or quit.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use strictly_chess::{GameController, NavEvent};
use strum::{EnumIter, IntoEnumIterator};
use tracing::{debug, info, instrument};

use super::{MenuCursor, render_menu};
use crate::LobbySettings;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::tui::center_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
enum MainOption {
    Play,
    Settings,
    Quit,
}

impl MainOption {
    fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Settings => "Settings",
            Self::Quit => "Quit",
        }
    }

    fn event(self) -> NavEvent {
        match self {
            Self::Play => NavEvent::Play,
            Self::Settings => NavEvent::OpenSettings,
            Self::Quit => NavEvent::Quit,
        }
    }
}

/// State for the main menu screen.
#[derive(Debug)]
pub struct MainMenuScreen {
    cursor: MenuCursor,
    /// The exit confirmation is showing.
    confirming_quit: bool,
}

impl MainMenuScreen {
    /// Creates the main menu with the first option highlighted.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing MainMenuScreen");
        Self {
            cursor: MenuCursor::new(MainOption::iter().count()),
            confirming_quit: false,
        }
    }

    /// Whether the exit confirmation is showing.
    pub fn confirming_quit(&self) -> bool {
        self.confirming_quit
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                info!("Exit confirmed");
                ScreenTransition::Nav(NavEvent::Quit)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                debug!("Exit cancelled");
                self.confirming_quit = false;
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }

    fn selected_option(&self) -> MainOption {
        MainOption::iter()
            .nth(self.cursor.selected())
            .unwrap_or(MainOption::Play)
    }
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MainMenuScreen {
    fn render(&self, frame: &mut Frame, _game: &GameController, _settings: &LobbySettings) {
        let items = MainOption::iter().map(|o| o.label().to_string()).collect();
        render_menu(
            frame,
            "Strictly Chess",
            items,
            &self.cursor,
            "↑↓: Navigate | Enter: Select | q: Quit",
        );

        if self.confirming_quit {
            let area = center_rect(frame.area(), 40, 5);
            let dialog = Paragraph::new(vec![
                Line::from("Are you sure you want to exit?"),
                Line::from(""),
                Line::from("y: Yes | n: No"),
            ])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Quit"));
            frame.render_widget(Clear, area);
            frame.render_widget(dialog, area);
        }
    }

    #[instrument(skip(self, key, _game))]
    fn handle_key(&mut self, key: KeyEvent, _game: &GameController) -> ScreenTransition {
        if self.confirming_quit {
            return self.handle_confirm_key(key);
        }
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
                info!(option = ?option, "Main menu option selected");
                match option {
                    MainOption::Quit => {
                        self.confirming_quit = true;
                        ScreenTransition::Stay
                    }
                    other => ScreenTransition::Nav(other.event()),
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.confirming_quit = true;
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }
}
