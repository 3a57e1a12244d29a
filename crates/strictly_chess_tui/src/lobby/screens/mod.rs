//! Screen implementations for the lobby.

mod in_game;
mod main_menu;
mod pause_menu;
mod play_setup;
mod settings;

pub use in_game::InGameScreen;
pub use main_menu::MainMenuScreen;
pub use pause_menu::PauseMenuScreen;
pub use play_setup::PlaySetupScreen;
pub use settings::SettingsScreen;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Wrapping cursor over a fixed-length vertical menu.
#[derive(Debug, Clone)]
struct MenuCursor {
    state: ListState,
    len: usize,
}

impl MenuCursor {
    fn new(len: usize) -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self { state, len }
    }

    fn previous(&mut self) {
        let i = match self.state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => self.len - 1,
        };
        self.state.select(Some(i));
    }

    fn next(&mut self) {
        let i = match self.state.selected() {
            Some(i) => (i + 1) % self.len,
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn selected(&self) -> usize {
        self.state.selected().unwrap_or(0).min(self.len - 1)
    }
}

/// Title bar, bordered list and help footer shared by the menu screens.
fn render_menu(
    frame: &mut Frame,
    title: &str,
    items: Vec<String>,
    cursor: &MenuCursor,
    help: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = items.into_iter().map(ListItem::new).collect();
    let menu = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = cursor.state.clone();
    frame.render_stateful_widget(menu, chunks[1], &mut list_state);

    let help = Paragraph::new(help.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);
}
