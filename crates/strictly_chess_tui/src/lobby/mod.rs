//! Lobby system: menu, setup, game, pause and settings screens.

mod controller;
mod host;
mod screen;
mod screens;
mod settings;

pub use controller::{AppEvent, LobbyController, spawn_reply_timer};
pub use host::GameHost;
pub use screen::{Screen, ScreenTransition};
pub use settings::LobbySettings;
