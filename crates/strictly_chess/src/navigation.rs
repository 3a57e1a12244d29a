//! Screen-level navigation as an explicit state machine.
//!
//! The navigator knows nothing about chess. It moves between screens and
//! calls the [`SessionLifecycle`] hooks at the transitions that create,
//! suspend, resume, restart or discard a game.

use std::fmt;

use tracing::{debug, info, instrument, warn};

use crate::{GameController, GameMode, MovePolicy, RulesEngine};

/// Screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    /// Title menu.
    MainMenu,
    /// Choose one or two players.
    PlaySetup,
    /// The board.
    Game,
    /// Game suspended.
    PauseMenu,
    /// Preferences.
    Settings,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenId::MainMenu => "main menu",
            ScreenId::PlaySetup => "play setup",
            ScreenId::Game => "game",
            ScreenId::PauseMenu => "pause menu",
            ScreenId::Settings => "settings",
        };
        f.write_str(name)
    }
}

/// Inputs to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// Open play setup from the main menu.
    Play,
    /// Open the settings screen.
    OpenSettings,
    /// Begin a game in the given mode.
    StartGame(GameMode),
    /// Hardware/OS back: pause in game, go back elsewhere.
    BackSignal,
    /// Leave the pause menu and keep playing.
    Continue,
    /// Start the current mode over.
    Restart,
    /// Discard the game and return to the main menu.
    ExitToMenu,
    /// Leave the application.
    Quit,
}

/// Result of feeding an event to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The event does not apply to the current screen.
    Ignored,
    /// Now showing this screen.
    Moved(ScreenId),
    /// The application should exit.
    Quit,
}

/// Hooks the game side implements; the navigator calls them on transitions.
pub trait SessionLifecycle {
    /// A new game starts in `mode`.
    fn on_game_start(&mut self, mode: GameMode);
    /// The game is being suspended behind the pause menu.
    fn on_pause_requested(&mut self);
    /// Play continues from the pause menu.
    fn on_resume_requested(&mut self);
    /// The game is discarded.
    fn on_exit_to_menu(&mut self);
    /// The game is replaced with a fresh one in the same mode.
    fn on_restart_requested(&mut self);
}

impl<E: RulesEngine + Default, P: MovePolicy> SessionLifecycle for GameController<E, P> {
    fn on_game_start(&mut self, mode: GameMode) {
        self.start_game(mode);
    }

    fn on_pause_requested(&mut self) {
        self.pause();
    }

    fn on_resume_requested(&mut self) {
        self.resume();
    }

    fn on_exit_to_menu(&mut self) {
        self.exit_to_menu();
    }

    fn on_restart_requested(&mut self) {
        self.restart();
    }
}

/// The navigation state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: ScreenId,
    settings_return: ScreenId,
}

impl Navigator {
    /// Starts on the main menu.
    #[instrument]
    pub fn new() -> Self {
        Self {
            current: ScreenId::MainMenu,
            settings_return: ScreenId::MainMenu,
        }
    }

    /// Screen currently shown.
    pub fn current(&self) -> ScreenId {
        self.current
    }

    /// Applies `event`, invoking lifecycle hooks on `game` as needed.
    #[instrument(skip(self, game), fields(from = %self.current))]
    pub fn handle<L: SessionLifecycle>(&mut self, event: NavEvent, game: &mut L) -> NavOutcome {
        use NavEvent::*;
        use ScreenId::*;

        let next = match (self.current, event) {
            (MainMenu, Play) => PlaySetup,
            (MainMenu, OpenSettings) => {
                self.settings_return = MainMenu;
                Settings
            }
            (MainMenu, Quit) => {
                info!("Quit requested from main menu");
                return NavOutcome::Quit;
            }

            (PlaySetup, StartGame(mode)) => {
                game.on_game_start(mode);
                Game
            }
            (PlaySetup, BackSignal) => MainMenu,

            (Game, BackSignal) => {
                game.on_pause_requested();
                PauseMenu
            }
            (Game, Restart) | (PauseMenu, Restart) => {
                game.on_restart_requested();
                Game
            }
            (Game, ExitToMenu) | (PauseMenu, ExitToMenu) => {
                game.on_exit_to_menu();
                MainMenu
            }

            (PauseMenu, Continue) | (PauseMenu, BackSignal) => {
                game.on_resume_requested();
                Game
            }
            (PauseMenu, OpenSettings) => {
                self.settings_return = PauseMenu;
                Settings
            }

            (Settings, BackSignal) => self.settings_return,

            (screen, event) => {
                warn!(%screen, ?event, "Navigation event does not apply here");
                return NavOutcome::Ignored;
            }
        };

        debug!(to = %next, "Screen transition");
        self.current = next;
        NavOutcome::Moved(next)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl SessionLifecycle for Recorder {
        fn on_game_start(&mut self, _mode: GameMode) {
            self.calls.push("start");
        }
        fn on_pause_requested(&mut self) {
            self.calls.push("pause");
        }
        fn on_resume_requested(&mut self) {
            self.calls.push("resume");
        }
        fn on_exit_to_menu(&mut self) {
            self.calls.push("exit");
        }
        fn on_restart_requested(&mut self) {
            self.calls.push("restart");
        }
    }

    #[test]
    fn test_full_round_trip() {
        let mut nav = Navigator::new();
        let mut rec = Recorder::default();
        assert_eq!(
            nav.handle(NavEvent::Play, &mut rec),
            NavOutcome::Moved(ScreenId::PlaySetup)
        );
        nav.handle(NavEvent::StartGame(GameMode::TwoPlayer), &mut rec);
        assert_eq!(nav.current(), ScreenId::Game);
        nav.handle(NavEvent::BackSignal, &mut rec);
        assert_eq!(nav.current(), ScreenId::PauseMenu);
        nav.handle(NavEvent::Continue, &mut rec);
        assert_eq!(nav.current(), ScreenId::Game);
        nav.handle(NavEvent::BackSignal, &mut rec);
        nav.handle(NavEvent::ExitToMenu, &mut rec);
        assert_eq!(nav.current(), ScreenId::MainMenu);
        assert_eq!(
            rec.calls,
            vec!["start", "pause", "resume", "pause", "exit"]
        );
    }

    #[test]
    fn test_settings_returns_to_origin() {
        let mut nav = Navigator::new();
        let mut rec = Recorder::default();
        nav.handle(NavEvent::OpenSettings, &mut rec);
        assert_eq!(
            nav.handle(NavEvent::BackSignal, &mut rec),
            NavOutcome::Moved(ScreenId::MainMenu)
        );

        nav.handle(NavEvent::Play, &mut rec);
        nav.handle(NavEvent::StartGame(GameMode::TwoPlayer), &mut rec);
        nav.handle(NavEvent::BackSignal, &mut rec);
        nav.handle(NavEvent::OpenSettings, &mut rec);
        assert_eq!(nav.current(), ScreenId::Settings);
        assert_eq!(
            nav.handle(NavEvent::BackSignal, &mut rec),
            NavOutcome::Moved(ScreenId::PauseMenu)
        );
    }

    #[test]
    fn test_inapplicable_events_ignored() {
        let mut nav = Navigator::new();
        let mut rec = Recorder::default();
        assert_eq!(nav.handle(NavEvent::Continue, &mut rec), NavOutcome::Ignored);
        assert_eq!(nav.handle(NavEvent::Restart, &mut rec), NavOutcome::Ignored);
        assert_eq!(nav.current(), ScreenId::MainMenu);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_restart_from_pause_returns_to_game() {
        let mut nav = Navigator::new();
        let mut rec = Recorder::default();
        nav.handle(NavEvent::Play, &mut rec);
        nav.handle(NavEvent::StartGame(GameMode::single_player()), &mut rec);
        nav.handle(NavEvent::BackSignal, &mut rec);
        assert_eq!(
            nav.handle(NavEvent::Restart, &mut rec),
            NavOutcome::Moved(ScreenId::Game)
        );
        assert_eq!(rec.calls, vec!["start", "pause", "restart"]);
    }

    #[test]
    fn test_quit_only_from_main_menu() {
        let mut nav = Navigator::new();
        let mut rec = Recorder::default();
        nav.handle(NavEvent::Play, &mut rec);
        assert_eq!(nav.handle(NavEvent::Quit, &mut rec), NavOutcome::Ignored);
        nav.handle(NavEvent::BackSignal, &mut rec);
        assert_eq!(nav.handle(NavEvent::Quit, &mut rec), NavOutcome::Quit);
    }
}
