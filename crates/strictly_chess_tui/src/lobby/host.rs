//! The game side of navigation: owns the controller and answers the
//! navigator's lifecycle hooks.

use strictly_chess::{GameController, GameMode, SessionLifecycle, ShakmatyEngine};
use tracing::{info, instrument, warn};

/// Game controller plus the optional custom start position.
#[derive(Debug)]
pub struct GameHost {
    game: GameController,
    start_fen: Option<String>,
}

impl GameHost {
    /// Wraps `game`. New games start from `start_fen` when given.
    #[instrument(skip(game))]
    pub fn new(game: GameController, start_fen: Option<String>) -> Self {
        Self { game, start_fen }
    }

    /// The game controller.
    pub fn game(&self) -> &GameController {
        &self.game
    }

    /// Mutable access for input and AI replies.
    pub fn game_mut(&mut self) -> &mut GameController {
        &mut self.game
    }
}

impl SessionLifecycle for GameHost {
    fn on_game_start(&mut self, mode: GameMode) {
        let Some(fen) = self.start_fen.as_deref() else {
            self.game.start_game(mode);
            return;
        };
        match ShakmatyEngine::from_fen(fen) {
            Ok(engine) => {
                info!(fen, "Starting game from custom position");
                self.game.start_from(engine, mode);
            }
            Err(e) => {
                warn!(error = %e, "Custom position unusable, starting from the standard one");
                self.game.start_game(mode);
            }
        }
    }

    fn on_pause_requested(&mut self) {
        self.game.on_pause_requested();
    }

    fn on_resume_requested(&mut self) {
        self.game.on_resume_requested();
    }

    fn on_exit_to_menu(&mut self) {
        self.game.on_exit_to_menu();
    }

    fn on_restart_requested(&mut self) {
        self.game.on_restart_requested();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_chess::{Color, DEFAULT_REPLY_DELAY, RandomMover, Square};

    fn host(fen: Option<&str>) -> GameHost {
        GameHost::new(
            GameController::standard(RandomMover::seeded(5), DEFAULT_REPLY_DELAY),
            fen.map(str::to_string),
        )
    }

    #[test]
    fn test_standard_start() {
        let mut host = host(None);
        host.on_game_start(GameMode::TwoPlayer);
        assert_eq!(host.game().side_to_move(), Color::White);
        assert_eq!(host.game().history().len(), 0);
    }

    #[test]
    fn test_custom_start() {
        let mut host = host(Some("4k3/8/8/8/8/8/8/4K2R b K - 0 1"));
        host.on_game_start(GameMode::TwoPlayer);
        assert_eq!(host.game().side_to_move(), Color::Black);
        let h1: Square = "h1".parse().unwrap();
        assert!(host.game().snapshot().piece_at(h1).is_some());
    }

    #[test]
    fn test_bad_fen_falls_back() {
        let mut host = host(Some("not a position"));
        host.on_game_start(GameMode::TwoPlayer);
        assert!(host.game().session().is_some());
        assert_eq!(host.game().side_to_move(), Color::White);
    }
}
