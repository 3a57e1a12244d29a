//! Drives the lobby with key presses and the paused tokio clock.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strictly_chess::{
    Color, DEFAULT_REPLY_DELAY, GameController, GameMode, RandomMover, ScreenId,
};
use strictly_chess_tui::{
    AppEvent, ChessConfig, GameHost, LobbyController, SilentCuePlayer, spawn_reply_timer,
};

fn lobby() -> LobbyController {
    let game = GameController::standard(RandomMover::seeded(9), DEFAULT_REPLY_DELAY);
    LobbyController::new(
        GameHost::new(game, None),
        &ChessConfig::default(),
        Box::new(SilentCuePlayer),
    )
}

fn press(lobby: &mut LobbyController, code: KeyCode) -> bool {
    lobby.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Main menu -> play setup -> single player as White.
fn start_single_player(lobby: &mut LobbyController) {
    press(lobby, KeyCode::Enter);
    assert_eq!(lobby.current_screen(), ScreenId::PlaySetup);
    press(lobby, KeyCode::Enter);
    assert_eq!(lobby.current_screen(), ScreenId::Game);
    assert_eq!(
        lobby.host().game().session().map(|s| *s.mode()),
        Some(GameMode::single_player())
    );
}

/// Cursor starts on e2: select it and push to e4.
fn play_e4(lobby: &mut LobbyController) {
    press(lobby, KeyCode::Enter);
    press(lobby, KeyCode::Up);
    press(lobby, KeyCode::Up);
    press(lobby, KeyCode::Enter);
}

#[tokio::test(start_paused = true)]
async fn test_ai_replies_after_delay() {
    let mut lobby = lobby();
    start_single_player(&mut lobby);
    play_e4(&mut lobby);

    let game = lobby.host().game();
    assert_eq!(game.side_to_move(), Color::Black);
    let token = game.pending_reply().unwrap().token;

    let app_event = lobby.next_app_event().await.unwrap();
    assert_eq!(app_event, AppEvent::ReplyDue(token));
    lobby.handle_app_event(app_event);

    let game = lobby.host().game();
    assert_eq!(game.history().len(), 2);
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.pending_reply(), None);
}

#[tokio::test(start_paused = true)]
async fn test_pause_holds_ai_until_continue() {
    let mut lobby = lobby();
    start_single_player(&mut lobby);
    play_e4(&mut lobby);
    let stale = lobby.host().game().pending_reply().unwrap().token;

    press(&mut lobby, KeyCode::Esc);
    assert_eq!(lobby.current_screen(), ScreenId::PauseMenu);
    assert!(*lobby.host().game().session().unwrap().paused());

    // Even if a stale reply arrives, nothing moves.
    lobby.handle_app_event(AppEvent::ReplyDue(stale));
    assert_eq!(lobby.host().game().history().len(), 1);

    press(&mut lobby, KeyCode::Enter);
    assert_eq!(lobby.current_screen(), ScreenId::Game);
    let fresh = lobby.host().game().pending_reply().unwrap().token;
    assert_ne!(fresh, stale);

    let app_event = lobby.next_app_event().await.unwrap();
    assert_eq!(app_event, AppEvent::ReplyDue(fresh));
    lobby.handle_app_event(app_event);
    assert_eq!(lobby.host().game().history().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_exit_to_menu_discards_game() {
    let mut lobby = lobby();
    start_single_player(&mut lobby);
    play_e4(&mut lobby);

    press(&mut lobby, KeyCode::Esc);
    // Continue, Restart, Settings, Exit to Menu
    for _ in 0..3 {
        press(&mut lobby, KeyCode::Down);
    }
    press(&mut lobby, KeyCode::Enter);
    assert_eq!(lobby.current_screen(), ScreenId::MainMenu);
    assert!(lobby.host().game().session().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_settings_change_applies_to_next_game() {
    let mut lobby = lobby();
    press(&mut lobby, KeyCode::Down);
    press(&mut lobby, KeyCode::Enter);
    assert_eq!(lobby.current_screen(), ScreenId::Settings);

    // Mute, then switch to Black.
    press(&mut lobby, KeyCode::Enter);
    press(&mut lobby, KeyCode::Down);
    press(&mut lobby, KeyCode::Enter);
    press(&mut lobby, KeyCode::Esc);
    assert_eq!(lobby.current_screen(), ScreenId::MainMenu);
    assert!(!lobby.settings().sound);
    assert_eq!(lobby.settings().human_side, Color::Black);

    press(&mut lobby, KeyCode::Enter);
    press(&mut lobby, KeyCode::Enter);
    assert_eq!(
        lobby.host().game().session().map(|s| *s.mode()),
        Some(GameMode::SinglePlayer {
            human: Color::Black
        })
    );
    // The AI opens as White.
    assert!(lobby.host().game().pending_reply().is_some());
}

#[test]
fn test_quit_from_main_menu_needs_confirmation() {
    let mut lobby = lobby();
    assert!(press(&mut lobby, KeyCode::Char('q')));
    assert!(press(&mut lobby, KeyCode::Char('n')));
    assert_eq!(lobby.current_screen(), ScreenId::MainMenu);

    assert!(press(&mut lobby, KeyCode::Char('q')));
    assert!(!press(&mut lobby, KeyCode::Char('y')));
}

#[tokio::test(start_paused = true)]
async fn test_r_restarts_running_game() {
    let mut lobby = lobby();
    press(&mut lobby, KeyCode::Enter);
    press(&mut lobby, KeyCode::Down);
    press(&mut lobby, KeyCode::Enter);
    assert_eq!(
        lobby.host().game().session().map(|s| *s.mode()),
        Some(GameMode::TwoPlayer)
    );
    play_e4(&mut lobby);
    assert_eq!(lobby.host().game().history().len(), 1);

    press(&mut lobby, KeyCode::Char('r'));
    assert_eq!(lobby.current_screen(), ScreenId::Game);
    let game = lobby.host().game();
    assert!(game.history().is_empty());
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.session().map(|s| *s.mode()), Some(GameMode::TwoPlayer));
}

#[tokio::test(start_paused = true)]
async fn test_timer_waits_full_delay() {
    let mut game = GameController::standard(RandomMover::seeded(1), Duration::from_millis(500));
    game.start_game(GameMode::SinglePlayer {
        human: Color::Black,
    });
    let reply = game.pending_reply().unwrap();

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let _handle = spawn_reply_timer(tx, reply);
    tokio::task::yield_now().await;

    tokio::time::advance(Duration::from_millis(499)).await;
    tokio::task::yield_now().await;
    assert!(rx.try_recv().is_err());

    tokio::time::advance(Duration::from_millis(2)).await;
    assert_eq!(rx.recv().await, Some(AppEvent::ReplyDue(reply.token)));
}

#[tokio::test(start_paused = true)]
async fn test_aborted_timer_never_fires() {
    let mut game = GameController::standard(RandomMover::seeded(1), Duration::from_millis(500));
    game.start_game(GameMode::SinglePlayer {
        human: Color::Black,
    });
    let reply = game.pending_reply().unwrap();

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let handle = spawn_reply_timer(tx, reply);
    handle.abort();

    tokio::time::advance(Duration::from_secs(2)).await;
    // The aborted task dropped its sender, so the channel closes empty.
    assert_eq!(rx.recv().await, None);
}
