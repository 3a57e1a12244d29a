//! Lobby controller: the event loop driving screens, the navigator and the
//! deferred AI reply.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use derive_getters::Getters;
use ratatui::{Frame, Terminal, backend::Backend};
use strictly_chess::{
    Color, GameEvent, GameMode, NavEvent, NavOutcome, Navigator, PendingReply, ReplyToken,
    ScreenId,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::screens::{
    InGameScreen, MainMenuScreen, PauseMenuScreen, PlaySetupScreen, SettingsScreen,
};
use crate::tui::Cursor;
use crate::{ChessConfig, CuePlayer, GameHost, LobbySettings, play_cue};

/// Events delivered to the lobby loop from background tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The AI reply identified by this token has waited out its delay.
    ReplyDue(ReplyToken),
}

/// Sleeps for the reply's delay, then posts [`AppEvent::ReplyDue`].
///
/// Aborting the returned handle drops the reply; so does the controller
/// rejecting the token as stale.
pub fn spawn_reply_timer(tx: UnboundedSender<AppEvent>, reply: PendingReply) -> JoinHandle<()> {
    tokio::spawn(async move {
        sleep(reply.delay).await;
        if tx.send(AppEvent::ReplyDue(reply.token)).is_err() {
            debug!("Lobby gone before the AI reply was due");
        }
    })
}

/// Active screen object.
#[derive(Debug)]
enum ActiveScreen {
    MainMenu(MainMenuScreen),
    PlaySetup(PlaySetupScreen),
    InGame(InGameScreen),
    PauseMenu(PauseMenuScreen),
    Settings(SettingsScreen),
}

/// Controller that drives the lobby.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct LobbyController {
    host: GameHost,
    navigator: Navigator,
    settings: LobbySettings,
    #[getter(skip)]
    screen: ActiveScreen,
    /// In-game screen kept while the pause menu is up, so the cursor survives.
    #[getter(skip)]
    parked_game: Option<InGameScreen>,
    #[getter(skip)]
    cues: Box<dyn CuePlayer>,
    #[getter(skip)]
    tx: UnboundedSender<AppEvent>,
    #[getter(skip)]
    rx: UnboundedReceiver<AppEvent>,
    #[getter(skip)]
    reply_timer: Option<JoinHandle<()>>,
}

impl LobbyController {
    /// Creates a lobby on the main menu.
    #[instrument(skip(host, config, cues))]
    pub fn new(host: GameHost, config: &ChessConfig, cues: Box<dyn CuePlayer>) -> Self {
        info!("Creating LobbyController");
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            host,
            navigator: Navigator::new(),
            settings: LobbySettings::from_config(config),
            screen: ActiveScreen::MainMenu(MainMenuScreen::new()),
            parked_game: None,
            cues,
            tx,
            rx,
            reply_timer: None,
        }
    }

    /// Screen currently shown.
    pub fn current_screen(&self) -> ScreenId {
        self.navigator.current()
    }

    /// Runs the lobby event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");

        loop {
            terminal.draw(|f| self.render(f))?;

            while let Ok(app_event) = self.rx.try_recv() {
                self.handle_app_event(app_event);
            }

            // Poll for input with short timeout to keep the loop responsive.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if !self.handle_key(key) {
                    info!("Lobby quitting");
                    self.cancel_reply_timer();
                    return Ok(());
                }
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Renders the active screen.
    pub fn render(&self, frame: &mut Frame) {
        let game = self.host.game();
        match &self.screen {
            ActiveScreen::MainMenu(s) => s.render(frame, game, &self.settings),
            ActiveScreen::PlaySetup(s) => s.render(frame, game, &self.settings),
            ActiveScreen::InGame(s) => s.render(frame, game, &self.settings),
            ActiveScreen::PauseMenu(s) => s.render(frame, game, &self.settings),
            ActiveScreen::Settings(s) => s.render(frame, game, &self.settings),
        }
    }

    /// Routes a key to the active screen and applies the result.
    ///
    /// Returns `false` when the application should exit.
    #[instrument(skip(self, key), fields(code = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let game = self.host.game();
        let transition = match &mut self.screen {
            ActiveScreen::MainMenu(s) => s.handle_key(key, game),
            ActiveScreen::PlaySetup(s) => s.handle_key(key, game),
            ActiveScreen::InGame(s) => s.handle_key(key, game),
            ActiveScreen::PauseMenu(s) => s.handle_key(key, game),
            ActiveScreen::Settings(s) => s.handle_key(key, game),
        };
        self.apply_transition(transition)
    }

    /// Applies a screen transition. Returns `false` to quit.
    #[instrument(skip(self))]
    pub fn apply_transition(&mut self, transition: ScreenTransition) -> bool {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Tap { row, col } => {
                let outcome = self.host.game_mut().tap(row, col);
                debug!(?outcome, "Tap handled");
            }
            ScreenTransition::Undo => {
                let undone = self.host.game_mut().undo();
                debug!(undone, "Undo handled");
            }
            ScreenTransition::Nav(event) => match self.navigator.handle(event, &mut self.host) {
                NavOutcome::Moved(next) => self.enter(next, event),
                NavOutcome::Ignored => {}
                NavOutcome::Quit => return false,
            },
        }
        self.process_game_events();
        true
    }

    /// Handles an event posted by a background task.
    #[instrument(skip(self))]
    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::ReplyDue(token) => {
                self.reply_timer = None;
                if !self.host.game_mut().fire_reply(token) {
                    debug!(?token, "AI reply was stale");
                }
            }
        }
        self.process_game_events();
    }

    /// Waits for the next background event.
    pub async fn next_app_event(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    /// Builds the screen object for `next`, carrying state across where needed.
    fn enter(&mut self, next: ScreenId, event: NavEvent) {
        let previous = std::mem::replace(
            &mut self.screen,
            ActiveScreen::MainMenu(MainMenuScreen::new()),
        );
        if let ActiveScreen::Settings(s) = &previous {
            self.settings = s.settings();
            info!(
                sound = self.settings.sound,
                human_side = %self.settings.human_side,
                "Saving updated settings"
            );
        }
        if let ActiveScreen::InGame(s) = previous
            && next == ScreenId::PauseMenu
        {
            self.parked_game = Some(s);
        }

        info!(screen = %next, "Navigating");
        self.screen = match next {
            ScreenId::MainMenu => {
                self.parked_game = None;
                ActiveScreen::MainMenu(MainMenuScreen::new())
            }
            ScreenId::PlaySetup => {
                ActiveScreen::PlaySetup(PlaySetupScreen::new(self.settings.human_side))
            }
            ScreenId::Game => {
                let parked = self.parked_game.take();
                match (event, parked) {
                    (NavEvent::Continue | NavEvent::BackSignal, Some(screen)) => {
                        ActiveScreen::InGame(screen)
                    }
                    _ => ActiveScreen::InGame(InGameScreen::new(Cursor::home(self.home_side()))),
                }
            }
            ScreenId::PauseMenu => ActiveScreen::PauseMenu(PauseMenuScreen::new()),
            ScreenId::Settings => ActiveScreen::Settings(SettingsScreen::new(self.settings)),
        };
    }

    /// Side the cursor starts on: the human's in single-player, else White.
    fn home_side(&self) -> Color {
        match self.host.game().session().map(|s| *s.mode()) {
            Some(GameMode::SinglePlayer { human }) => human,
            _ => Color::White,
        }
    }

    /// Plays cues and (re)arms the reply timer from the controller's events.
    fn process_game_events(&mut self) {
        for game_event in self.host.game_mut().drain_events() {
            match game_event {
                GameEvent::Cue(cue) => play_cue(self.cues.as_mut(), cue, self.settings.sound),
                GameEvent::ReplyScheduled(reply) => {
                    self.cancel_reply_timer();
                    debug!(token = ?reply.token, delay = ?reply.delay, "Arming AI reply timer");
                    self.reply_timer = Some(spawn_reply_timer(self.tx.clone(), reply));
                }
                GameEvent::ReplyCancelled(token) => {
                    debug!(?token, "Disarming AI reply timer");
                    self.cancel_reply_timer();
                }
                GameEvent::GameOver(result) => info!(message = %result.message(), "Game over"),
                other => debug!(event = ?other, "Game event"),
            }
        }
    }

    fn cancel_reply_timer(&mut self) {
        if let Some(handle) = self.reply_timer.take() {
            handle.abort();
        }
    }
}
