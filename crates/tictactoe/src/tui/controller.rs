//! Shell controller: the state machine driving the terminal UI.

use std::sync::Arc;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use derive_getters::Getters;
use ratatui::{Frame, Terminal, backend::Backend};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::history_client::HistoryStore;
use crate::tui::events::{HistoryEvent, HistoryTasks};
use crate::tui::history::MatchHistory;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::screen::SaveTicket;
use crate::tui::screens::{GameScreen, MainMenuScreen, PlayerNamesScreen};

/// Active screen in the shell state machine.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Main menu with match history.
    MainMenu(MainMenuScreen),
    /// Player name entry.
    PlayerNames(PlayerNamesScreen),
    /// A game in progress or just finished.
    Game(GameScreen),
}

impl ActiveScreen {
    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            ActiveScreen::MainMenu(s) => s,
            ActiveScreen::PlayerNames(s) => s,
            ActiveScreen::Game(s) => s,
        }
    }

    fn as_screen(&self) -> &dyn Screen {
        match self {
            ActiveScreen::MainMenu(s) => s,
            ActiveScreen::PlayerNames(s) => s,
            ActiveScreen::Game(s) => s,
        }
    }
}

/// Controller that drives the shell.
///
/// Owns the active screen (and so the game session) and the in-memory match
/// history. History requests run as background tasks whose results arrive
/// as [`HistoryEvent`]s; the controller never waits on them while handling
/// input.
#[derive(Debug, Getters)]
pub struct ShellController {
    /// Screen receiving input.
    screen: ActiveScreen,
    /// Match history shown on the main menu.
    history: MatchHistory,
    #[getter(skip)]
    games_started: u64,
    #[getter(skip)]
    tasks: HistoryTasks,
    #[getter(skip)]
    events: UnboundedReceiver<HistoryEvent>,
}

impl ShellController {
    /// Creates a controller on the main menu backed by `store`.
    #[instrument(skip(store))]
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        info!("Creating ShellController");
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            screen: ActiveScreen::MainMenu(MainMenuScreen::new()),
            history: MatchHistory::default(),
            games_started: 0,
            tasks: HistoryTasks::new(store, tx),
            events: rx,
        }
    }

    /// Requests the match history.
    #[instrument(skip(self))]
    pub fn refresh_history(&mut self) {
        self.history.begin_loading();
        self.tasks.spawn_fetch();
    }

    /// Routes a key press to the active screen. Returns `false` on quit.
    #[instrument(skip(self, key))]
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let transition = self.screen.as_screen_mut().handle_key(key);
        self.apply_transition(transition)
    }

    /// Applies a screen transition. Returns `false` on quit.
    #[instrument(skip(self))]
    pub fn apply_transition(&mut self, transition: ScreenTransition) -> bool {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::GoToMainMenu => {
                info!("Navigating to MainMenu");
                self.screen = ActiveScreen::MainMenu(MainMenuScreen::new());
            }
            ScreenTransition::GoToPlayerNames => {
                info!("Navigating to PlayerNames");
                self.screen = ActiveScreen::PlayerNames(PlayerNamesScreen::new());
            }
            ScreenTransition::StartGame {
                player_one,
                player_two,
            } => {
                self.games_started += 1;
                info!(%player_one, %player_two, game = self.games_started, "Starting game");
                self.screen = ActiveScreen::Game(GameScreen::new(
                    self.games_started,
                    player_one,
                    player_two,
                ));
            }
            ScreenTransition::RefreshHistory => self.refresh_history(),
            ScreenTransition::SaveRecord { ticket, record } => {
                self.tasks.spawn_save(ticket, record)
            }
            ScreenTransition::Quit => {
                info!("Shell quitting");
                return false;
            }
        }
        true
    }

    /// Applies one background result to the shell state.
    #[instrument(skip(self, event))]
    pub fn handle_event(&mut self, event: HistoryEvent) {
        match event {
            HistoryEvent::Loaded(entries) => self.history.finish_loading(entries),
            HistoryEvent::LoadFailed(message) => self.history.fail_loading(message),
            HistoryEvent::Saved { ticket, entry } => {
                debug!(id = ?entry.id(), "Appending saved entry");
                self.history.push(entry);
                self.report_save(ticket, Ok(()));
            }
            HistoryEvent::SaveFailed { ticket, message } => self.report_save(ticket, Err(message)),
        }
    }

    /// Shows a save result on the game screen that issued its ticket.
    fn report_save(&mut self, ticket: SaveTicket, result: Result<(), String>) {
        if let ActiveScreen::Game(game) = &mut self.screen {
            game.set_save_result(ticket, result);
        }
    }

    /// Applies every background result that has already arrived.
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Waits for the next background result and applies it.
    ///
    /// Returns `false` if no task can report any more.
    pub async fn process_next_event(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Renders the active screen.
    pub fn render(&self, frame: &mut Frame) {
        self.screen.as_screen().render(frame, &self.history);
    }

    /// Runs the event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting shell event loop");
        self.refresh_history();

        loop {
            self.drain_events();
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if !self.handle_key(key) {
                    return Ok(());
                }
            }

            sleep(Duration::from_millis(10)).await;
        }
    }
}
