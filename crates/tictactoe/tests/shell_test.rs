//! Shell controller driven by an in-memory history store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tictactoe::tui::{ActiveScreen, HistoryStatus, SaveStatus, ShellController};
use tictactoe::{HistoryError, HistoryStore};
use tictactoe_core::{HistoryEntry, SessionResultRecord};

#[derive(Default)]
struct MemoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
    fail: bool,
    save_limit: Option<usize>,
}

impl MemoryStore {
    fn failing() -> Self {
        Self {
            entries: Mutex::default(),
            fail: true,
            save_limit: None,
        }
    }

    /// Accepts the first `limit` saves, then fails.
    fn accepting(limit: usize) -> Self {
        Self {
            save_limit: Some(limit),
            ..Self::default()
        }
    }

    fn down() -> HistoryError {
        HistoryError::Status {
            status: 503,
            message: "store down".to_string(),
        }
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if self.fail {
            return Err(Self::down());
        }
        Ok(self.entries.lock().expect("Lock").clone())
    }

    async fn save(&self, record: &SessionResultRecord) -> Result<HistoryEntry, HistoryError> {
        if self.fail {
            return Err(Self::down());
        }
        let mut entries = self.entries.lock().expect("Lock");
        if self.save_limit.is_some_and(|limit| entries.len() >= limit) {
            return Err(Self::down());
        }
        let entry = HistoryEntry::new(Some(entries.len() as i32 + 1), record.clone(), None);
        entries.push(entry.clone());
        Ok(entry)
    }
}

fn press(controller: &mut ShellController, code: KeyCode) -> bool {
    controller.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(controller: &mut ShellController, text: &str) {
    for c in text.chars() {
        press(controller, KeyCode::Char(c));
    }
}

fn start_game(controller: &mut ShellController) {
    press(controller, KeyCode::Char('s'));
    type_text(controller, "Ann");
    press(controller, KeyCode::Tab);
    type_text(controller, "Bob");
    press(controller, KeyCode::Enter);
}

#[tokio::test]
async fn test_initial_fetch_populates_history() {
    let store = Arc::new(MemoryStore::default());
    store.entries.lock().expect("Lock").push(
        SessionResultRecord::new("Cid", "Dee", false, true, 9).into(),
    );
    let mut controller = ShellController::new(store);

    controller.refresh_history();
    assert_eq!(*controller.history().status(), HistoryStatus::Loading);

    assert!(controller.process_next_event().await);
    assert_eq!(*controller.history().status(), HistoryStatus::Succeeded);
    assert_eq!(
        controller.history().lines(),
        ["A Draw between Cid and Dee with 9 moves"]
    );
}

#[tokio::test]
async fn test_failed_fetch_is_not_fatal() {
    let mut controller = ShellController::new(Arc::new(MemoryStore::failing()));
    controller.refresh_history();
    assert!(controller.process_next_event().await);

    assert!(matches!(
        controller.history().status(),
        HistoryStatus::Failed(message) if message.contains("store down")
    ));
    assert!(matches!(controller.screen(), ActiveScreen::MainMenu(_)));
    start_game(&mut controller);
    assert!(matches!(controller.screen(), ActiveScreen::Game(_)));
}

#[tokio::test]
async fn test_blank_names_keep_player_screen() {
    let mut controller = ShellController::new(Arc::new(MemoryStore::default()));
    press(&mut controller, KeyCode::Char('s'));
    type_text(&mut controller, "Ann");
    press(&mut controller, KeyCode::Enter);

    match controller.screen() {
        ActiveScreen::PlayerNames(screen) => {
            assert_eq!(screen.error().as_deref(), Some(tictactoe::tui::NAMES_REQUIRED));
        }
        other => panic!("Unexpected screen: {:?}", other),
    }
}

#[tokio::test]
async fn test_finished_game_is_saved_and_listed() {
    let store = Arc::new(MemoryStore::default());
    let mut controller = ShellController::new(store.clone());
    start_game(&mut controller);

    type_text(&mut controller, "14253");
    assert!(controller.process_next_event().await);

    assert_eq!(store.entries.lock().expect("Lock").len(), 1);
    assert_eq!(
        controller.history().lines(),
        ["Ann won against Bob in 3 moves as X"]
    );
    match controller.screen() {
        ActiveScreen::Game(game) => assert_eq!(*game.save_status(), SaveStatus::Saved),
        other => panic!("Unexpected screen: {:?}", other),
    }

    // Rematch keeps the players and saves nothing new until the next finish.
    press(&mut controller, KeyCode::Char('r'));
    assert_eq!(controller.drain_events(), 0);
    match controller.screen() {
        ActiveScreen::Game(game) => {
            assert_eq!(game.session().move_count(), 0);
            assert_eq!(game.session().player_two(), "Bob");
        }
        other => panic!("Unexpected screen: {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_save_keeps_result() {
    let mut controller = ShellController::new(Arc::new(MemoryStore::failing()));
    start_game(&mut controller);
    type_text(&mut controller, "14253");
    assert!(controller.process_next_event().await);

    match controller.screen() {
        ActiveScreen::Game(game) => {
            assert!(game.session().is_finished());
            assert!(matches!(game.save_status(), SaveStatus::Failed(m) if m.contains("store down")));
        }
        other => panic!("Unexpected screen: {:?}", other),
    }
    assert!(controller.history().entries().is_empty());
}

#[tokio::test]
async fn test_quit_from_menu() {
    let mut controller = ShellController::new(Arc::new(MemoryStore::default()));
    start_game(&mut controller);
    assert!(press(&mut controller, KeyCode::Char('m')));
    assert!(matches!(controller.screen(), ActiveScreen::MainMenu(_)));
    assert!(!press(&mut controller, KeyCode::Char('q')));
}

#[tokio::test]
async fn test_late_save_result_does_not_mark_rematch() {
    let store = Arc::new(MemoryStore::accepting(1));
    let mut controller = ShellController::new(store.clone());
    start_game(&mut controller);

    type_text(&mut controller, "14253");
    press(&mut controller, KeyCode::Char('r'));
    type_text(&mut controller, "14253");

    assert!(controller.process_next_event().await);
    assert!(controller.process_next_event().await);

    assert_eq!(store.entries.lock().expect("Lock").len(), 1);
    assert_eq!(controller.history().entries().len(), 1);
    match controller.screen() {
        ActiveScreen::Game(game) => {
            assert!(matches!(
                game.save_status(),
                SaveStatus::Failed(m) if m.contains("store down")
            ));
        }
        other => panic!("Unexpected screen: {:?}", other),
    }
}

#[tokio::test]
async fn test_save_result_after_leaving_game_is_ignored() {
    let mut controller = ShellController::new(Arc::new(MemoryStore::default()));
    start_game(&mut controller);
    type_text(&mut controller, "14253");
    press(&mut controller, KeyCode::Char('m'));
    start_game(&mut controller);
    type_text(&mut controller, "14");

    assert!(controller.process_next_event().await);
    assert_eq!(controller.history().entries().len(), 1);
    match controller.screen() {
        ActiveScreen::Game(game) => assert_eq!(*game.save_status(), SaveStatus::None),
        other => panic!("Unexpected screen: {:?}", other),
    }
}
