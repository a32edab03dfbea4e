//! Integration tests for the SQLite history repository.

use tempfile::TempDir;
use tictactoe_core::SessionResultRecord;
use tictactoe_server::{HistoryRepository, HistoryService, NewHistoryRow, StoreError};

fn setup_repository() -> (HistoryRepository, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("history.db");
    let repo = HistoryRepository::new(db_path.to_string_lossy().into_owned())
        .expect("Failed to create repository");
    repo.run_migrations().expect("Failed to run migrations");
    (repo, temp_dir)
}

fn row(p1: &str, p2: &str, is_one_won: bool, is_draw: bool, moves: u32) -> NewHistoryRow {
    NewHistoryRow::try_from(&SessionResultRecord::new(p1, p2, is_one_won, is_draw, moves))
        .expect("Failed to build row")
}

#[test]
fn test_migrations_are_idempotent() {
    let (repo, _temp) = setup_repository();
    assert_eq!(repo.run_migrations().expect("Rerun migrations"), 0);
    assert_eq!(repo.count().expect("Count"), 0);
}

#[test]
fn test_empty_path_rejected() {
    assert!(HistoryRepository::new("  ".to_string()).is_err());
}

#[test]
fn test_insert_assigns_id_and_timestamp() {
    let (repo, _temp) = setup_repository();

    let stored = repo
        .insert(row("Ann", "Bob", true, false, 3))
        .expect("Failed to insert");
    assert!(*stored.id() > 0);
    assert_eq!(stored.player_one(), "Ann");
    assert_eq!(*stored.moves(), 3);

    let entry = stored.into_entry().expect("Convert row");
    assert!(entry.played_at().is_some());
    assert_eq!(entry.summary(), "Ann won against Bob in 3 moves as X");
}

#[test]
fn test_list_is_oldest_first() {
    let (repo, _temp) = setup_repository();
    repo.insert(row("Ann", "Bob", true, false, 3)).expect("Insert");
    repo.insert(row("Cid", "Dee", false, true, 9)).expect("Insert");
    repo.insert(row("Eve", "Fay", false, false, 4)).expect("Insert");

    let rows = repo.list().expect("List");
    let names: Vec<_> = rows.iter().map(|r| r.player_one().as_str()).collect();
    assert_eq!(names, ["Ann", "Cid", "Eve"]);
    assert_eq!(repo.count().expect("Count"), 3);
}

#[test]
fn test_list_recent_keeps_newest_in_order() {
    let (repo, _temp) = setup_repository();
    for name in ["A", "B", "C", "D"] {
        repo.insert(row(name, "Z", true, false, 3)).expect("Insert");
    }

    let rows = repo.list_recent(2).expect("List recent");
    let names: Vec<_> = rows.iter().map(|r| r.player_one().as_str()).collect();
    assert_eq!(names, ["C", "D"]);
}

#[test]
fn test_service_rejects_invalid_record() {
    let (repo, _temp) = setup_repository();
    let service = HistoryService::new(repo);

    let result = service.save(&SessionResultRecord::new("Ann", "Bob", true, true, 9));
    assert!(matches!(result, Err(StoreError::Invalid(_))));
    assert_eq!(service.repository().count().expect("Count"), 0);
}

#[test]
fn test_service_save_then_history() {
    let (repo, _temp) = setup_repository();
    let service = HistoryService::new(repo);

    let draw = SessionResultRecord::new("Ann", "Bob", false, true, 9);
    let saved = service.save(&draw).expect("Save");
    assert_eq!(saved.record(), &draw);

    let win = SessionResultRecord::new("Ann", "Bob", false, false, 3);
    service.save(&win).expect("Save");

    let all = service.history(None).expect("History");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].record(), &draw);

    let last = service.history(Some(1)).expect("History");
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].record(), &win);
}
