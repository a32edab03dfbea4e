//! In-memory match history shown on the main menu.

use derive_getters::Getters;
use tictactoe_core::HistoryEntry;
use tracing::{debug, warn};

/// Progress of the most recent history fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HistoryStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Succeeded,
    /// The last fetch failed with this message.
    Failed(String),
}

/// Entries fetched from the history store plus games saved since.
#[derive(Debug, Clone, Default, Getters)]
pub struct MatchHistory {
    entries: Vec<HistoryEntry>,
    status: HistoryStatus,
}

impl MatchHistory {
    /// Marks a fetch as started. Existing entries stay visible.
    pub fn begin_loading(&mut self) {
        self.status = HistoryStatus::Loading;
    }

    /// Replaces the entries with a fetch result.
    pub fn finish_loading(&mut self, entries: Vec<HistoryEntry>) {
        debug!(count = entries.len(), "History loaded");
        self.entries = entries;
        self.status = HistoryStatus::Succeeded;
    }

    /// Records a failed fetch.
    pub fn fail_loading(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, "History fetch failed");
        self.status = HistoryStatus::Failed(message);
    }

    /// Appends a freshly saved entry.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Line shown above the entries, if any.
    pub fn status_line(&self) -> Option<String> {
        match &self.status {
            HistoryStatus::Loading => Some("Loading match history...".to_string()),
            HistoryStatus::Failed(e) => Some(format!("Could not load match history: {}", e)),
            HistoryStatus::Idle | HistoryStatus::Succeeded if self.entries.is_empty() => {
                Some("No matches played yet.".to_string())
            }
            _ => None,
        }
    }

    /// One summary line per entry, newest first.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().rev().map(|e| e.summary()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::SessionResultRecord;

    fn entry(p1: &str, p2: &str, is_one_won: bool, is_draw: bool, moves: u32) -> HistoryEntry {
        SessionResultRecord::new(p1, p2, is_one_won, is_draw, moves).into()
    }

    #[test]
    fn test_fetch_lifecycle() {
        let mut history = MatchHistory::default();
        assert_eq!(*history.status(), HistoryStatus::Idle);

        history.begin_loading();
        assert_eq!(history.status_line().as_deref(), Some("Loading match history..."));

        history.finish_loading(vec![entry("Ann", "Bob", true, false, 3)]);
        assert_eq!(*history.status(), HistoryStatus::Succeeded);
        assert_eq!(history.status_line(), None);
        assert_eq!(history.lines(), ["Ann won against Bob in 3 moves as X"]);
    }

    #[test]
    fn test_failed_fetch_keeps_entries() {
        let mut history = MatchHistory::default();
        history.finish_loading(vec![entry("Ann", "Bob", false, true, 9)]);
        history.begin_loading();
        history.fail_loading("connection refused");
        assert_eq!(history.entries().len(), 1);
        assert_eq!(
            history.status_line().as_deref(),
            Some("Could not load match history: connection refused")
        );
    }

    #[test]
    fn test_push_shows_newest_first() {
        let mut history = MatchHistory::default();
        history.finish_loading(vec![entry("Ann", "Bob", false, true, 9)]);
        history.push(entry("Ann", "Bob", false, false, 3));
        assert_eq!(
            history.lines(),
            [
                "Bob won against Ann in 3 moves as O",
                "A Draw between Ann and Bob with 9 moves"
            ]
        );
    }
}
