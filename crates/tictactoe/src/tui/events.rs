//! Background history requests and the events they report back.

use std::sync::Arc;

use derive_new::new;
use tictactoe_core::{HistoryEntry, SessionResultRecord};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, instrument, warn};

use crate::history_client::HistoryStore;
use crate::tui::screen::SaveTicket;

/// Result of a background history request.
#[derive(Debug, Clone)]
pub enum HistoryEvent {
    /// A fetch completed.
    Loaded(Vec<HistoryEntry>),
    /// A fetch failed.
    LoadFailed(String),
    /// A finished game was stored.
    Saved {
        /// Ticket of the save request.
        ticket: SaveTicket,
        /// Entry as stored.
        entry: HistoryEntry,
    },
    /// Storing a finished game failed.
    SaveFailed {
        /// Ticket of the save request.
        ticket: SaveTicket,
        /// Why the save failed.
        message: String,
    },
}

/// Spawns history requests as tokio tasks.
///
/// Requests never block the caller; each one reports exactly one
/// [`HistoryEvent`] on the channel.
#[derive(Clone, new)]
pub struct HistoryTasks {
    store: Arc<dyn HistoryStore>,
    events: UnboundedSender<HistoryEvent>,
}

impl std::fmt::Debug for HistoryTasks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryTasks").finish_non_exhaustive()
    }
}

impl HistoryTasks {
    /// Starts a history fetch.
    #[instrument(skip(self))]
    pub fn spawn_fetch(&self) {
        let store = Arc::clone(&self.store);
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match store.fetch_history().await {
                Ok(entries) => HistoryEvent::Loaded(entries),
                Err(e) => HistoryEvent::LoadFailed(e.to_string()),
            };
            if events.send(event).is_err() {
                debug!("Shell closed before history fetch finished");
            }
        });
    }

    /// Starts saving a finished game.
    #[instrument(skip(self, record), fields(summary = %record.summary()))]
    pub fn spawn_save(&self, ticket: SaveTicket, record: SessionResultRecord) {
        let store = Arc::clone(&self.store);
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match store.save(&record).await {
                Ok(entry) => HistoryEvent::Saved { ticket, entry },
                Err(e) => {
                    warn!(error = %e, "Saving match failed");
                    HistoryEvent::SaveFailed {
                        ticket,
                        message: e.to_string(),
                    }
                }
            };
            if events.send(event).is_err() {
                debug!("Shell closed before save finished");
            }
        });
    }
}
