//! HTTP client for the history store.

use async_trait::async_trait;
use derive_more::{Display, Error};
use tictactoe_core::{HistoryEntry, SessionResultRecord};
use tictactoe_server::{ErrorResponse, HISTORY_PATH};
use tracing::{debug, info, instrument, warn};

/// Error talking to the history store.
#[derive(Debug, Display, Error)]
pub enum HistoryError {
    /// The request never produced a response, or the body was not JSON.
    #[display("History store unreachable: {}", _0)]
    Request(reqwest::Error),
    /// The store answered with a non-success status.
    #[display("History store returned {}: {}", status, message)]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error text from the response body.
        message: String,
    },
}

impl From<reqwest::Error> for HistoryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err)
    }
}

/// Somewhere finished games can be stored and listed.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Lists stored entries, oldest first.
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Stores a finished game and returns the stored entry.
    async fn save(&self, record: &SessionResultRecord) -> Result<HistoryEntry, HistoryError>;
}

/// REST client for `/api/tictactoe/history`.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    base_url: String,
    limit: Option<usize>,
    client: reqwest::Client,
}

impl HistoryClient {
    /// Creates a client for the store at `base_url`.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!("Creating history client");
        Self {
            base_url,
            limit: None,
            client: reqwest::Client::new(),
        }
    }

    /// Restricts fetches to the `limit` most recent entries.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Store base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn history_url(&self) -> String {
        match self.limit {
            Some(limit) => format!("{}{}?limit={}", self.base_url, HISTORY_PATH, limit),
            None => format!("{}{}", self.base_url, HISTORY_PATH),
        }
    }

    /// Turns a non-success response into [`HistoryError::Status`].
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, HistoryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        warn!(status = status.as_u16(), message = %message, "History store rejected request");
        Err(HistoryError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl HistoryStore for HistoryClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let response = self.client.get(self.history_url()).send().await?;
        let response = Self::check(response).await?;
        let entries: Vec<HistoryEntry> = response.json().await?;
        debug!(count = entries.len(), "History fetched");
        Ok(entries)
    }

    #[instrument(skip(self, record), fields(base_url = %self.base_url))]
    async fn save(&self, record: &SessionResultRecord) -> Result<HistoryEntry, HistoryError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, HISTORY_PATH))
            .json(record)
            .send()
            .await?;
        let entry: HistoryEntry = Self::check(response).await?.json().await?;
        info!(id = ?entry.id(), "Match saved");
        Ok(entry)
    }
}
