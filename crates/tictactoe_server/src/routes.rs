//! REST endpoints for the history store.

use axum::{
    Json, Router,
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tictactoe_core::{HistoryEntry, SessionResultRecord};
use tracing::{debug, error, info, instrument, warn};

use crate::history_service::{HistoryService, StoreError};

/// Path of the history collection.
pub const HISTORY_PATH: &str = "/api/tictactoe/history";

/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/health";

/// Query parameters for `GET /api/tictactoe/history`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HistoryQuery {
    /// Return only the most recent `limit` entries.
    pub limit: Option<usize>,
}

/// JSON body of an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description.
    pub error: String,
}

/// Error surfaced by a handler.
#[derive(Debug, Display, Error, From)]
pub enum ApiError {
    /// Validation or storage failure.
    Store(StoreError),
    /// A blocking task panicked or was cancelled.
    #[display("Background task failed: {}", _0)]
    Task(tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Store(StoreError::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(StoreError::Storage(_)) | ApiError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the router serving the history API.
#[instrument(skip(service))]
pub fn router(service: HistoryService) -> Router {
    info!("Building history router");
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(HISTORY_PATH, get(list_history).post(save_history))
        .layer(middleware::from_fn(log_requests))
        .with_state(service)
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// GET /api/tictactoe/history
#[instrument(skip(service))]
async fn list_history(
    State(service): State<HistoryService>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let entries = tokio::task::spawn_blocking(move || service.history(query.limit)).await??;
    debug!(count = entries.len(), "Returning history");
    Ok(Json(entries))
}

/// POST /api/tictactoe/history
#[instrument(skip(service, record))]
async fn save_history(
    State(service): State<HistoryService>,
    Json(record): Json<SessionResultRecord>,
) -> Result<(StatusCode, Json<HistoryEntry>), ApiError> {
    let entry = tokio::task::spawn_blocking(move || service.save(&record)).await??;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Logs every request with its response status.
async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    let status = response.status();
    if status.is_client_error() {
        warn!(method = %method, uri = %uri, status = %status, "Request rejected");
    } else {
        info!(method = %method, uri = %uri, status = %status, "Request handled");
    }
    response
}
