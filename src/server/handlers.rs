//! HTTP request handlers for the status server.
//!
//! Both endpoints are read-only; the status handler is a thin view
//! over the shared `StatusPublisher` snapshot and never blocks on the
//! acquisition loop.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};

use crate::status::StatusPublisher;

use super::types::{HealthResponse, PublishedStatus};

/// Application state shared across all handlers
pub struct AppState {
    /// Read side of the published liveness snapshot
    pub publisher: StatusPublisher,
    /// Server start time, reported by the health endpoint
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(publisher: StatusPublisher) -> Arc<Self> {
        Arc::new(Self {
            publisher,
            started_at: Utc::now(),
        })
    }
}

/// Health check endpoint.
///
/// Returns `200 OK` with version information when the server is up.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.started_at))
}

/// Status endpoint: `GET /status -> {"sleeping": bool}`.
///
/// Always `200 OK` with the most recently published snapshot; before
/// the first publish this is `{"sleeping": false}`.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<PublishedStatus> {
    Json(state.publisher.read())
}
