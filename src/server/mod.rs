//! HTTP status server.
//!
//! Minimal polling API over the published liveness state:
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | /status | Latest published snapshot |
//! | GET | /health | Health check |
//!
//! No authentication, no write routes. The server shares a
//! `StatusPublisher` handle with the acquisition loop; handlers only
//! ever take read snapshots.

mod handlers;
pub mod types;

pub use handlers::AppState;
pub use types::{HealthResponse, PublishedStatus};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, VigilError};
use crate::status::StatusPublisher;

/// Start the HTTP server.
///
/// Binds to `host:port` (port 0 picks a random free port) and serves
/// until the returned cancellation token is cancelled.
///
/// Returns the actual bound address and the shutdown token.
pub async fn start_server(
    host: &str,
    port: u16,
    publisher: StatusPublisher,
) -> Result<(SocketAddr, CancellationToken)> {
    let shutdown_token = CancellationToken::new();
    let state = AppState::new(publisher);

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| VigilError::Server(format!("invalid address {}:{}: {}", host, port, e)))?;
    let listener = TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("Status server listening on {}", actual_addr);

    let server_shutdown = shutdown_token.clone();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(server_shutdown.cancelled_owned())
            .await
        {
            tracing::error!("Status server error: {}", e);
        }
    });

    Ok((actual_addr, shutdown_token))
}

/// Create the router with all routes configured.
///
/// Separated from `start_server` for in-process testing.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(handlers::status))
        .route("/health", get(handlers::health))
        .with_state(state)
}
