//! REST API over a configured plant.
//!
//! Provides three GET endpoints:
//! - `/plant`: location and panel specs
//! - `/timeseries`: simulated records, window overridable by query
//! - `/summary`: summary statistics for the same window

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::plant::Plant;

pub use types::{ErrorResponse, TimeSeriesRecord, WindowQuery};

/// Immutable application state shared across all request handlers.
///
/// Series are recomputed per request, so the state holds only the plant and
/// the default window.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Simulated plant.
    pub plant: Plant,
    /// Default first instant (`YYYY-MM-DD[THH:MM[:SS]]`).
    pub start: String,
    /// Default last instant.
    pub end: String,
    /// Default frequency label.
    pub freq: String,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plant", get(handlers::get_plant))
        .route("/timeseries", get(handlers::get_timeseries))
        .route("/summary", get(handlers::get_summary))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
