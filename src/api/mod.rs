//! REST API over the sizing engine.
//!
//! Endpoints:
//! - `GET /models`: EBOSS model catalog
//! - `GET /generators`: fuel curves and standard generator catalog
//! - `POST /sizing`: `SizingRequest` JSON in, `DerivedSpec` JSON out
//! - `POST /report`: scenario JSON in, full `SizingReport` out

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::routing::{get, post};

use crate::reference::ReferenceData;
use crate::sizing::SpecCache;

pub use types::{ErrorResponse, GeneratorsResponse, SizingRequestBody, ValidationResponse};

/// Application state shared across all request handlers.
///
/// Reference data is read-only. The cache is shared between requests, so
/// it sits behind a mutex; entries are insert-if-absent and never mutated.
pub struct AppState {
    /// Catalog loaded at startup.
    pub data: ReferenceData,
    cache: Mutex<SpecCache>,
}

impl AppState {
    /// Wraps `data` with an empty cache.
    pub fn new(data: ReferenceData) -> Self {
        Self {
            data,
            cache: Mutex::new(SpecCache::new()),
        }
    }

    /// Locks the cache. A poisoned lock is recovered: entries are
    /// write-once, so a panic mid-request cannot leave one half-written.
    pub fn cache(&self) -> MutexGuard<'_, SpecCache> {
        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/models", get(handlers::get_models))
        .route("/generators", get(handlers::get_generators))
        .route("/sizing", post(handlers::post_sizing))
        .route("/report", post(handlers::post_report))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
