//! voxrelay call proxy.
//!
//! Exposes two routes:
//! - `GET /health` for liveness checks
//! - `POST /create-web-call`, which injects the server-held Retell credential
//!   and an agent id, forwards the request upstream, and relays the reply

pub mod api;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use voxrelay_voice::RetellService;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream voice API client. Holds the credential and default agent.
    pub retell: Arc<RetellService>,
}

impl AppState {
    pub fn new(retell: RetellService) -> Self {
        Self {
            retell: Arc::new(retell),
        }
    }
}

/// Maximum request body size (64 KiB). The only accepted body is `{agent_id}`.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
async fn health() -> &'static str {
    "ok"
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/create-web-call", post(api::create_web_call_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
