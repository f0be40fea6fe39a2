//! HTTP surface: one upload endpoint plus liveness.

pub mod handler;

pub use handler::{AppState, ProcessAudioResponse};

use crate::error::{RecapError, Result};
use crate::pipeline::AnalysisPipeline;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the application router.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/process_audio", post(handler::process_audio))
        .route("/healthz", get(handler::healthz))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener and serve until the process is stopped.
pub async fn run(
    listen_addr: &str,
    pipeline: Arc<AnalysisPipeline>,
    max_upload_bytes: usize,
) -> Result<()> {
    let state = AppState { pipeline };
    let app = router(state, max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .map_err(|e| RecapError::Server {
            message: format!("failed to bind {listen_addr}: {e}"),
        })?;

    info!(addr = %listen_addr, "recap listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| RecapError::Server {
            message: format!("server error: {e}"),
        })?;

    Ok(())
}
