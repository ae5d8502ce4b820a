/*!
 * HTTP front end of the translation service.
 *
 * - `POST /document/:id/translate` with form fields `targetLanguage` and
 *   `contentType`, authenticated by the `auth_token` cookie or a bearer token
 * - `GET /health`
 */

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;

use crate::documents::SessionStore;
use crate::translation::TranslationOrchestrator;

pub mod error;
pub mod routes;

pub use error::{ApiError, ErrorResponse};

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: TranslationOrchestrator,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(orchestrator: TranslationOrchestrator, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            orchestrator,
            sessions,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health_check))
        .route("/document/:id/translate", post(routes::translate_document))
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(bind_address: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler: run until the process is killed
        std::future::pending::<()>().await;
    }
}
