//! Webhook receiver that verifies request signatures
//!
//! `POST /webhooks` answers 401 when the signature header is missing, 403
//! when it does not match the raw body (or is too old), and
//! `{"ok": true}` otherwise.

use anyhow::Context;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::Result;
use crate::signer::{Verifier, DEFAULT_SIGNATURE_HEADER};

/// Path the receiver listens on
pub const WEBHOOK_PATH: &str = "/webhooks";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Shared signing secret
    pub secret: String,
    /// Header carrying the signature
    pub header: String,
    /// Maximum signature age
    pub tolerance: Option<Duration>,
}

impl ServerConfig {
    /// Config with the default header and no age limit
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            header: DEFAULT_SIGNATURE_HEADER.to_string(),
            tolerance: None,
        }
    }
}

/// App state shared across handlers
struct AppState {
    verifier: Verifier,
    header: String,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiResponse {
    fn success() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(msg.into()),
        }
    }
}

/// Build the receiver's router
pub fn router(config: ServerConfig) -> Router {
    let mut verifier = Verifier::new(config.secret);
    if let Some(tolerance) = config.tolerance {
        verifier = verifier.with_tolerance(tolerance);
    }

    let state = AppState {
        verifier,
        header: config.header,
    };

    Router::new()
        .route("/health", get(health))
        .route(WEBHOOK_PATH, post(receive_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening for webhooks on http://{}{}", addr, WEBHOOK_PATH);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to port {port}"))?;

    axum::serve(listener, app)
        .await
        .context("Webhook server stopped")?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Verify the signature over the raw body
async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let signature = headers
        .get(state.header.as_str())
        .and_then(|value| value.to_str().ok());

    match state.verifier.verify(signature, &body) {
        Ok(()) => {
            info!("Accepted webhook ({} bytes)", body.len());
            (StatusCode::OK, Json(ApiResponse::success())).into_response()
        }
        Err(e) => {
            warn!("Rejected webhook: {}", e);
            let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::FORBIDDEN);
            (status, Json(ApiResponse::error(e.to_string()))).into_response()
        }
    }
}
