//! REST endpoints for letter classification.

use std::any::Any;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::pipeline::{ClassificationRequest, ClassificationResult, LetterProcessor};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub processor: LetterProcessor,
    /// Body size cap, echoed back in 413 responses.
    pub max_body_bytes: usize,
}

/// Build the Axum router with the health and explain routes.
pub fn api_routes(config: &ServerConfig) -> Router {
    let state = AppState {
        processor: LetterProcessor::default(),
        max_body_bytes: config.max_body_bytes,
    };

    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/explain", post(explain))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors)
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// Bind the configured address and serve until the process exits.
pub async fn serve(config: ServerConfig) -> crate::error::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, max_body_bytes = config.max_body_bytes, "Letter Lens server started");

    axum::serve(listener, api_routes(&config)).await?;
    Ok(())
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

// ── Explain ─────────────────────────────────────────────────────────────

/// POST /explain
///
/// Body: `{"text": "...", "hint": "..."}`. Bodies that are not JSON or
/// lack a string `text` are rejected before the pipeline runs.
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
async fn explain(
    State(state): State<AppState>,
    payload: Result<Json<ClassificationRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(status = %rejection.status(), "Rejected explain request");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge {
                limit: state.max_body_bytes,
            }
        } else {
            ApiError::InvalidRequest(rejection.body_text())
        }
    })?;

    let result = state.processor.process_request(&request);

    // Letter content is never logged.
    info!(
        category = %result.category,
        has_deadline = result.deadline.is_some(),
        has_hint = request.hint.is_some(),
        text_len = request.text.len(),
        "Letter classified"
    );

    Ok(Json(result))
}

/// Turn a handler panic into a 500 with the usual error body.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "internal error".to_string()
    };
    error!(%message, "Unhandled panic in request handler");
    ApiError::Internal(message).into_response()
}
