//! HTTP surface
//!
//! One chat route parameterized by a provider adapter, plus a health probe.
//! Every adapter error is converted into a JSON envelope at this boundary;
//! nothing propagates as an unhandled fault and nothing is retried. Wrong
//! methods fall through to axum's 405. CORS is enabled only for the Kimi
//! variant, matching the deployments that serve browser clients directly.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    config::{ProviderKind, RelayConfig},
    error::{RelayError, Result},
    messages::ChatMessage,
    providers::{ProviderAdapter, ProviderAdapterFactory},
};

/// Shared state for route handlers
pub struct AppState {
    adapter: Box<dyn ProviderAdapter>,
}

/// Build the application router from the resolved configuration
///
/// # Errors
///
/// Returns an error if the provider adapter cannot be constructed.
pub fn app(config: &RelayConfig) -> Result<Router> {
    let adapter = ProviderAdapterFactory::create(config)?;
    Ok(router(adapter, config.provider == ProviderKind::Kimi))
}

/// Build the router around an adapter, optionally with CORS
pub fn router(adapter: Box<dyn ProviderAdapter>, cors: bool) -> Router {
    let state = Arc::new(AppState { adapter });

    let chat_routes = if cors {
        // Browsers preflight the chat call; answer plain OPTIONS with 200 as
        // well so non-preflight probes succeed.
        post(chat).options(preflight)
    } else {
        post(chat)
    };

    let mut router = Router::new()
        .route("/api/chat", chat_routes)
        .route("/health", get(health))
        .with_state(state);

    if cors {
        router = router.layer(cors_layer());
    }
    router
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
}

/// Request body for the chat route
///
/// `messages` is optional so its absence maps to the documented 400 body
/// rather than a generic deserialization rejection.
#[derive(Debug, Deserialize)]
struct ChatRequest {
    messages: Option<Vec<ChatMessage>>,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> impl IntoResponse {
    let Some(messages) = body.messages else {
        return error_response(&RelayError::MissingMessages);
    };

    match state.adapter.complete(&messages).await {
        Ok(ai_message) => (
            StatusCode::OK,
            Json(json!({ "success": true, "aiMessage": ai_message })),
        ),
        Err(err) => {
            tracing::warn!(provider = state.adapter.provider(), error = %err, "chat request failed");
            error_response(&err)
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Map an error to its HTTP status and JSON envelope
fn error_response(err: &RelayError) -> (StatusCode, Json<serde_json::Value>) {
    match err {
        RelayError::MissingMessages => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        ),
        RelayError::MalformedInput(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": err.to_string() })),
        ),
        RelayError::ProviderRefused { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": err.to_string() })),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": format!("AI request failed: {err}") })),
        ),
    }
}
