//! Axum router configuration for relay endpoints.

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    chat, clear_history, code_assist, configure, generate_image, get_history, health,
    list_providers, RelayAppState, SESSION_HEADER,
};
use crate::config::{CorsPolicy, ServerConfig};

/// Create the relay API router.
///
/// # Routes
///
/// - `GET /providers` - Provider catalog with live configuration state
/// - `POST /chat` - Chat, optionally with session history
/// - `POST /code` - Code assistance (explain, debug, generate, review)
/// - `POST /image` - Image generation
/// - `POST /clear` - Clear the caller's history
/// - `GET /history` - The caller's history
/// - `POST /configure` - Replace provider credentials
pub fn relay_routes() -> Router<RelayAppState> {
    Router::new()
        .route("/providers", get(list_providers))
        .route("/chat", post(chat))
        .route("/code", post(code_assist))
        .route("/image", post(generate_image))
        .route("/clear", post(clear_history))
        .route("/history", get(get_history))
        .route("/configure", post(configure))
}

/// Create the complete relay router: `/health` plus the API under `/api`.
///
/// # Example
///
/// ```ignore
/// let app = relay_router().with_state(RelayAppState::new(dispatcher));
/// ```
pub fn relay_router() -> Router<RelayAppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", relay_routes())
}

/// Relay router with state and the HTTP middleware stack applied.
///
/// CORS allows the configured origins; with none configured it is permissive
/// outside production and closed in production.
pub fn relay_app(state: RelayAppState, server: &ServerConfig) -> Router {
    let cors = match server.cors_policy() {
        CorsPolicy::Origins(origins) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
            ))
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers([SESSION_HEADER]),
        CorsPolicy::Permissive => CorsLayer::permissive(),
        CorsPolicy::Closed => CorsLayer::new(),
    };

    relay_router()
        .with_state(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
