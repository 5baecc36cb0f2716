//! HTTP handlers for relay endpoints.
//!
//! Provider outcomes are always reported with status 200; the JSON body says
//! whether the call succeeded.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use http::{header::HeaderName, HeaderMap};

use crate::application::Dispatcher;
use crate::domain::{ProviderId, SessionKey};

use super::dto::{
    lenient_body, ChatBody, CodeBody, ConfigureBody, HealthResponse, ImageBody, ImageResponse,
    RelayResponse, SuccessResponse,
};

/// Header carrying the client's session key.
pub const SESSION_HEADER: HeaderName = HeaderName::from_static("x-session-id");

/// Application state for relay endpoints.
#[derive(Clone)]
pub struct RelayAppState {
    /// Dispatcher shared by every request
    pub dispatcher: Arc<Dispatcher>,
}

impl RelayAppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

/// Reads the session key from the request, issuing a new one if absent.
fn session_key(headers: &HeaderMap) -> SessionKey {
    headers
        .get(&SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(SessionKey::new)
        .unwrap_or_else(SessionKey::generate)
}

fn session_header(key: &SessionKey) -> [(HeaderName, String); 1] {
    [(SESSION_HEADER, key.as_str().to_string())]
}

/// Liveness probe.
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Provider catalog.
///
/// GET /api/providers
pub async fn list_providers(State(state): State<RelayAppState>) -> impl IntoResponse {
    Json(state.dispatcher.list_providers())
}

/// Chat with a provider.
///
/// POST /api/chat
pub async fn chat(
    State(state): State<RelayAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let session = session_key(&headers);
    let body: ChatBody = lenient_body(&body);

    let result = state.dispatcher.route_chat(&session, body.into()).await;

    (session_header(&session), Json(RelayResponse::from(result)))
}

/// Code assistance.
///
/// POST /api/code
pub async fn code_assist(State(state): State<RelayAppState>, body: Bytes) -> impl IntoResponse {
    let body: CodeBody = lenient_body(&body);
    let result = state.dispatcher.route_code_assist(body.into()).await;
    Json(RelayResponse::from(result))
}

/// Image generation.
///
/// POST /api/image
pub async fn generate_image(State(state): State<RelayAppState>, body: Bytes) -> impl IntoResponse {
    let body: ImageBody = lenient_body(&body);
    let result = state.dispatcher.route_image_generate(body.into()).await;
    Json(ImageResponse::from(result))
}

/// Clear the caller's conversation.
///
/// POST /api/clear
pub async fn clear_history(
    State(state): State<RelayAppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let session = session_key(&headers);
    state.dispatcher.clear_history(&session).await;

    (
        session_header(&session),
        Json(SuccessResponse::ok("Conversation cleared")),
    )
}

/// The caller's conversation so far.
///
/// GET /api/history
pub async fn get_history(
    State(state): State<RelayAppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let session = session_key(&headers);
    let history = state.dispatcher.get_history(&session).await;

    (session_header(&session), Json(history))
}

/// Replace provider credentials.
///
/// POST /api/configure
pub async fn configure(State(state): State<RelayAppState>, body: Bytes) -> impl IntoResponse {
    let body: ConfigureBody = lenient_body(&body);

    let updates = [
        (ProviderId::Groq, body.groq_key),
        (ProviderId::Gemini, body.gemini_key),
        (ProviderId::OpenAI, body.openai_key),
        (ProviderId::Anthropic, body.anthropic_key),
        (ProviderId::HuggingFace, body.huggingface_key),
    ];

    for (provider, key) in updates {
        if let Some(key) = key {
            state.dispatcher.reconfigure(provider, &key);
        }
    }

    Json(SuccessResponse::ok("API keys updated successfully!"))
}
