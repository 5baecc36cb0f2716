//! Relay HTTP adapter - REST API for the provider relay.
//!
//! Provides endpoints for:
//! - Listing providers and their models
//! - Chat, code assistance and image generation
//! - Reading and clearing per-session history
//! - Replacing provider credentials at runtime

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;

pub use handlers::{RelayAppState, SESSION_HEADER};
pub use routes::{relay_app, relay_router};
