//! HTTP adapters - REST API implementations.

pub mod relay;

// Re-export key types for convenience
pub use relay::{relay_app, relay_router};
pub use relay::RelayAppState;
