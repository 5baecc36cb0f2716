//! Foundation module - Shared domain primitives.
//!
//! Identifiers and the error vocabulary used across the relay.

mod errors;
mod ids;

pub use errors::{ErrorKind, RelayError};
pub use ids::{ProviderId, SessionKey};
