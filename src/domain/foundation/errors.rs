//! Error types for the relay.
//!
//! Every variant is a terminal per-request outcome. None of them escape the
//! request flow as a panic or an HTTP error status: they are folded into
//! [`NormalizedResult::Failure`](crate::domain::NormalizedResult) and the
//! `Display` text becomes the user-facing error message.

use thiserror::Error;

/// Failure category, recorded on log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty input, rejected before any adapter call.
    Validation,
    /// Adapter lacks a required credential.
    Configuration,
    /// Non-2xx response from the external API.
    Remote,
    /// Network, timeout or malformed-response fault.
    Transport,
    /// Unknown provider or model identifier.
    Routing,
}

/// Errors produced while relaying a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Required input was empty or whitespace-only.
    #[error("{0}")]
    Validation(String),

    /// The adapter has no credential.
    #[error("{provider} API key not configured. {hint}")]
    NotConfigured {
        /// Human-readable provider name.
        provider: &'static str,
        /// Where to obtain a key.
        hint: &'static str,
    },

    /// The provider answered with a non-success status; body is surfaced verbatim.
    #[error("{provider} API error: {body}")]
    Remote {
        /// Human-readable provider name.
        provider: &'static str,
        /// Raw error body returned by the provider.
        body: String,
    },

    /// Timeout, connection failure or unparseable response.
    #[error("{0}")]
    Transport(String),

    /// No adapter is registered under this id.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// The image adapter does not know this model.
    #[error("Unknown image model: {0}")]
    UnknownImageModel(String),
}

impl RelayError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a remote error.
    pub fn remote(provider: &'static str, body: impl Into<String>) -> Self {
        Self::Remote {
            provider,
            body: body.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Returns the failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::Validation(_) => ErrorKind::Validation,
            RelayError::NotConfigured { .. } => ErrorKind::Configuration,
            RelayError::Remote { .. } => ErrorKind::Remote,
            RelayError::Transport(_) => ErrorKind::Transport,
            RelayError::UnknownProvider(_) | RelayError::UnknownImageModel(_) => {
                ErrorKind::Routing
            }
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::transport(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            RelayError::transport(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            RelayError::transport(format!("Malformed response: {}", err))
        } else {
            RelayError::transport(err.to_string())
        }
    }
}
