//! Identifier types for sessions and providers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::errors::RelayError;

/// Opaque identifier correlating a client to its conversation history.
///
/// Keys are issued once (see [`SessionKey::generate`]) and stored client-side;
/// any non-empty string the client sends back is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Wraps an existing key. Returns `None` for empty or whitespace-only input.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Issues a fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text/code providers that can be selected per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Groq,
    Gemini,
    #[serde(rename = "huggingface")]
    HuggingFace,
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
}

impl ProviderId {
    /// All text providers, in catalog order.
    pub const ALL: [ProviderId; 5] = [
        ProviderId::Groq,
        ProviderId::Gemini,
        ProviderId::HuggingFace,
        ProviderId::OpenAI,
        ProviderId::Anthropic,
    ];

    /// Wire identifier used by clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Groq => "groq",
            ProviderId::Gemini => "gemini",
            ProviderId::HuggingFace => "huggingface",
            ProviderId::OpenAI => "openai",
            ProviderId::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| RelayError::UnknownProvider(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_rejects_blank_input() {
        assert!(SessionKey::new("").is_none());
        assert!(SessionKey::new("   ").is_none());
        assert_eq!(SessionKey::new(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn generated_session_keys_are_unique() {
        assert_ne!(SessionKey::generate(), SessionKey::generate());
    }

    #[test]
    fn provider_id_round_trips_through_wire_name() {
        for id in ProviderId::ALL {
            assert_eq!(id.as_str().parse::<ProviderId>().unwrap(), id);
        }
    }

    #[test]
    fn unknown_provider_id_names_the_input() {
        let err = "mistral".parse::<ProviderId>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown provider: mistral");
    }

    #[test]
    fn provider_id_serializes_lowercase() {
        let json = serde_json::to_string(&ProviderId::HuggingFace).unwrap();
        assert_eq!(json, "\"huggingface\"");
        let json = serde_json::to_string(&ProviderId::OpenAI).unwrap();
        assert_eq!(json, "\"openai\"");
    }
}
