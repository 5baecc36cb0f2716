//! Plumbing shared by the provider adapters: the replaceable credential slot
//! and the send-and-normalize step for JSON APIs.

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::sync::RwLock;

use crate::domain::RelayError;

/// Runtime-replaceable API credential.
///
/// Readers take a clone of the current secret, so a replacement never
/// affects a call that already started.
#[derive(Debug, Default)]
pub struct Credential {
    slot: RwLock<Option<Secret<String>>>,
}

impl Credential {
    /// Creates a slot holding `key`, or an empty slot for blank input.
    pub fn new(key: &str) -> Self {
        Self {
            slot: RwLock::new(Self::normalize(key)),
        }
    }

    /// True iff a non-empty credential is present.
    pub fn is_present(&self) -> bool {
        self.read().is_some()
    }

    /// Clone of the current credential.
    pub fn current(&self) -> Option<Secret<String>> {
        self.read().clone()
    }

    /// Replaces the credential. Blank input leaves the slot unchanged.
    pub fn replace(&self, key: &str) {
        if let Some(secret) = Self::normalize(key) {
            let mut slot = match self.slot.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *slot = Some(secret);
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Secret<String>>> {
        match self.slot.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn normalize(key: &str) -> Option<Secret<String>> {
        let key = key.trim();
        if key.is_empty() {
            None
        } else {
            Some(Secret::new(key.to_string()))
        }
    }
}

/// Borrows the plaintext of a credential for a header or query parameter.
pub fn expose(secret: &Secret<String>) -> &str {
    secret.expose_secret()
}

/// Returns `model`, or `default` when it is blank.
pub fn resolve_model<'a>(model: &'a str, default: &'a str) -> &'a str {
    let model = model.trim();
    if model.is_empty() {
        default
    } else {
        model
    }
}

/// Sends a prepared request and decodes a JSON success body.
///
/// Non-2xx responses become [`RelayError::Remote`] with the body verbatim;
/// connection faults, timeouts and undecodable bodies become
/// [`RelayError::Transport`].
pub async fn send_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T, RelayError> {
    let response = request.send().await.map_err(|e| {
        let err = RelayError::from(e);
        tracing::warn!(provider, kind = ?err.kind(), error = %err, "provider request failed");
        err
    })?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let err = RelayError::remote(provider, body);
        tracing::warn!(
            provider,
            kind = ?err.kind(),
            status = status.as_u16(),
            "provider returned error status"
        );
        return Err(err);
    }

    serde_json::from_str(&body).map_err(|e| {
        let err = RelayError::transport(format!("Failed to parse {} response: {}", provider, e));
        tracing::warn!(
            provider,
            kind = ?err.kind(),
            error = %e,
            "failed to parse provider response"
        );
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credential_is_not_present() {
        assert!(!Credential::new("").is_present());
        assert!(!Credential::new("   ").is_present());
        assert!(!Credential::default().is_present());
    }

    #[test]
    fn replace_ignores_blank_input() {
        let credential = Credential::new("first");
        credential.replace("  ");
        assert_eq!(expose(&credential.current().unwrap()), "first");

        credential.replace("second");
        assert_eq!(expose(&credential.current().unwrap()), "second");
    }

    #[test]
    fn snapshot_survives_replacement() {
        let credential = Credential::new("old");
        let in_flight = credential.current().unwrap();
        credential.replace("new");
        assert_eq!(expose(&in_flight), "old");
    }

    #[test]
    fn resolve_model_falls_back_on_blank() {
        assert_eq!(resolve_model("", "default"), "default");
        assert_eq!(resolve_model("  ", "default"), "default");
        assert_eq!(resolve_model("custom", "default"), "custom");
    }
}
