//! OpenAI Provider - Implementation of ProviderAdapter for OpenAI's API.
//!
//! Supports GPT-4o, GPT-4 Turbo and GPT-3.5 through the chat-completions
//! endpoint. Paid tier: requires an API key from
//! https://platform.openai.com/api-keys.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key).with_base_url("https://api.openai.com/v1");
//! let provider = OpenAIProvider::new(config);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use super::chat_completions::{self, Endpoint};
use super::support::{resolve_model, Credential};
use crate::domain::{
    Completion, ConversationTurn, ModelDescriptor, NormalizedResult, ProviderId, RelayError, Tier,
};
use crate::ports::ProviderAdapter;

/// Model used when the request leaves it blank.
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";

const OPENAI_MODELS: &[ModelDescriptor] = &[
    ModelDescriptor::new("gpt-4o", "GPT-4o (Best)"),
    ModelDescriptor::new("gpt-4-turbo-preview", "GPT-4 Turbo"),
    ModelDescriptor::new("gpt-3.5-turbo", "GPT-3.5 Turbo (Cheapest)"),
];

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key; blank means unconfigured.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    credential: Credential,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new OpenAI provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        let credential = Credential::new(config.api_key.expose_secret());
        Self {
            config,
            credential,
            client: Client::new(),
        }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    async fn call(
        &self,
        turns: &[ConversationTurn],
        system_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<Completion, RelayError> {
        let api_key = self.credential.current().ok_or(RelayError::NotConfigured {
            provider: "OpenAI",
            hint: "Add it in Settings.",
        })?;

        let endpoint = Endpoint {
            provider: "OpenAI",
            url: self.completions_url(),
            timeout: self.config.timeout,
            api_key: &api_key,
        };
        let messages = chat_completions::build_messages(system_prompt, turns);
        let model = resolve_model(model, OPENAI_DEFAULT_MODEL);

        chat_completions::complete(&self.client, endpoint, model, messages, temperature).await
    }
}

#[async_trait]
impl ProviderAdapter for OpenAIProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAI
    }

    fn display_name(&self) -> &'static str {
        "OpenAI – ChatGPT"
    }

    fn tier(&self) -> Tier {
        Tier::Paid
    }

    fn is_configured(&self) -> bool {
        self.credential.is_present()
    }

    fn available_models(&self) -> Vec<ModelDescriptor> {
        OPENAI_MODELS.to_vec()
    }

    fn reconfigure(&self, credential: &str) {
        self.credential.replace(credential);
    }

    async fn chat(
        &self,
        message: &str,
        system_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> NormalizedResult {
        let turns = [ConversationTurn::user(message)];
        self.call(&turns, system_prompt, model, temperature)
            .await
            .into()
    }

    async fn chat_with_history(
        &self,
        history: &[ConversationTurn],
        system_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> NormalizedResult {
        self.call(history, system_prompt, model, temperature)
            .await
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key.expose_secret(), "test-key");
    }

    #[test]
    fn completions_url_appends_resource() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k").with_base_url("http://x/v1"));
        assert_eq!(provider.completions_url(), "http://x/v1/chat/completions");
    }

    #[test]
    fn provider_is_paid_tier() {
        let provider = OpenAIProvider::new(OpenAIConfig::default());
        assert_eq!(provider.tier(), Tier::Paid);
        assert_eq!(provider.available_models()[0].id, OPENAI_DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn unconfigured_code_assist_fails_fast() {
        let provider = OpenAIProvider::new(OpenAIConfig::default());
        let result = provider
            .code_assist("print(1)", crate::domain::CodeTask::Review, "python", "")
            .await;
        assert_eq!(
            result.error_message(),
            Some("OpenAI API key not configured. Add it in Settings.")
        );
    }
}
