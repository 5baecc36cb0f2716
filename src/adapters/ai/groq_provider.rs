//! Groq Provider - Implementation of ProviderAdapter for Groq's free tier.
//!
//! Groq serves open models (LLaMA-3, Mixtral, Gemma2) behind an
//! OpenAI-compatible chat-completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GroqConfig::new(api_key).with_base_url("https://api.groq.com/openai/v1");
//! let provider = GroqProvider::new(config);
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
pub const GROQ_DEFAULT_MODEL: &str = "llama3-70b-8192";

const GROQ_MODELS: &[ModelDescriptor] = &[
    ModelDescriptor::new("llama3-70b-8192", "LLaMA-3 70B (Fast & Smart) – FREE"),
    ModelDescriptor::new("llama3-8b-8192", "LLaMA-3 8B (Fastest) – FREE"),
    ModelDescriptor::new("mixtral-8x7b-32768", "Mixtral 8x7B 32K context – FREE"),
    ModelDescriptor::new("gemma2-9b-it", "Gemma2 9B (Google) – FREE"),
];

/// Configuration for the Groq provider.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key; blank means unconfigured.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.groq.com/openai/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GroqConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.groq.com/openai/v1".to_string(),
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

impl Default for GroqConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Groq API provider implementation.
pub struct GroqProvider {
    config: GroqConfig,
    credential: Credential,
    client: Client,
}

impl GroqProvider {
    /// Creates a new Groq provider with the given configuration.
    pub fn new(config: GroqConfig) -> Self {
        let credential = Credential::new(config.api_key.expose_secret());
        Self {
            config,
            credential,
            client: Client::new(),
        }
    }

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
            provider: "Groq",
            hint: "Get a FREE key at https://console.groq.com/",
        })?;

        let endpoint = Endpoint {
            provider: "Groq",
            url: self.completions_url(),
            timeout: self.config.timeout,
            api_key: &api_key,
        };
        let messages = chat_completions::build_messages(system_prompt, turns);
        let model = resolve_model(model, GROQ_DEFAULT_MODEL);

        chat_completions::complete(&self.client, endpoint, model, messages, temperature).await
    }
}

#[async_trait]
impl ProviderAdapter for GroqProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Groq
    }

    fn display_name(&self) -> &'static str {
        "Groq – LLaMA/Mixtral"
    }

    fn tier(&self) -> Tier {
        Tier::Free
    }

    fn is_configured(&self) -> bool {
        self.credential.is_present()
    }

    fn available_models(&self) -> Vec<ModelDescriptor> {
        GROQ_MODELS.to_vec()
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
