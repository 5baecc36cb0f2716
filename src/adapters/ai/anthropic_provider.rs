//! Anthropic Provider - Implementation of ProviderAdapter for Anthropic's Claude API.
//!
//! Supports Claude 3 / 3.5 models (Sonnet, Opus, Haiku) through the Messages API.
//! Paid tier: requires an API key from https://console.anthropic.com/.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key).with_base_url("https://api.anthropic.com");
//! let provider = AnthropicProvider::new(config);
//! ```
//!
//! The system prompt travels in the top-level `system` field rather than as a
//! message.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::support::{expose, resolve_model, send_json, Credential};
use crate::domain::{
    Completion, ConversationTurn, ModelDescriptor, NormalizedResult, ProviderId, RelayError, Tier,
    TurnRole,
};
use crate::ports::ProviderAdapter;

/// Model used when the request leaves it blank.
pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

const MAX_TOKENS: u32 = 4096;

const ANTHROPIC_MODELS: &[ModelDescriptor] = &[
    ModelDescriptor::new("claude-3-5-sonnet-20241022", "Claude 3.5 Sonnet (Best)"),
    ModelDescriptor::new("claude-3-opus-20240229", "Claude 3 Opus"),
    ModelDescriptor::new("claude-3-haiku-20240307", "Claude 3 Haiku (Fastest)"),
];

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key; blank means unconfigured.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.anthropic.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.anthropic.com".to_string(),
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

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    credential: Credential,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider with the given configuration.
    pub fn new(config: AnthropicConfig) -> Self {
        let credential = Credential::new(config.api_key.expose_secret());
        Self {
            config,
            credential,
            client: Client::new(),
        }
    }

    /// Builds the messages endpoint URL.
    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    /// Converts turns and options into Anthropic's request format.
    fn to_anthropic_request(
        turns: &[ConversationTurn],
        system_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> AnthropicRequest {
        let messages = turns
            .iter()
            .map(|turn| AnthropicMessage {
                role: match turn.role() {
                    TurnRole::User => "user",
                    TurnRole::Assistant => "assistant",
                }
                .to_string(),
                content: turn.content().to_string(),
            })
            .collect();

        AnthropicRequest {
            model: model.to_string(),
            messages,
            system: Some(system_prompt.to_string()).filter(|s| !s.trim().is_empty()),
            max_tokens: MAX_TOKENS,
            temperature,
        }
    }

    async fn call(
        &self,
        turns: &[ConversationTurn],
        system_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<Completion, RelayError> {
        let api_key = self.credential.current().ok_or(RelayError::NotConfigured {
            provider: "Anthropic",
            hint: "Add it in Settings.",
        })?;

        let model = resolve_model(model, ANTHROPIC_DEFAULT_MODEL);
        let body = Self::to_anthropic_request(turns, system_prompt, model, temperature);

        tracing::debug!(
            provider = "anthropic",
            model,
            messages = body.messages.len(),
            "sending messages request"
        );

        let request = self
            .client
            .post(self.messages_url())
            .timeout(self.config.timeout)
            .header("x-api-key", expose(&api_key))
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&body);

        let response: AnthropicResponse = send_json("Anthropic", request).await?;

        Ok(Completion::new(Self::join_text(response)?, model))
    }

    /// Concatenates the reply's text blocks. A reply without any is malformed.
    fn join_text(response: AnthropicResponse) -> Result<String, RelayError> {
        let texts: Vec<String> = response
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect();

        if texts.is_empty() {
            return Err(RelayError::transport("No text in Anthropic response"));
        }
        Ok(texts.concat())
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn display_name(&self) -> &'static str {
        "Anthropic – Claude"
    }

    fn tier(&self) -> Tier {
        Tier::Paid
    }

    fn is_configured(&self) -> bool {
        self.credential.is_present()
    }

    fn available_models(&self) -> Vec<ModelDescriptor> {
        ANTHROPIC_MODELS.to_vec()
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

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_puts_system_prompt_at_top_level() {
        let turns = vec![
            ConversationTurn::user("hi"),
            ConversationTurn::assistant("hello"),
        ];
        let request = AnthropicProvider::to_anthropic_request(&turns, "be kind", "claude", 0.5);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["system"], "be kind");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][1]["role"], "assistant");
    }

    #[test]
    fn blank_system_prompt_is_not_serialized() {
        let turns = vec![ConversationTurn::user("hi")];
        let request = AnthropicProvider::to_anthropic_request(&turns, "", "claude", 0.5);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
    }

    #[test]
    fn reply_without_text_blocks_is_transport_error() {
        for body in [
            serde_json::json!({ "content": [] }),
            serde_json::json!({ "content": [{ "type": "tool_use", "id": "t1" }] }),
        ] {
            let response: AnthropicResponse = serde_json::from_value(body).unwrap();
            let err = AnthropicProvider::join_text(response).unwrap_err();
            assert_eq!(err.kind(), crate::domain::ErrorKind::Transport);
        }
    }

    #[test]
    fn messages_url_appends_version_path() {
        let provider =
            AnthropicProvider::new(AnthropicConfig::new("k").with_base_url("http://localhost:1"));
        assert_eq!(provider.messages_url(), "http://localhost:1/v1/messages");
    }

    #[tokio::test]
    async fn unconfigured_history_call_fails_fast() {
        let provider = AnthropicProvider::new(AnthropicConfig::default());
        let result = provider
            .chat_with_history(&[ConversationTurn::user("hi")], "", "", 0.7)
            .await;
        assert!(result.error_message().unwrap().contains("not configured"));
    }
}
