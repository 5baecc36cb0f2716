//! HuggingFace Provider - Implementation of ProviderAdapter for the
//! HuggingFace Inference API.
//!
//! Free tier: token from https://huggingface.co/settings/tokens.
//!
//! The Inference API takes a single text prompt, so the system prompt and the
//! user message are folded into an instruction template and multi-turn calls
//! collapse to the most recent user message. Cold-starting models can be slow,
//! hence the longer default timeout.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::support::{expose, resolve_model, send_json, Credential};
use crate::domain::{
    latest_user_message, Completion, ConversationTurn, ModelDescriptor, NormalizedResult,
    ProviderId, RelayError, Tier,
};
use crate::ports::ProviderAdapter;

/// Model used when the request leaves it blank.
pub const HUGGINGFACE_DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";

/// System prompt substituted when the caller supplies none.
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

const MAX_NEW_TOKENS: u32 = 1024;

/// The Inference API rejects a temperature of exactly zero.
const MIN_TEMPERATURE: f32 = 0.01;

const HUGGINGFACE_MODELS: &[ModelDescriptor] = &[
    ModelDescriptor::new("mistralai/Mistral-7B-Instruct-v0.3", "Mistral 7B Instruct – FREE"),
    ModelDescriptor::new("HuggingFaceH4/zephyr-7b-beta", "Zephyr 7B Beta – FREE"),
    ModelDescriptor::new("microsoft/Phi-3-mini-4k-instruct", "Phi-3 Mini 4K – FREE"),
];

/// Configuration for the HuggingFace provider.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    /// Access token; blank means unconfigured.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api-inference.huggingface.co).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HuggingFaceConfig {
    /// Creates a new configuration with the given access token.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api-inference.huggingface.co".to_string(),
            timeout: Duration::from_secs(90),
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

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// HuggingFace Inference API provider implementation.
pub struct HuggingFaceProvider {
    config: HuggingFaceConfig,
    credential: Credential,
    client: Client,
}

impl HuggingFaceProvider {
    /// Creates a new HuggingFace provider with the given configuration.
    pub fn new(config: HuggingFaceConfig) -> Self {
        let credential = Credential::new(config.api_key.expose_secret());
        Self {
            config,
            credential,
            client: Client::new(),
        }
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.config.base_url, model)
    }

    /// Wraps the message in the instruction template.
    fn format_prompt(message: &str, system_prompt: &str) -> String {
        let system = if system_prompt.trim().is_empty() {
            DEFAULT_SYSTEM_PROMPT
        } else {
            system_prompt
        };
        format!("<s>[INST] <<SYS>>\n{system}\n<</SYS>>\n\n{message} [/INST]")
    }

    /// Pulls the generated text out of either response shape: a list of
    /// generations or a single object. An object without `generated_text`
    /// is returned as raw JSON; a list must carry at least one generation.
    fn extract_text(response: Value) -> Result<String, RelayError> {
        let generated = match &response {
            Value::Array(items) => items
                .first()
                .and_then(|item| item.get("generated_text"))
                .ok_or_else(|| RelayError::transport("No generations in HuggingFace response"))?,
            Value::Object(_) => match response.get("generated_text") {
                Some(generated) => generated,
                None => return Ok(response.to_string()),
            },
            _ => return Err(RelayError::transport("Unexpected HuggingFace response shape")),
        };

        Ok(match generated {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    async fn call(
        &self,
        message: &str,
        system_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<Completion, RelayError> {
        let api_key = self.credential.current().ok_or(RelayError::NotConfigured {
            provider: "HuggingFace",
            hint: "Get a FREE token at https://huggingface.co/settings/tokens",
        })?;

        let model = resolve_model(model, HUGGINGFACE_DEFAULT_MODEL);
        let body = InferenceRequest {
            inputs: Self::format_prompt(message, system_prompt),
            parameters: InferenceParameters {
                temperature: temperature.max(MIN_TEMPERATURE),
                max_new_tokens: MAX_NEW_TOKENS,
                return_full_text: false,
            },
        };

        tracing::debug!(provider = "huggingface", model, "sending inference request");

        let request = self
            .client
            .post(self.model_url(model))
            .timeout(self.config.timeout)
            .bearer_auth(expose(&api_key))
            .json(&body);

        let response: Value = send_json("HuggingFace", request).await?;

        Ok(Completion::new(Self::extract_text(response)?, model))
    }
}

#[async_trait]
impl ProviderAdapter for HuggingFaceProvider {
    fn id(&self) -> ProviderId {
        ProviderId::HuggingFace
    }

    fn display_name(&self) -> &'static str {
        "HuggingFace Inference"
    }

    fn tier(&self) -> Tier {
        Tier::Free
    }

    fn is_configured(&self) -> bool {
        self.credential.is_present()
    }

    fn available_models(&self) -> Vec<ModelDescriptor> {
        HUGGINGFACE_MODELS.to_vec()
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
        self.call(message, system_prompt, model, temperature)
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
        let message = latest_user_message(history).unwrap_or_default();
        self.chat(message, system_prompt, model, temperature).await
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    temperature: f32,
    max_new_tokens: u32,
    return_full_text: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use serde_json::json;

    #[test]
    fn prompt_template_wraps_system_and_message() {
        let prompt = HuggingFaceProvider::format_prompt("Hi", "Be nice");
        assert_eq!(prompt, "<s>[INST] <<SYS>>\nBe nice\n<</SYS>>\n\nHi [/INST]");
    }

    #[test]
    fn blank_system_prompt_uses_default() {
        let prompt = HuggingFaceProvider::format_prompt("Hi", "");
        assert!(prompt.contains(DEFAULT_SYSTEM_PROMPT));
    }

    #[test]
    fn extracts_text_from_list_response() {
        let text = HuggingFaceProvider::extract_text(json!([{ "generated_text": "hello" }]));
        assert_eq!(text.unwrap(), "hello");
    }

    #[test]
    fn extracts_text_from_object_response() {
        let text = HuggingFaceProvider::extract_text(json!({ "generated_text": "hey" }));
        assert_eq!(text.unwrap(), "hey");
    }

    #[test]
    fn object_without_generated_text_returns_raw_json() {
        let text = HuggingFaceProvider::extract_text(json!({ "estimated_time": 20.0 }));
        assert!(text.unwrap().contains("estimated_time"));
    }

    #[test]
    fn list_without_generation_is_transport_error() {
        for response in [json!([]), json!(["text"]), json!([{ "score": 0.2 }])] {
            let err = HuggingFaceProvider::extract_text(response).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Transport);
        }
    }

    #[test]
    fn scalar_response_is_transport_error() {
        let err = HuggingFaceProvider::extract_text(json!("oops")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn default_timeout_is_longer_than_other_providers() {
        assert_eq!(HuggingFaceConfig::default().timeout, Duration::from_secs(90));
    }

    #[tokio::test]
    async fn unconfigured_history_call_points_at_token_page() {
        let provider = HuggingFaceProvider::new(HuggingFaceConfig::default());
        let history = vec![
            ConversationTurn::user("first"),
            ConversationTurn::assistant("reply"),
            ConversationTurn::user("second"),
        ];
        let result = provider.chat_with_history(&history, "", "", 0.0).await;
        assert!(result
            .error_message()
            .unwrap()
            .contains("huggingface.co/settings/tokens"));
    }
}
