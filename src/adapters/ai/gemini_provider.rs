//! Gemini Provider - Implementation of ProviderAdapter for Google's Gemini API.
//!
//! Free tier available at https://aistudio.google.com/app/apikey.
//!
//! Gemini names the assistant role `model` and carries the system prompt in a
//! separate `systemInstruction` field. The API key travels as a `key` query
//! parameter.

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
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

const MAX_OUTPUT_TOKENS: u32 = 8192;

const GEMINI_MODELS: &[ModelDescriptor] = &[
    ModelDescriptor::new("gemini-2.0-flash-lite", "Gemini 2.0 Flash Lite (Fastest) – FREE"),
    ModelDescriptor::new("gemini-1.5-flash", "Gemini 1.5 Flash – FREE"),
    ModelDescriptor::new("gemini-1.5-pro", "Gemini 1.5 Pro – FREE (limited)"),
];

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; blank means unconfigured.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://generativelanguage.googleapis.com/v1beta).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
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

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Google Gemini provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    credential: Credential,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let credential = Credential::new(config.api_key.expose_secret());
        Self {
            config,
            credential,
            client: Client::new(),
        }
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, model)
    }

    /// Maps our roles onto Gemini's vocabulary.
    const fn convert_role(role: TurnRole) -> &'static str {
        match role {
            TurnRole::User => "user",
            TurnRole::Assistant => "model",
        }
    }

    fn build_request(
        turns: &[ConversationTurn],
        system_prompt: &str,
        temperature: f32,
    ) -> GeminiRequest {
        let contents = turns
            .iter()
            .map(|turn| GeminiContent {
                role: Some(Self::convert_role(turn.role()).to_string()),
                parts: vec![Part {
                    text: turn.content().to_string(),
                }],
            })
            .collect();

        let system_instruction = if system_prompt.trim().is_empty() {
            None
        } else {
            Some(GeminiContent {
                role: None,
                parts: vec![Part {
                    text: system_prompt.to_string(),
                }],
            })
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
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
            provider: "Gemini",
            hint: "Get a FREE key at https://aistudio.google.com/app/apikey",
        })?;

        let model = resolve_model(model, GEMINI_DEFAULT_MODEL);
        let body = Self::build_request(turns, system_prompt, temperature);

        tracing::debug!(
            provider = "gemini",
            model,
            contents = body.contents.len(),
            "sending generateContent request"
        );

        let request = self
            .client
            .post(self.generate_url(model))
            .timeout(self.config.timeout)
            .query(&[("key", expose(&api_key))])
            .json(&body);

        let response: GeminiResponse = send_json("Gemini", request).await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| RelayError::transport("No candidates in Gemini response"))?;

        Ok(Completion::new(text, model))
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn tier(&self) -> Tier {
        Tier::Free
    }

    fn is_configured(&self) -> bool {
        self.credential.is_present()
    }

    fn available_models(&self) -> Vec<ModelDescriptor> {
        GEMINI_MODELS.to_vec()
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

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_turns_use_model_role() {
        let turns = vec![
            ConversationTurn::user("hi"),
            ConversationTurn::assistant("hello"),
            ConversationTurn::user("how are you"),
        ];
        let json = serde_json::to_value(GeminiProvider::build_request(&turns, "", 0.4)).unwrap();

        let roles: Vec<_> = json["contents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["role"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert!(json.get("systemInstruction").is_none());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
    }

    #[test]
    fn system_prompt_goes_to_system_instruction() {
        let turns = vec![ConversationTurn::user("hi")];
        let json =
            serde_json::to_value(GeminiProvider::build_request(&turns, "be terse", 0.4)).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be terse");
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn generate_url_embeds_model() {
        let provider =
            GeminiProvider::new(GeminiConfig::new("k").with_base_url("http://localhost:1/v1beta"));
        assert_eq!(
            provider.generate_url("gemini-1.5-pro"),
            "http://localhost:1/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[tokio::test]
    async fn unconfigured_chat_points_at_key_page() {
        let provider = GeminiProvider::new(GeminiConfig::default());
        let result = provider.chat("hi", "", "", 0.7).await;
        assert!(result
            .error_message()
            .unwrap()
            .contains("aistudio.google.com"));
    }
}
