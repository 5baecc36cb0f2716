//! Data transfer objects for relay HTTP endpoints.
//!
//! Request bodies are read leniently: every field has a default and a body
//! that is not a JSON object is treated as `{}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::relay::parse_temperature;
use crate::domain::{
    ChatRequest, CodeAssistRequest, CodeTask, ImageRequest, ImageSize, NormalizedResult,
};

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatBody {
    pub message: String,
    pub provider: String,
    pub model: String,
    pub system_prompt: String,
    /// Number or numeric string; anything else means the default.
    pub temperature: Option<Value>,
    pub use_history: bool,
}

impl Default for ChatBody {
    fn default() -> Self {
        Self {
            message: String::new(),
            provider: "groq".to_string(),
            model: String::new(),
            system_prompt: String::new(),
            temperature: None,
            use_history: true,
        }
    }
}

impl From<ChatBody> for ChatRequest {
    fn from(body: ChatBody) -> Self {
        let temperature = parse_temperature(body.temperature.as_ref());
        ChatRequest::new(body.message.trim())
            .with_provider(body.provider)
            .with_model(body.model)
            .with_system_prompt(body.system_prompt)
            .with_temperature(f64::from(temperature))
            .with_history(body.use_history)
    }
}

/// Body of `POST /api/code`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CodeBody {
    pub code: String,
    pub task: String,
    pub language: String,
    pub provider: String,
    pub model: String,
}

impl Default for CodeBody {
    fn default() -> Self {
        Self {
            code: String::new(),
            task: "explain".to_string(),
            language: "python".to_string(),
            provider: "groq".to_string(),
            model: String::new(),
        }
    }
}

impl From<CodeBody> for CodeAssistRequest {
    fn from(body: CodeBody) -> Self {
        CodeAssistRequest::new(body.code.trim())
            .with_task(CodeTask::parse_or_default(&body.task))
            .with_language(body.language)
            .with_provider(body.provider)
            .with_model(body.model)
    }
}

/// Body of `POST /api/image`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageBody {
    pub prompt: String,
    pub model: String,
    pub size: String,
    pub quality: String,
}

impl Default for ImageBody {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            model: "pollinations".to_string(),
            size: ImageSize::DEFAULT.to_string(),
            quality: "standard".to_string(),
        }
    }
}

impl From<ImageBody> for ImageRequest {
    fn from(body: ImageBody) -> Self {
        ImageRequest::new(body.prompt.trim())
            .with_model(body.model)
            .with_size(ImageSize::parse_or_default(&body.size))
            .with_quality(body.quality)
    }
}

/// Body of `POST /api/configure`. Absent or blank keys leave a provider as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigureBody {
    pub groq_key: Option<String>,
    pub gemini_key: Option<String>,
    pub openai_key: Option<String>,
    pub anthropic_key: Option<String>,
    pub huggingface_key: Option<String>,
}

/// Decodes a body, treating anything unreadable as an empty object.
pub fn lenient_body<T>(bytes: &[u8]) -> T
where
    T: Default + for<'de> Deserialize<'de>,
{
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
        _ => T::default(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Outcome of a chat or code-assist request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<NormalizedResult> for RelayResponse {
    fn from(result: NormalizedResult) -> Self {
        match result {
            NormalizedResult::Success { text, model_used } => Self {
                success: true,
                response: Some(text),
                model: Some(model_used),
                error: None,
            },
            NormalizedResult::Failure { error_message } => Self {
                success: false,
                response: None,
                model: None,
                error: Some(error_message),
            },
        }
    }
}

/// Outcome of an image request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<NormalizedResult> for ImageResponse {
    fn from(result: NormalizedResult) -> Self {
        match result {
            NormalizedResult::Success { text, model_used } => Self {
                success: true,
                image_url: Some(text),
                model: Some(model_used),
                error: None,
            },
            NormalizedResult::Failure { error_message } => Self {
                success: false,
                image_url: None,
                model: None,
                error: Some(error_message),
            },
        }
    }
}

/// Generic acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RelayError;

    #[test]
    fn malformed_body_becomes_defaults() {
        let body: ChatBody = lenient_body(b"not json");
        assert_eq!(body.provider, "groq");
        assert!(body.use_history);

        let body: ChatBody = lenient_body(b"[1, 2, 3]");
        assert!(body.message.is_empty());
    }

    #[test]
    fn chat_body_parses_string_temperature() {
        let body: ChatBody = lenient_body(br#"{"message":" hi ","temperature":"1.5"}"#);
        let request = ChatRequest::from(body);
        assert_eq!(request.message, "hi");
        assert_eq!(request.temperature(), 1.5);
    }

    #[test]
    fn chat_body_garbage_temperature_uses_default() {
        let body: ChatBody = lenient_body(br#"{"message":"hi","temperature":"hot"}"#);
        assert_eq!(ChatRequest::from(body).temperature(), 0.7);
    }

    #[test]
    fn code_body_unknown_task_falls_back_to_explain() {
        let body: CodeBody = lenient_body(br#"{"code":"x","task":"refactor"}"#);
        let request = CodeAssistRequest::from(body);
        assert_eq!(request.task, CodeTask::Explain);
        assert_eq!(request.language, "python");
    }

    #[test]
    fn image_body_bad_size_uses_default() {
        let body: ImageBody = lenient_body(br#"{"prompt":"cat","size":"huge"}"#);
        let request = ImageRequest::from(body);
        assert_eq!(request.size, ImageSize::DEFAULT);
        assert_eq!(request.model, "pollinations");
    }

    #[test]
    fn relay_response_shapes() {
        let ok = serde_json::to_value(RelayResponse::from(NormalizedResult::success("hi", "m")))
            .unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "response": "hi", "model": "m"}));

        let failed = serde_json::to_value(RelayResponse::from(NormalizedResult::failure(
            RelayError::validation("Message is required"),
        )))
        .unwrap();
        assert_eq!(
            failed,
            serde_json::json!({"success": false, "error": "Message is required"})
        );
    }
}
