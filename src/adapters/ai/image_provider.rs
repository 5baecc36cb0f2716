//! Image Provider - Implementation of ImageGenerator.
//!
//! Two models:
//!
//! - `pollinations`: free, keyless. The image URL is built locally from the
//!   prompt, no request is made.
//! - `dall-e-3`: OpenAI Images API, needs the OpenAI key.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::support::{expose, resolve_model, send_json, Credential};
use crate::domain::{Completion, ImageRequest, ModelDescriptor, NormalizedResult, RelayError};
use crate::ports::ImageGenerator;

/// Keyless model, also used when the request leaves the model blank.
pub const POLLINATIONS_MODEL: &str = "pollinations";

/// OpenAI's image model.
pub const DALL_E_MODEL: &str = "dall-e-3";

const IMAGE_MODELS: &[ModelDescriptor] = &[
    ModelDescriptor::new(POLLINATIONS_MODEL, "Pollinations.ai (FREE, no key)"),
    ModelDescriptor::new(DALL_E_MODEL, "DALL-E 3 (OpenAI key required)"),
];

/// Configuration for the image provider.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// OpenAI key for DALL-E; blank leaves only the free model usable.
    openai_api_key: Secret<String>,
    /// Base URL of the OpenAI API (default: https://api.openai.com/v1).
    pub openai_base_url: String,
    /// Base URL of Pollinations (default: https://image.pollinations.ai).
    pub pollinations_base_url: String,
    /// Request timeout for DALL-E.
    pub timeout: Duration,
}

impl ImageConfig {
    /// Creates a new configuration with the given OpenAI key.
    pub fn new(openai_api_key: impl Into<String>) -> Self {
        Self {
            openai_api_key: Secret::new(openai_api_key.into()),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            pollinations_base_url: "https://image.pollinations.ai".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the OpenAI base URL.
    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = url.into();
        self
    }

    /// Sets the Pollinations base URL.
    pub fn with_pollinations_base_url(mut self, url: impl Into<String>) -> Self {
        self.pollinations_base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Image generation adapter.
pub struct ImageProvider {
    config: ImageConfig,
    openai_credential: Credential,
    client: Client,
}

impl ImageProvider {
    /// Creates a new image provider with the given configuration.
    pub fn new(config: ImageConfig) -> Self {
        let openai_credential = Credential::new(config.openai_api_key.expose_secret());
        Self {
            config,
            openai_credential,
            client: Client::new(),
        }
    }

    /// Builds the Pollinations URL for `request`.
    fn pollinations_url(&self, request: &ImageRequest) -> String {
        format!(
            "{}/prompt/{}?width={}&height={}&nologo=true",
            self.config.pollinations_base_url,
            urlencoding::encode(&request.prompt),
            request.size.width,
            request.size.height,
        )
    }

    async fn dall_e(&self, request: &ImageRequest) -> Result<Completion, RelayError> {
        let api_key = self
            .openai_credential
            .current()
            .ok_or(RelayError::NotConfigured {
                provider: "OpenAI",
                hint: "DALL-E 3 needs an OpenAI key. Use Pollinations for free images.",
            })?;

        let body = ImageGenerationRequest {
            model: DALL_E_MODEL.to_string(),
            prompt: request.prompt.clone(),
            n: 1,
            size: request.size.to_string(),
            quality: request.quality.clone(),
        };

        tracing::debug!(
            provider = "openai",
            model = DALL_E_MODEL,
            size = %request.size,
            "sending image generation request"
        );

        let http_request = self
            .client
            .post(format!("{}/images/generations", self.config.openai_base_url))
            .timeout(self.config.timeout)
            .bearer_auth(expose(&api_key))
            .json(&body);

        let response: ImageGenerationResponse = send_json("OpenAI", http_request).await?;

        let url = response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| RelayError::transport("No image in OpenAI response"))?;

        Ok(Completion::new(url, DALL_E_MODEL))
    }
}

#[async_trait]
impl ImageGenerator for ImageProvider {
    fn is_configured(&self) -> bool {
        true
    }

    fn available_models(&self) -> Vec<ModelDescriptor> {
        IMAGE_MODELS.to_vec()
    }

    fn reconfigure(&self, credential: &str) {
        self.openai_credential.replace(credential);
    }

    async fn generate_image(&self, request: &ImageRequest) -> NormalizedResult {
        match resolve_model(&request.model, POLLINATIONS_MODEL) {
            POLLINATIONS_MODEL => {
                NormalizedResult::success(self.pollinations_url(request), POLLINATIONS_MODEL)
            }
            DALL_E_MODEL => self.dall_e(request).await.into(),
            other => RelayError::UnknownImageModel(other.to_string()).into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest {
    model: String,
    prompt: String,
    n: u32,
    size: String,
    quality: String,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageSize;

    #[tokio::test]
    async fn pollinations_builds_url_without_credentials() {
        let provider = ImageProvider::new(ImageConfig::default());
        let request = ImageRequest::new("a red fox").with_size(ImageSize {
            width: 512,
            height: 768,
        });

        let result = provider.generate_image(&request).await;

        assert_eq!(
            result.text(),
            Some("https://image.pollinations.ai/prompt/a%20red%20fox?width=512&height=768&nologo=true")
        );
        assert_eq!(result.model_used(), Some(POLLINATIONS_MODEL));
    }

    #[tokio::test]
    async fn blank_model_falls_back_to_pollinations() {
        let provider = ImageProvider::new(ImageConfig::default());
        let result = provider
            .generate_image(&ImageRequest::new("cat").with_model(""))
            .await;
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn dall_e_without_key_fails_fast() {
        let provider = ImageProvider::new(ImageConfig::default());
        let result = provider
            .generate_image(&ImageRequest::new("cat").with_model(DALL_E_MODEL))
            .await;
        assert!(result.error_message().unwrap().contains("not configured"));
    }

    #[tokio::test]
    async fn unknown_model_is_a_failure() {
        let provider = ImageProvider::new(ImageConfig::default());
        let result = provider
            .generate_image(&ImageRequest::new("cat").with_model("midjourney"))
            .await;
        assert_eq!(result.error_message(), Some("Unknown image model: midjourney"));
    }

    #[test]
    fn always_reports_configured() {
        assert!(ImageProvider::new(ImageConfig::default()).is_configured());
    }
}
