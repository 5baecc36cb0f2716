//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for any provider timeout, in seconds.
const MAX_TIMEOUT_SECS: u64 = 300;

/// AI provider configuration
///
/// Every key is optional. Providers without a key start unconfigured and can
/// be given one at runtime; the free image model needs none.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// Groq API key
    pub groq_api_key: Option<String>,

    /// Google Gemini API key
    pub gemini_api_key: Option<String>,

    /// HuggingFace access token
    pub huggingface_api_key: Option<String>,

    /// OpenAI API key (also enables DALL-E)
    pub openai_api_key: Option<String>,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Request timeout for slow providers (HuggingFace cold starts)
    #[serde(default = "default_slow_timeout")]
    pub slow_timeout_secs: u64,
}

impl ProvidersConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get slow-provider timeout as Duration
    pub fn slow_timeout(&self) -> Duration {
        Duration::from_secs(self.slow_timeout_secs)
    }

    /// Check if Groq is configured
    pub fn has_groq(&self) -> bool {
        has_key(&self.groq_api_key)
    }

    /// Check if Gemini is configured
    pub fn has_gemini(&self) -> bool {
        has_key(&self.gemini_api_key)
    }

    /// Check if HuggingFace is configured
    pub fn has_huggingface(&self) -> bool {
        has_key(&self.huggingface_api_key)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        has_key(&self.openai_api_key)
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        has_key(&self.anthropic_api_key)
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for secs in [self.timeout_secs, self.slow_timeout_secs] {
            if secs == 0 || secs > MAX_TIMEOUT_SECS {
                return Err(ValidationError::InvalidProviderTimeout);
            }
        }
        Ok(())
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            gemini_api_key: None,
            huggingface_api_key: None,
            openai_api_key: None,
            anthropic_api_key: None,
            timeout_secs: default_timeout(),
            slow_timeout_secs: default_slow_timeout(),
        }
    }
}

fn has_key(key: &Option<String>) -> bool {
    key.as_ref().is_some_and(|k| !k.trim().is_empty())
}

fn default_timeout() -> u64 {
    60
}

fn default_slow_timeout() -> u64 {
    90
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_providers_config_defaults() {
        let config = ProvidersConfig::default();
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.slow_timeout_secs, 90);
        assert!(!config.has_groq());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_durations() {
        let config = ProvidersConfig {
            timeout_secs: 30,
            slow_timeout_secs: 120,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.slow_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_has_provider_checks() {
        let config = ProvidersConfig {
            groq_api_key: Some("gsk_xxx".to_string()),
            gemini_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.has_groq());
        assert!(!config.has_gemini());
        assert!(!config.has_openai());
    }

    #[test]
    fn test_validation_rejects_out_of_range_timeouts() {
        let config = ProvidersConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ProvidersConfig {
            slow_timeout_secs: 301,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
