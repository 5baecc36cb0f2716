//! Normalized request shapes accepted by the dispatcher.
//!
//! These are transient: built per request, never stored.

use serde_json::Value;
use std::fmt;

/// Lowest accepted sampling temperature.
pub const MIN_TEMPERATURE: f32 = 0.0;
/// Highest accepted sampling temperature.
pub const MAX_TEMPERATURE: f32 = 2.0;
/// Temperature used when the input is missing or not a number.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Clamps a temperature into `[MIN_TEMPERATURE, MAX_TEMPERATURE]`.
///
/// NaN falls back to [`DEFAULT_TEMPERATURE`].
pub fn clamp_temperature(value: f64) -> f32 {
    if value.is_nan() {
        return DEFAULT_TEMPERATURE;
    }
    (value as f32).clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}

/// Reads a temperature from loosely-typed client input.
///
/// Accepts JSON numbers and numeric strings; anything else yields the default.
pub fn parse_temperature(raw: Option<&Value>) -> f32 {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.map(clamp_temperature).unwrap_or(DEFAULT_TEMPERATURE)
}

/// A chat request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub provider: String,
    /// Empty selects the provider's default model.
    pub model: String,
    /// Empty means no system prompt.
    pub system_prompt: String,
    temperature: f32,
    pub use_history: bool,
}

impl ChatRequest {
    /// Creates a request with the default provider, temperature and history usage.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            provider: "groq".to_string(),
            model: String::new(),
            system_prompt: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            use_history: true,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Sets the temperature, clamped into the accepted range.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = clamp_temperature(temperature);
        self
    }

    pub fn with_history(mut self, use_history: bool) -> Self {
        self.use_history = use_history;
        self
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// Kind of code assistance requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeTask {
    #[default]
    Explain,
    Debug,
    Generate,
    Review,
}

impl CodeTask {
    /// Parses a task name; unknown names fall back to [`CodeTask::Explain`].
    pub fn parse_or_default(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" => CodeTask::Debug,
            "generate" => CodeTask::Generate,
            "review" => CodeTask::Review,
            _ => CodeTask::Explain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CodeTask::Explain => "explain",
            CodeTask::Debug => "debug",
            CodeTask::Generate => "generate",
            CodeTask::Review => "review",
        }
    }
}

impl fmt::Display for CodeTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A code-assist request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAssistRequest {
    pub code: String,
    pub task: CodeTask,
    pub language: String,
    pub provider: String,
    pub model: String,
}

impl CodeAssistRequest {
    /// Creates a request with the default task, language and provider.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            task: CodeTask::default(),
            language: "python".to_string(),
            provider: "groq".to_string(),
            model: String::new(),
        }
    }

    pub fn with_task(mut self, task: CodeTask) -> Self {
        self.task = task;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Output dimensions for image generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const DEFAULT: ImageSize = ImageSize {
        width: 1024,
        height: 1024,
    };

    /// Parses `"WxH"`; malformed or zero dimensions give [`ImageSize::DEFAULT`].
    pub fn parse_or_default(raw: &str) -> Self {
        let Some((w, h)) = raw.trim().to_ascii_lowercase().split_once('x').map(|(w, h)| {
            (w.trim().parse::<u32>(), h.trim().parse::<u32>())
        }) else {
            return Self::DEFAULT;
        };
        match (w, h) {
            (Ok(width), Ok(height)) if width > 0 && height > 0 => Self { width, height },
            _ => Self::DEFAULT,
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An image generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    pub model: String,
    pub size: ImageSize,
    pub quality: String,
}

impl ImageRequest {
    /// Creates a request for the free default model.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: "pollinations".to_string(),
            size: ImageSize::DEFAULT,
            quality: "standard".to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }
}
