//! AI Provider Adapters.
//!
//! Implementations of the ProviderAdapter and ImageGenerator ports.
//!
//! ## Available Adapters
//!
//! - `GroqProvider` - Groq free tier (LLaMA-3, Mixtral, Gemma2)
//! - `GeminiProvider` - Google Gemini free tier
//! - `HuggingFaceProvider` - HuggingFace Inference API (single-turn)
//! - `OpenAIProvider` - OpenAI GPT models (GPT-4o, GPT-3.5)
//! - `AnthropicProvider` - Anthropic Claude models (Sonnet, Opus, Haiku)
//! - `ImageProvider` - Pollinations (free) and DALL-E 3
//! - `MockProvider` - Configurable mock for testing

mod anthropic_provider;
mod chat_completions;
mod gemini_provider;
mod groq_provider;
mod huggingface_provider;
mod image_provider;
mod mock_provider;
mod openai_provider;
mod support;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider, ANTHROPIC_DEFAULT_MODEL};
pub use gemini_provider::{GeminiConfig, GeminiProvider, GEMINI_DEFAULT_MODEL};
pub use groq_provider::{GroqConfig, GroqProvider, GROQ_DEFAULT_MODEL};
pub use huggingface_provider::{HuggingFaceConfig, HuggingFaceProvider, HUGGINGFACE_DEFAULT_MODEL};
pub use image_provider::{ImageConfig, ImageProvider, DALL_E_MODEL, POLLINATIONS_MODEL};
pub use mock_provider::{MockCall, MockProvider, MockResponse, MOCK_MODEL};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, OPENAI_DEFAULT_MODEL};
