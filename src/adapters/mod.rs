//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Provider adapters (Groq, Gemini, HuggingFace, OpenAI, Anthropic, images)
//! - `storage` - Conversation history store
//! - `http` - Axum REST API

pub mod ai;
pub mod http;
pub mod storage;

pub use storage::InMemoryConversationStore;
