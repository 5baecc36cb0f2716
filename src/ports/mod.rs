//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `ProviderAdapter` - Text/code AI providers
//! - `ImageGenerator` - Image provider
//! - `ConversationStore` - Per-session conversation history

mod ai_provider;
mod conversation_store;
mod image_generator;

pub use ai_provider::ProviderAdapter;
pub use conversation_store::ConversationStore;
pub use image_generator::ImageGenerator;
