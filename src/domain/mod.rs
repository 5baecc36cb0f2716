//! Domain layer containing the relay's vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Identifiers and the error taxonomy
//! - `conversation` - Turns and per-session history
//! - `relay` - Requests, normalized results, provider catalog, prompt templates

pub mod conversation;
pub mod foundation;
pub mod relay;

pub use conversation::{latest_user_message, ConversationHistory, ConversationTurn, TurnRole};
pub use foundation::{ErrorKind, ProviderId, RelayError, SessionKey};
pub use relay::{
    ChatRequest, CodeAssistRequest, CodeTask, Completion, ImageRequest, ImageSize,
    ModelDescriptor, NormalizedResult, ProviderDescriptor, Tier,
};
