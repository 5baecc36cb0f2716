//! Provider Adapter Port - Interface every text/code provider implements.
//!
//! This port abstracts all interactions with third-party AI providers (Groq,
//! Gemini, HuggingFace, OpenAI, Anthropic), so the dispatcher only branches on
//! provider identity for routing, never for error handling.
//!
//! # Design
//!
//! - Every call returns a [`NormalizedResult`]; provider-specific error shapes
//!   never cross this boundary
//! - An unconfigured adapter fails immediately without network I/O
//! - One outbound request per call, no retries, bounded by the adapter's timeout
//! - The credential is the only mutable state and may be replaced at runtime
//!
//! # Example
//!
//! ```ignore
//! let adapter: Arc<dyn ProviderAdapter> = Arc::new(GroqProvider::new(GroqConfig::new(key)));
//! let result = adapter.chat("Hello", "", "", 0.7).await;
//! ```

use async_trait::async_trait;

use crate::domain::relay::{code_assist_prompt, code_assist_system_prompt, CODE_ASSIST_TEMPERATURE};
use crate::domain::{
    CodeTask, ConversationTurn, ModelDescriptor, NormalizedResult, ProviderDescriptor, ProviderId,
    Tier,
};

/// Port for text/code provider interactions.
///
/// Implementations translate the normalized call into the provider's wire
/// format and translate the reply (or failure) back.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Identifier this adapter is registered under.
    fn id(&self) -> ProviderId;

    /// Label shown in the provider catalog.
    fn display_name(&self) -> &'static str;

    /// Pricing tier.
    fn tier(&self) -> Tier;

    /// True iff a non-empty credential is present.
    fn is_configured(&self) -> bool;

    /// Static model list, independent of configuration state.
    fn available_models(&self) -> Vec<ModelDescriptor>;

    /// Replaces the credential. Empty or whitespace-only input is ignored.
    ///
    /// Calls already in flight keep the credential they started with.
    fn reconfigure(&self, credential: &str);

    /// Single-turn call.
    async fn chat(
        &self,
        message: &str,
        system_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> NormalizedResult;

    /// Multi-turn call sending the full ordered history.
    ///
    /// Providers without a multi-turn wire format degrade to a single-turn
    /// call on the latest user message.
    async fn chat_with_history(
        &self,
        history: &[ConversationTurn],
        system_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> NormalizedResult;

    /// Code assistance: task template plus an expertise system prompt, sent
    /// through [`chat`](Self::chat) at a fixed low temperature.
    async fn code_assist(
        &self,
        code: &str,
        task: CodeTask,
        language: &str,
        model: &str,
    ) -> NormalizedResult {
        let prompt = code_assist_prompt(task, language, code);
        let system_prompt = code_assist_system_prompt(language);
        self.chat(&prompt, &system_prompt, model, CODE_ASSIST_TEMPERATURE)
            .await
    }

    /// Catalog entry computed from live adapter state.
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            id: self.id().to_string(),
            display_name: self.display_name().to_string(),
            tier: self.tier(),
            configured: self.is_configured(),
            models: self.available_models(),
        }
    }
}
