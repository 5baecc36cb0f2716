//! Dispatcher - routes normalized requests to provider adapters and keeps
//! session history in step.
//!
//! Every operation returns a [`NormalizedResult`]; validation and routing
//! failures are reported the same way as provider failures.

use std::sync::Arc;

use super::registry::ProviderRegistry;
use crate::domain::{
    ChatRequest, CodeAssistRequest, ConversationHistory, ConversationTurn, ImageRequest,
    NormalizedResult, ProviderDescriptor, ProviderId, RelayError, SessionKey,
};
use crate::ports::ConversationStore;

/// Entry point for every relay operation.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ProviderRegistry>,
    store: Arc<dyn ConversationStore>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ProviderRegistry>, store: Arc<dyn ConversationStore>) -> Self {
        Self { registry, store }
    }

    /// Routes a chat message.
    ///
    /// With history enabled, the user turn is stored before the provider is
    /// called and the assistant turn only after a successful reply, so a
    /// failed call leaves the user turn in place.
    pub async fn route_chat(&self, session: &SessionKey, request: ChatRequest) -> NormalizedResult {
        if request.message.trim().is_empty() {
            return rejected(RelayError::validation("Message is required"));
        }

        let adapter = match self.registry.resolve(&request.provider) {
            Ok(adapter) => adapter,
            Err(err) => return rejected(err),
        };

        let user_turn = ConversationTurn::user(request.message.clone());
        let turns = if request.use_history {
            self.store.append(session, user_turn).await
        } else {
            vec![user_turn]
        };

        tracing::debug!(
            session = %session,
            provider = %adapter.id(),
            turns = turns.len(),
            use_history = request.use_history,
            "routing chat"
        );

        let result = adapter
            .chat_with_history(
                &turns,
                &request.system_prompt,
                &request.model,
                request.temperature(),
            )
            .await;

        if request.use_history {
            if let Some(text) = result.text() {
                self.store
                    .append(session, ConversationTurn::assistant(text))
                    .await;
            }
        }

        result
    }

    /// Routes a code-assistance request. Never touches history.
    pub async fn route_code_assist(&self, request: CodeAssistRequest) -> NormalizedResult {
        if request.code.trim().is_empty() {
            return rejected(RelayError::validation("Code input is required"));
        }

        let adapter = match self.registry.resolve(&request.provider) {
            Ok(adapter) => adapter,
            Err(err) => return rejected(err),
        };

        tracing::debug!(provider = %adapter.id(), task = %request.task, "routing code assist");

        adapter
            .code_assist(&request.code, request.task, &request.language, &request.model)
            .await
    }

    /// Routes an image request to the image adapter.
    pub async fn route_image_generate(&self, request: ImageRequest) -> NormalizedResult {
        if request.prompt.trim().is_empty() {
            return rejected(RelayError::validation("Prompt is required"));
        }

        tracing::debug!(model = %request.model, size = %request.size, "routing image generation");

        self.registry.image().generate_image(&request).await
    }

    /// Provider catalog.
    pub fn list_providers(&self) -> Vec<ProviderDescriptor> {
        self.registry.list_providers()
    }

    pub async fn clear_history(&self, session: &SessionKey) {
        self.store.clear(session).await;
    }

    /// Snapshot of the session's history.
    pub async fn get_history(&self, session: &SessionKey) -> ConversationHistory {
        self.store.get(session).await
    }

    /// Replaces a provider's credential. Blank credentials are ignored.
    pub fn reconfigure(&self, provider: ProviderId, credential: &str) {
        self.registry.reconfigure(provider, credential);
    }
}

/// Logs a request that never reached an adapter.
fn rejected(err: RelayError) -> NormalizedResult {
    tracing::info!(kind = ?err.kind(), error = %err, "request rejected");
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{ImageConfig, ImageProvider, MockProvider};
    use crate::adapters::storage::InMemoryConversationStore;
    use crate::domain::{CodeTask, TurnRole};

    fn dispatcher_with(mock: MockProvider) -> Dispatcher {
        let registry = ProviderRegistry::new(Arc::new(ImageProvider::new(ImageConfig::default())));
        registry.register(Arc::new(mock));
        Dispatcher::new(
            Arc::new(registry),
            Arc::new(InMemoryConversationStore::new()),
        )
    }

    fn session() -> SessionKey {
        SessionKey::new("test-session").unwrap()
    }

    #[tokio::test]
    async fn blank_message_is_rejected_before_any_call() {
        let mock = MockProvider::new(ProviderId::Groq);
        let dispatcher = dispatcher_with(mock.clone());

        let result = dispatcher
            .route_chat(&session(), ChatRequest::new("   "))
            .await;

        assert_eq!(result.error_message(), Some("Message is required"));
        assert_eq!(mock.call_count(), 0);
        assert!(dispatcher.get_history(&session()).await.is_empty());
    }

    #[tokio::test]
    async fn successful_chat_records_both_turns() {
        let mock = MockProvider::new(ProviderId::Groq).with_response("hello there");
        let dispatcher = dispatcher_with(mock);

        let result = dispatcher.route_chat(&session(), ChatRequest::new("hi")).await;

        assert_eq!(result.text(), Some("hello there"));
        let history = dispatcher.get_history(&session()).await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role(), TurnRole::User);
        assert_eq!(history[1].content(), "hello there");
    }

    #[tokio::test]
    async fn history_is_sent_to_provider() {
        let mock = MockProvider::new(ProviderId::Groq);
        let dispatcher = dispatcher_with(mock.clone());

        dispatcher.route_chat(&session(), ChatRequest::new("one")).await;
        dispatcher.route_chat(&session(), ChatRequest::new("two")).await;

        let calls = mock.get_calls();
        assert_eq!(calls[1].turns.len(), 3);
        assert_eq!(calls[1].turns[2].content(), "two");
    }

    #[tokio::test]
    async fn chat_without_history_leaves_store_untouched() {
        let mock = MockProvider::new(ProviderId::Groq);
        let dispatcher = dispatcher_with(mock.clone());

        dispatcher
            .route_chat(&session(), ChatRequest::new("hi").with_history(false))
            .await;

        assert!(dispatcher.get_history(&session()).await.is_empty());
        assert_eq!(mock.get_calls()[0].turns.len(), 1);
    }

    #[tokio::test]
    async fn temperature_reaches_provider_clamped() {
        let mock = MockProvider::new(ProviderId::Groq);
        let dispatcher = dispatcher_with(mock.clone());

        dispatcher
            .route_chat(&session(), ChatRequest::new("hi").with_temperature(9.0))
            .await;

        assert_eq!(mock.get_calls()[0].temperature, 2.0);
    }

    #[tokio::test]
    async fn blank_code_is_rejected() {
        let mock = MockProvider::new(ProviderId::Groq);
        let dispatcher = dispatcher_with(mock.clone());

        let result = dispatcher
            .route_code_assist(CodeAssistRequest::new("\n\t"))
            .await;

        assert_eq!(result.error_message(), Some("Code input is required"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn code_assist_uses_low_temperature_and_no_history() {
        let mock = MockProvider::new(ProviderId::Groq);
        let dispatcher = dispatcher_with(mock.clone());

        dispatcher
            .route_code_assist(CodeAssistRequest::new("x = 1").with_task(CodeTask::Review))
            .await;

        let call = &mock.get_calls()[0];
        assert_eq!(call.temperature, 0.3);
        assert!(call.system_prompt.contains("python"));
        assert!(dispatcher.get_history(&session()).await.is_empty());
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected() {
        let dispatcher = dispatcher_with(MockProvider::new(ProviderId::Groq));
        let result = dispatcher.route_image_generate(ImageRequest::new("")).await;
        assert_eq!(result.error_message(), Some("Prompt is required"));
    }

    #[tokio::test]
    async fn reconfigure_reaches_registered_adapter() {
        let mock = MockProvider::unconfigured(ProviderId::Groq);
        let dispatcher = dispatcher_with(mock.clone());

        dispatcher.reconfigure(ProviderId::Groq, "key");

        assert!(dispatcher.list_providers()[0].configured);
    }
}
