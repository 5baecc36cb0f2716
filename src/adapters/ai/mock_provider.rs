//! Mock provider for testing.
//!
//! Provides a configurable implementation of the ProviderAdapter port,
//! allowing dispatcher and HTTP tests to run without calling real AI APIs.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Echo of the last user message once the queue is empty
//! - Simulated delays for concurrency testing
//! - Error injection
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockProvider::new(ProviderId::Groq)
//!     .with_response("Hello, I'm the assistant!")
//!     .with_delay(Duration::from_millis(100));
//!
//! let result = provider.chat("Hi", "", "", 0.7).await;
//! assert_eq!(result.text(), Some("Hello, I'm the assistant!"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::{
    latest_user_message, ConversationTurn, ModelDescriptor, NormalizedResult, ProviderId,
    RelayError, Tier,
};
use crate::ports::ProviderAdapter;

/// Model name reported by the mock when the caller leaves it blank.
pub const MOCK_MODEL: &str = "mock-model-1";

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion with this text.
    Success(String),
    /// Return a failure.
    Error(RelayError),
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    /// Turns the provider received; a single user turn for `chat`.
    pub turns: Vec<ConversationTurn>,
    pub system_prompt: String,
    pub model: String,
    pub temperature: f32,
}

/// Mock provider for testing.
///
/// Clones share the response queue, the call log and the configured flag, so
/// a test can keep a handle after registering the provider.
#[derive(Debug, Clone)]
pub struct MockProvider {
    id: ProviderId,
    tier: Tier,
    configured: Arc<AtomicBool>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockProvider {
    /// Creates a configured mock registered under `id`.
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            tier: Tier::Free,
            configured: Arc::new(AtomicBool::new(true)),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock with no credential; every call fails without being recorded.
    pub fn unconfigured(id: ProviderId) -> Self {
        let provider = Self::new(id);
        provider.configured.store(false, Ordering::SeqCst);
        provider
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success(text.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: RelayError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    /// Returns the number of calls that reached the provider.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    async fn respond(
        &self,
        turns: &[ConversationTurn],
        system_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> NormalizedResult {
        if !self.is_configured() {
            return RelayError::NotConfigured {
                provider: "Mock",
                hint: "Configure the mock first.",
            }
            .into();
        }

        lock(&self.calls).push(MockCall {
            turns: turns.to_vec(),
            system_prompt: system_prompt.to_string(),
            model: model.to_string(),
            temperature,
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let model_used = if model.trim().is_empty() { MOCK_MODEL } else { model };
        let next = lock(&self.responses).pop_front();

        match next {
            Some(MockResponse::Success(text)) => NormalizedResult::success(text, model_used),
            Some(MockResponse::Error(err)) => err.into(),
            None => NormalizedResult::success(
                latest_user_message(turns).unwrap_or_default(),
                model_used,
            ),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn display_name(&self) -> &'static str {
        "Mock Provider"
    }

    fn tier(&self) -> Tier {
        self.tier
    }

    fn is_configured(&self) -> bool {
        self.configured.load(Ordering::SeqCst)
    }

    fn available_models(&self) -> Vec<ModelDescriptor> {
        vec![ModelDescriptor::new(MOCK_MODEL, "Mock Model")]
    }

    fn reconfigure(&self, credential: &str) {
        if !credential.trim().is_empty() {
            self.configured.store(true, Ordering::SeqCst);
        }
    }

    async fn chat(
        &self,
        message: &str,
        system_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> NormalizedResult {
        let turns = [ConversationTurn::user(message)];
        self.respond(&turns, system_prompt, model, temperature).await
    }

    async fn chat_with_history(
        &self,
        history: &[ConversationTurn],
        system_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> NormalizedResult {
        self.respond(history, system_prompt, model, temperature)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_provider_returns_responses_in_order() {
        let provider = MockProvider::new(ProviderId::Groq)
            .with_response("First")
            .with_response("Second");

        let r1 = provider.chat("hi", "", "", 0.7).await;
        let r2 = provider.chat("hi", "", "", 0.7).await;

        assert_eq!(r1.text(), Some("First"));
        assert_eq!(r2.text(), Some("Second"));
        assert_eq!(r2.model_used(), Some(MOCK_MODEL));
    }

    #[tokio::test]
    async fn mock_provider_echoes_after_exhausted() {
        let provider = MockProvider::new(ProviderId::Gemini).with_response("Only one");

        provider.chat("first", "", "", 0.7).await;
        let echoed = provider.chat("second", "", "", 0.7).await;

        assert_eq!(echoed.text(), Some("second"));
    }

    #[tokio::test]
    async fn mock_provider_returns_configured_error() {
        let provider = MockProvider::new(ProviderId::OpenAI)
            .with_error(RelayError::remote("OpenAI", "rate limited"));

        let result = provider.chat("hi", "", "", 0.7).await;

        assert_eq!(result.error_message(), Some("OpenAI API error: rate limited"));
    }

    #[tokio::test]
    async fn unconfigured_mock_records_nothing() {
        let provider = MockProvider::unconfigured(ProviderId::Groq);

        let result = provider.chat("hi", "", "", 0.7).await;

        assert!(!result.is_success());
        assert_eq!(provider.call_count(), 0);

        provider.reconfigure("key");
        assert!(provider.chat("hi", "", "", 0.7).await.is_success());
    }

    #[tokio::test]
    async fn clones_share_call_log() {
        let provider = MockProvider::new(ProviderId::Groq);
        let handle = provider.clone();

        provider
            .chat_with_history(&[ConversationTurn::user("a")], "sys", "m", 0.2)
            .await;

        let calls = handle.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_prompt, "sys");
        assert_eq!(calls[0].model, "m");

        handle.clear_calls();
        assert_eq!(provider.call_count(), 0);
    }
}
