//! In-Memory Conversation Store Adapter
//!
//! Keeps per-session histories in process memory. Histories are lost on
//! restart and never evicted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{ConversationHistory, ConversationTurn, SessionKey};
use crate::ports::ConversationStore;

type SessionSlot = Arc<Mutex<ConversationHistory>>;

/// In-memory storage for conversation histories.
///
/// The outer map lock is held only long enough to find or create a session's
/// slot; each session then has its own lock, so disjoint sessions never wait
/// on each other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    sessions: Arc<RwLock<HashMap<SessionKey, SessionSlot>>>,
}

impl InMemoryConversationStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sessions with a history
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn slot(&self, key: &SessionKey) -> Option<SessionSlot> {
        self.sessions.read().await.get(key).cloned()
    }

    async fn slot_or_create(&self, key: &SessionKey) -> SessionSlot {
        if let Some(slot) = self.slot(key).await {
            return slot;
        }
        let mut sessions = self.sessions.write().await;
        sessions.entry(key.clone()).or_default().clone()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, key: &SessionKey) -> ConversationHistory {
        match self.slot(key).await {
            Some(slot) => slot.lock().await.clone(),
            None => Vec::new(),
        }
    }

    async fn append(&self, key: &SessionKey, turn: ConversationTurn) -> ConversationHistory {
        let slot = self.slot_or_create(key).await;
        let mut history = slot.lock().await;
        history.push(turn);
        history.clone()
    }

    async fn clear(&self, key: &SessionKey) {
        if self.sessions.write().await.remove(key).is_some() {
            tracing::debug!(session = %key, "conversation history cleared");
        }
    }
}
