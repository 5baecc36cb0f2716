//! Conversation Store Port - Per-session conversation history.
//!
//! Histories live for the process lifetime only. There is no eviction: a
//! session's turns stay until it is explicitly cleared.

use async_trait::async_trait;

use crate::domain::{ConversationHistory, ConversationTurn, SessionKey};

/// Maps a session key to its ordered turns.
///
/// Implementations must let disjoint sessions proceed concurrently and must
/// make each append atomic (no lost updates, no torn reads).
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Snapshot of the session's history. Unseen keys get an empty history.
    async fn get(&self, key: &SessionKey) -> ConversationHistory;

    /// Appends a turn and returns the history as it stands right after.
    async fn append(&self, key: &SessionKey, turn: ConversationTurn) -> ConversationHistory;

    /// Resets the session to an empty history. Unknown keys are a no-op.
    async fn clear(&self, key: &SessionKey);
}
