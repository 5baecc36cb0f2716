//! Conversation turns.
//!
//! A turn is an immutable record of one user or assistant message. A session's
//! history is the ordered sequence of its turns, append-only except for an
//! explicit clear.

use serde::{Deserialize, Serialize};

/// Originating role of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// User input.
    User,
    /// AI assistant response.
    Assistant,
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    role: TurnRole,
    content: String,
}

impl ConversationTurn {
    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_user(&self) -> bool {
        self.role == TurnRole::User
    }
}

/// Ordered turns owned by one session.
pub type ConversationHistory = Vec<ConversationTurn>;

/// Returns the content of the most recent user turn, if any.
pub fn latest_user_message(history: &[ConversationTurn]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|turn| turn.is_user())
        .map(ConversationTurn::content)
}
