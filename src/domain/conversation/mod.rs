//! Conversation domain module.
//!
//! Turns and per-session history.

mod message;

pub use message::{latest_user_message, ConversationHistory, ConversationTurn, TurnRole};
