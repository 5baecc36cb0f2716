//! Storage Adapters
//!
//! Implementations of the ConversationStore port.
//!
//! ## Available Adapters
//!
//! - **InMemoryConversationStore** - Process-lifetime histories keyed by session
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryConversationStore;
//!
//! let store: Arc<dyn ConversationStore> = Arc::new(InMemoryConversationStore::new());
//! ```

mod in_memory_conversation_store;

pub use in_memory_conversation_store::InMemoryConversationStore;
