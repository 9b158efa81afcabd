//! Conversation context handed to the LLM endpoint.

pub mod history;

pub use history::{ConversationHistory, DEFAULT_MAX_TURNS, DEFAULT_SYSTEM_PROMPT};
