//! FinTrack chat assistant.
//!
//! Proxies a user's message, plus the conversation so far, to a hosted
//! language model and returns its reply. Nothing is persisted.

pub mod chat;
pub mod error;
pub mod providers;
pub mod types;

pub use chat::ChatService;
pub use error::{AiError, Result};
pub use providers::{ChatProvider, GeminiConfig, GeminiProvider};
pub use types::{ChatReply, ChatRequest, ChatRole, ChatTurn};
