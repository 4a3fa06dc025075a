//! Chat service: validates a request and forwards it to the provider.

use log::debug;
use std::sync::Arc;

use crate::error::{AiError, Result};
use crate::providers::ChatProvider;
use crate::types::{ChatReply, ChatRequest, ChatRole, ChatTurn};

pub struct ChatService {
    provider: Arc<dyn ChatProvider>,
}

impl ChatService {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply> {
        let message = request
            .message
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| AiError::invalid_input("Message is required"))?;

        let contents = conversation(request.history, message);
        debug!("Chat request with {} turns", contents.len());
        let reply = self.provider.generate(&contents).await?;
        Ok(ChatReply { reply })
    }
}

/// History followed by the new message, trimmed so the first turn is the user's.
fn conversation(history: Vec<ChatTurn>, message: String) -> Vec<ChatTurn> {
    let mut contents: Vec<ChatTurn> = history
        .into_iter()
        .skip_while(|turn| turn.role != ChatRole::User)
        .collect();
    contents.push(ChatTurn {
        role: ChatRole::User,
        content: message,
    });
    contents
}
