//! Request and response shapes of the chat endpoint.

use serde::{Deserialize, Serialize};

/// Author of a history entry as sent by the browser client.
///
/// Anything other than `user` is treated as a prior model reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ChatRole {
    User,
    Assistant,
}

impl From<String> for ChatRole {
    fn from(role: String) -> Self {
        if role == "user" {
            ChatRole::User
        } else {
            ChatRole::Assistant
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}
