//! Hosted model providers.
//!
//! The chat service talks to a [`ChatProvider`]; [`GeminiProvider`] is the
//! production implementation backed by the Gemini `generateContent` API.

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::{json, Value};
use std::time::Duration;

use crate::error::{AiError, Result};
use crate::types::{ChatRole, ChatTurn};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const SYSTEM_INSTRUCTION: &str = "You are FinTrack AI, a helpful personal finance assistant.";
pub const MAX_OUTPUT_TOKENS: u32 = 1000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A model that turns a conversation into a single reply.
///
/// `contents` is already normalised: it starts with a user turn and ends
/// with the new user message.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn generate(&self, contents: &[ChatTurn]) -> Result<String>;
}

// ============================================================================
// Gemini
// ============================================================================

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

pub struct GeminiProvider {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    async fn generate(&self, contents: &[ChatTurn]) -> Result<String> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(AiError::NotConfigured),
        };

        debug!(
            "Sending {} turns to model {}",
            contents.len(),
            self.config.model
        );
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&build_request_body(contents))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Model request failed with status {}", status);
            return Err(AiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;
        extract_reply(&body)
    }
}

fn wire_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    }
}

/// Builds the `generateContent` request payload.
pub fn build_request_body(contents: &[ChatTurn]) -> Value {
    let contents: Vec<Value> = contents
        .iter()
        .map(|turn| {
            json!({
                "role": wire_role(turn.role),
                "parts": [{ "text": turn.content }],
            })
        })
        .collect();

    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": contents,
        "generationConfig": { "maxOutputTokens": MAX_OUTPUT_TOKENS },
    })
}

/// Pulls the reply text out of a `generateContent` response.
///
/// Text parts of the first candidate are concatenated.
pub fn extract_reply(body: &Value) -> Result<String> {
    let parts = body
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| AiError::InvalidResponse("no candidates in response".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(AiError::InvalidResponse(
            "candidate contained no text".to_string(),
        ));
    }
    Ok(text)
}
