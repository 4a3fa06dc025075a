//! Chat assistant error types.

use thiserror::Error;

/// Chat assistant errors.
#[derive(Debug, Error)]
pub enum AiError {
    /// Invalid input or request.
    #[error("{0}")]
    InvalidInput(String),

    /// No API key is configured for the hosted model.
    #[error("Chat assistant is not configured")]
    NotConfigured,

    /// The hosted model answered with a non-success status.
    #[error("Provider returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced an HTTP response.
    #[error("Provider request failed: {0}")]
    Transport(String),

    /// The provider's response could not be understood.
    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),
}

impl AiError {
    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            AiError::InvalidInput(_) => "INVALID_INPUT",
            AiError::NotConfigured => "AI_NOT_CONFIGURED",
            AiError::Upstream { .. } => "PROVIDER_ERROR",
            AiError::Transport(_) => "PROVIDER_UNREACHABLE",
            AiError::InvalidResponse(_) => "PROVIDER_ERROR",
        }
    }
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        AiError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AiError>;
