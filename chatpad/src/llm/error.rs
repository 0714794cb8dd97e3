//! Completion error types

use thiserror::Error;

/// Errors that can occur while requesting a completion
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),
}

impl CompletionError {
    /// Whether repeating the same prompt might succeed
    ///
    /// Used only to hint at `/retry`; nothing retries automatically.
    pub fn is_transient(&self) -> bool {
        match self {
            CompletionError::ApiError { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            CompletionError::Network(_) => true,
            CompletionError::InvalidResponse(_) => false,
            CompletionError::Json(_) => false,
            CompletionError::MissingApiKey(_) => false,
        }
    }
}
