//! Completion client module
//!
//! Maps a single user prompt to a single assistant reply.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::CompletionClient;
pub use error::CompletionError;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, Role, WireMessage};

use crate::config::LlmConfig;

/// Create the completion client described by the config
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn CompletionClient>, CompletionError> {
    debug!(model = %config.model, "create_client: called");
    Ok(Arc::new(OpenAIClient::from_config(config)?))
}
