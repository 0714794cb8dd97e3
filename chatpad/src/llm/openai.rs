//! OpenAI-compatible chat completions client
//!
//! Works against any provider exposing `POST {base}/chat/completions`
//! (Groq by default). One request per prompt, no retries, no streaming.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::types::{CompletionRequest, CompletionResponse};
use super::{CompletionClient, CompletionError};
use crate::config::LlmConfig;

/// OpenAI-compatible API client
pub struct OpenAIClient {
    model: String,
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenAIClient {
    /// Create a new client from configuration
    ///
    /// The API key is resolved from the environment variable the config names.
    pub fn from_config(config: &LlmConfig) -> Result<Self, CompletionError> {
        debug!(model = %config.model, base_url = %config.base_url, "from_config: called");
        let api_key = config
            .api_key()
            .ok_or_else(|| CompletionError::MissingApiKey(config.api_key_env.clone()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            debug!(?timeout, "from_config: request timeout configured");
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CompletionError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            endpoint: config.endpoint(),
            http,
        })
    }

    /// Build the request body for one prompt
    fn build_request_body(&self, prompt: &str) -> CompletionRequest {
        debug!(%self.model, prompt_len = prompt.len(), "build_request_body: called");
        CompletionRequest::single_turn(&self.model, prompt)
    }
}

/// Extract `choices[0].message.content` from a response body
pub(crate) fn parse_response(body: &str) -> Result<String, CompletionError> {
    let response: CompletionResponse = serde_json::from_str(body)?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::InvalidResponse("response has no choices".to_string()))?;

    choice
        .message
        .content
        .ok_or_else(|| CompletionError::InvalidResponse("first choice has no message content".to_string()))
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        debug!(%self.model, endpoint = %self.endpoint, "complete: called");
        let body = self.build_request_body(prompt);

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                debug!(error = %e, "complete: network error");
                CompletionError::Network(e)
            })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "complete: API error");
            return Err(CompletionError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let reply = parse_response(&text)?;
        debug!(reply_len = reply.len(), "complete: success");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OpenAIClient {
        OpenAIClient {
            model: "meta-llama/llama-4-scout-17b-16e-instruct".to_string(),
            api_key: "test-key".to_string(),
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            http: Client::new(),
        }
    }

    #[test]
    fn test_build_request_body_is_single_turn() {
        let client = test_client();

        let body = serde_json::to_value(client.build_request_body("Hello")).unwrap();

        assert_eq!(body["model"], "meta-llama/llama-4-scout-17b-16e-instruct");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Hello");
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn test_parse_response_reads_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Hi there!"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 3, "completion_tokens": 3}
        }"#;

        assert_eq!(parse_response(body).unwrap(), "Hi there!");
    }

    #[test]
    fn test_parse_response_without_choices_is_invalid() {
        let err = parse_response(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, CompletionError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_response_null_content_is_invalid() {
        let err = parse_response(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap_err();
        assert!(matches!(err, CompletionError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_response_malformed_json() {
        let err = parse_response("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, CompletionError::Json(_)));
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = LlmConfig {
            api_key_env: "CHATPAD_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..LlmConfig::default()
        };

        match OpenAIClient::from_config(&config) {
            Err(CompletionError::MissingApiKey(var)) => assert_eq!(var, "CHATPAD_TEST_KEY_THAT_IS_NEVER_SET"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("client built without an API key"),
        }
    }
}
