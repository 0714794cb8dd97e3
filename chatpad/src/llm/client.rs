//! CompletionClient trait definition

use async_trait::async_trait;

use super::CompletionError;

/// Stateless completion client - each call is independent
///
/// Only the current prompt is sent; the conversation a thread displays is
/// never replayed to the model.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one prompt and wait for the full reply text
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tracing::debug;

    /// Mock completion client for unit tests
    ///
    /// Replays scripted outcomes in order and records every prompt it saw.
    pub struct MockCompletionClient {
        outcomes: Mutex<VecDeque<Result<String, CompletionError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockCompletionClient {
        pub fn new(outcomes: Vec<Result<String, CompletionError>>) -> Self {
            debug!(outcome_count = %outcomes.len(), "MockCompletionClient::new: called");
            Self {
                outcomes: Mutex::new(outcomes.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        /// Client that answers every prompt in the list, in order
        pub fn replies(replies: &[&str]) -> Self {
            Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionClient for MockCompletionClient {
        async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
            debug!("MockCompletionClient::complete: called");
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.outcomes.lock().unwrap().pop_front().unwrap_or_else(|| {
                debug!("MockCompletionClient::complete: no more mock outcomes");
                Err(CompletionError::InvalidResponse("No more mock responses".to_string()))
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_outcomes_in_order() {
            let client = MockCompletionClient::new(vec![
                Ok("Response 1".to_string()),
                Err(CompletionError::InvalidResponse("boom".to_string())),
            ]);

            assert_eq!(client.complete("first").await.unwrap(), "Response 1");
            assert!(client.complete("second").await.is_err());
            assert_eq!(client.prompts(), vec!["first", "second"]);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockCompletionClient::new(vec![]);

            let result = client.complete("hello").await;
            assert!(result.is_err());
            assert_eq!(client.call_count(), 1);
        }
    }
}
