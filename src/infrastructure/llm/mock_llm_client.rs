use crate::application::ports::{LlmClient, LlmClientError};

/// Echoes the question and the size of the context it was given.
pub struct MockLlmClient;

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, question: &str, context: &str) -> Result<String, LlmClientError> {
        Ok(format!(
            "Mock answer to '{}' from {} context chars",
            question,
            context.chars().count()
        ))
    }
}
