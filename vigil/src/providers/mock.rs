//! Mock model implementation for testing.
//!
//! Returns predefined responses without making real API calls.

use super::common::{GenerateOptions, Model, ModelResponse};
use crate::error::Error;
use crate::message::ChatMessage;
use async_trait::async_trait;

/// A simple mock model for testing.
///
/// Returns predefined responses in sequence, cycling through them.
#[derive(Debug)]
pub struct MockModel {
    model_id: String,
    responses: Vec<String>,
    response_index: std::sync::atomic::AtomicUsize,
}

impl MockModel {
    /// Create a new mock model with predefined responses.
    #[must_use]
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            model_id: "mock-model".to_string(),
            responses,
            response_index: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Create a mock model with a custom model ID.
    #[must_use]
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }
}

#[async_trait]
impl Model for MockModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(
        &self,
        _messages: Vec<ChatMessage>,
        _options: GenerateOptions,
    ) -> Result<ModelResponse, Error> {
        let index = self
            .response_index
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let response = self
            .responses
            .get(index % self.responses.len().max(1))
            .cloned()
            .unwrap_or_else(|| "No response".to_string());

        Ok(ModelResponse::new(ChatMessage::assistant(response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_model_cycles_responses() {
        let model = MockModel::new(vec!["first".to_string(), "second".to_string()]);
        let options = GenerateOptions::default();

        let r1 = model.generate(vec![], options).await.unwrap();
        assert_eq!(r1.text(), Some("first"));

        let r2 = model.generate(vec![], options).await.unwrap();
        assert_eq!(r2.text(), Some("second"));

        let r3 = model.generate(vec![], options).await.unwrap();
        assert_eq!(r3.text(), Some("first"));
    }
}
