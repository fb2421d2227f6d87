use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{CompletionRequest, LlmClient, LlmClientError};

/// Answers every completion with the same raw text.
pub struct MockLlmClient {
    completion: String,
    calls: AtomicUsize,
}

impl MockLlmClient {
    pub fn new(completion: impl Into<String>) -> Self {
        Self {
            completion: completion.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _request: &CompletionRequest<'_>) -> Result<String, LlmClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.completion.clone())
    }
}
