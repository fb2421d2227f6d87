use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Runs a single system/user exchange and returns the raw completion text.
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, LlmClientError>;
}

/// JSON schema the completion must conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub schema: Value,
}

/// Sampling knobs sent with every completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub seed: Option<i64>,
}

impl SamplingParams {
    pub fn deterministic() -> Self {
        Self {
            temperature: 0.0,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            seed: Some(0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub user_message: &'a str,
    pub response_schema: &'a ResponseSchema,
    pub sampling: SamplingParams,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
