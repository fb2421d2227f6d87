use async_trait::async_trait;

use crate::domain::AudioClip;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Returns the full plain-text transcript of `audio`.
    async fn transcribe(&self, audio: &AudioClip) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
