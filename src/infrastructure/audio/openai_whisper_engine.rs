use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{AudioClip, DEFAULT_CONTENT_TYPE};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_WHISPER_MODEL: &str = "whisper-1";

pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_WHISPER_MODEL.to_string()),
        }
    }
}

fn file_part(audio: &AudioClip) -> Result<multipart::Part, TranscriptionError> {
    let part = || multipart::Part::bytes(audio.data.to_vec()).file_name(audio.filename.clone());

    // Unparseable content types are forwarded as opaque bytes.
    part().mime_str(&audio.content_type).or_else(|e| {
        tracing::debug!(content_type = %audio.content_type, error = %e, "Falling back to octet-stream");
        part()
            .mime_str(DEFAULT_CONTENT_TYPE)
            .map_err(|e| TranscriptionError::UnsupportedFormat(format!("mime: {}", e)))
    })
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(&self, audio: &AudioClip) -> Result<String, TranscriptionError> {
        if audio.is_empty() {
            return Err(TranscriptionError::UnsupportedFormat(format!(
                "{} is empty",
                audio.filename
            )));
        }

        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = file_part(audio)?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);

        tracing::debug!(
            model = %self.model,
            filename = %audio.filename,
            bytes = audio.len(),
            "Sending audio to OpenAI Whisper API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;

        tracing::info!(
            chars = transcript.len(),
            "OpenAI Whisper transcription completed"
        );

        Ok(transcript.trim().to_string())
    }
}
