use std::sync::Arc;

use crate::application::ports::{
    CompletionRequest, LlmClient, LlmClientError, ResponseSchema, SamplingParams,
};
use crate::domain::{Catalog, ExtractionResult};

use super::extraction_prompt::{SYSTEM_PROMPT, task_list_schema};

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Llm(#[from] LlmClientError),
    #[error("malformed extraction response: {0}")]
    MalformedResponse(String),
}

/// Turns a transcript into structured task records with a single
/// schema-constrained completion.
pub struct TaskExtractor<L: ?Sized> {
    llm_client: Arc<L>,
    schema: ResponseSchema,
}

impl<L: LlmClient + ?Sized> TaskExtractor<L> {
    pub fn new(llm_client: Arc<L>) -> Self {
        Self {
            llm_client,
            schema: task_list_schema(),
        }
    }

    #[tracing::instrument(skip_all, fields(transcript_chars = transcript.len()))]
    pub async fn extract(
        &self,
        transcript: &str,
        catalog: &Catalog,
    ) -> Result<ExtractionResult, ExtractionError> {
        let user_message = build_user_message(transcript, catalog);

        tracing::debug!(
            user_message_chars = user_message.len(),
            "Requesting task extraction"
        );

        let request = CompletionRequest {
            system_prompt: SYSTEM_PROMPT,
            user_message: &user_message,
            response_schema: &self.schema,
            sampling: SamplingParams::deterministic(),
        };

        let completion = self.llm_client.complete(&request).await?;
        let result = parse_completion(&completion)?;

        tracing::info!(tasks = result.tasks.len(), "Task extraction completed");

        Ok(result)
    }
}

pub fn build_user_message(transcript: &str, catalog: &Catalog) -> String {
    format!(
        "{}\n\nCatalogue des tâches :\n{}",
        transcript.trim(),
        catalog.to_pretty_json()
    )
}

/// Parses a completion into normalized task records.
pub fn parse_completion(completion: &str) -> Result<ExtractionResult, ExtractionError> {
    serde_json::from_str::<ExtractionResult>(completion.trim())
        .map(ExtractionResult::normalize)
        .map_err(|e| {
            tracing::warn!(
                error = %e,
                completion_chars = completion.len(),
                "Extraction response did not match the task schema"
            );
            ExtractionError::MalformedResponse(e.to_string())
        })
}
