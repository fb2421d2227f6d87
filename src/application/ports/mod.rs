mod llm_client;
mod staging_store;
mod transcription_engine;

pub use llm_client::{
    CompletionRequest, LlmClient, LlmClientError, ResponseSchema, SamplingParams,
};
pub use staging_store::{StagingStore, StagingStoreError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
