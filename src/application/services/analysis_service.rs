use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use futures::stream::BoxStream;
use tokio::time::timeout;

use crate::application::ports::{
    LlmClient, StagingStore, StagingStoreError, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{AudioClip, Catalog, ProcessingTime, StoragePath, TaskRecord, Upload};

use super::staged_upload::StagedUpload;
use super::task_extractor::{ExtractionError, TaskExtractor};

/// Upper bounds on the two outbound calls of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTimeouts {
    pub transcription: Duration,
    pub extraction: Duration,
}

impl Default for AnalysisTimeouts {
    fn default() -> Self {
        Self {
            transcription: Duration::from_secs(120),
            extraction: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Transcription,
    Extraction,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Transcription => f.write_str("transcription"),
            Stage::Extraction => f.write_str("extraction"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("staging failed: {0}")]
    Storage(#[from] StagingStoreError),
    #[error("transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("{stage} timed out after {}s", .after.as_secs_f64())]
    Timeout { stage: Stage, after: Duration },
}

impl AnalysisError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalysisError::InvalidRequest(_))
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub transcription: String,
    pub processing_time: ProcessingTime,
    pub tasks: Vec<TaskRecord>,
}

/// Runs one upload through transcription and task extraction.
pub struct AnalysisService<T: ?Sized, L: ?Sized>
where
    T: TranscriptionEngine,
    L: LlmClient,
{
    staging_store: Arc<dyn StagingStore>,
    transcription_engine: Arc<T>,
    task_extractor: TaskExtractor<L>,
    timeouts: AnalysisTimeouts,
}

impl<T: ?Sized, L: ?Sized> AnalysisService<T, L>
where
    T: TranscriptionEngine,
    L: LlmClient,
{
    pub fn new(
        staging_store: Arc<dyn StagingStore>,
        transcription_engine: Arc<T>,
        llm_client: Arc<L>,
        timeouts: AnalysisTimeouts,
    ) -> Self {
        Self {
            staging_store,
            transcription_engine,
            task_extractor: TaskExtractor::new(llm_client),
            timeouts,
        }
    }

    /// Streams an uploaded file into the staging store under a fresh name.
    pub async fn stage(
        &self,
        original_filename: String,
        content_type: Option<String>,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<StagedUpload, AnalysisError> {
        let received_at = Instant::now();
        let path = StoragePath::for_upload(&original_filename);

        let size_bytes = self.staging_store.store(&path, stream).await?;

        tracing::info!(
            path = %path,
            filename = %original_filename,
            content_type = content_type.as_deref().unwrap_or("unknown"),
            size_bytes,
            "Upload staged"
        );

        let upload = Upload::new(path, original_filename, content_type, size_bytes);
        Ok(StagedUpload::new(
            upload,
            Arc::clone(&self.staging_store),
            received_at,
        ))
    }

    /// Transcribes the staged file, extracts tasks from the transcript and
    /// removes the file, whatever the outcome.
    #[tracing::instrument(skip_all, fields(path = %staged.upload().path))]
    pub async fn analyze(
        &self,
        staged: StagedUpload,
        catalog: &Catalog,
    ) -> Result<AnalysisReport, AnalysisError> {
        let outcome = self.run(&staged, catalog).await;

        // Removal failures are logged by `release` and never mask the outcome.
        let _ = staged.release().await;

        outcome
    }

    async fn run(
        &self,
        staged: &StagedUpload,
        catalog: &Catalog,
    ) -> Result<AnalysisReport, AnalysisError> {
        let upload = staged.upload();
        let data = self.staging_store.fetch(&upload.path).await?;
        let clip = AudioClip::from_upload(upload, data);

        let transcription_started = Instant::now();
        let transcription = timeout(
            self.timeouts.transcription,
            self.transcription_engine.transcribe(&clip),
        )
        .await
        .map_err(|_| AnalysisError::Timeout {
            stage: Stage::Transcription,
            after: self.timeouts.transcription,
        })??;
        let transcription_time = transcription_started.elapsed();

        if transcription.is_empty() {
            tracing::warn!("Transcription returned no text");
        }

        let extraction_started = Instant::now();
        let extraction = timeout(
            self.timeouts.extraction,
            self.task_extractor.extract(&transcription, catalog),
        )
        .await
        .map_err(|_| AnalysisError::Timeout {
            stage: Stage::Extraction,
            after: self.timeouts.extraction,
        })??;
        let analysis_time = extraction_started.elapsed();

        let processing_time = ProcessingTime {
            transcription: transcription_time,
            analysis: analysis_time,
            total: staged.received_at().elapsed(),
        };

        tracing::info!(
            transcription_ms = transcription_time.as_millis() as u64,
            analysis_ms = analysis_time.as_millis() as u64,
            total_ms = processing_time.total.as_millis() as u64,
            tasks = extraction.tasks.len(),
            "Analysis completed"
        );

        Ok(AnalysisReport {
            transcription,
            processing_time,
            tasks: extraction.tasks,
        })
    }
}
